use std::collections::HashMap;

use tracing::{debug, info};

use crate::{error::Result, source::DocumentSource};

/// Topic assigned to users who have not picked one.
pub const DEFAULT_TOPIC: &str = "Tennis";

/// One user's selected topic and its fetched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub topic: String,
    pub document: String,
}

/// Per-user topic selection.
///
/// Entries are created on a user's first interaction with the default
/// topic and replaced when the user changes topic. The fetched document is
/// kept until then, so a session fetches its topic once.
#[derive(Debug, Clone)]
pub struct SessionStore {
    default_topic: String,
    sessions: HashMap<String, Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC)
    }
}

impl SessionStore {
    pub fn new(default_topic: impl Into<String>) -> Self {
        Self {
            default_topic: default_topic.into(),
            sessions: HashMap::new(),
        }
    }

    pub fn default_topic(&self) -> &str {
        &self.default_topic
    }

    pub fn get(&self, user: &str) -> Option<&Session> {
        self.sessions.get(user)
    }

    /// The user's session, creating it with the default topic if needed.
    pub fn get_or_create(
        &mut self,
        user: &str,
        source: &impl DocumentSource,
    ) -> Result<&Session> {
        if !self.sessions.contains_key(user) {
            let document = source.fetch(&self.default_topic)?;
            debug!(user, topic = %self.default_topic, "created session");
            self.sessions.insert(
                user.to_string(),
                Session {
                    topic: self.default_topic.clone(),
                    document,
                },
            );
        }
        Ok(&self.sessions[user])
    }

    /// Switch the user to `topic`.
    ///
    /// The topic is fetched first; on failure the previous session is left
    /// untouched.
    pub fn change_topic(
        &mut self,
        user: &str,
        topic: &str,
        source: &impl DocumentSource,
    ) -> Result<&Session> {
        let document = source.fetch(topic)?;
        info!(user, topic, "topic changed");
        self.sessions.insert(
            user.to_string(),
            Session {
                topic: topic.to_string(),
                document,
            },
        );
        Ok(&self.sessions[user])
    }

    pub fn remove(&mut self, user: &str) -> Option<Session> {
        self.sessions.remove(user)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
