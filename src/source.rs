//! Where document text comes from.
//!
//! A source maps a topic name to plain text. Markup stripping and network
//! retrieval are left to whoever fills the topics directory.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Extensions tried, in order, when resolving a topic file.
const TOPIC_EXTENSIONS: &[&str] = &["txt", "md"];

/// Something that can produce the raw text for a topic.
pub trait DocumentSource {
    fn fetch(&self, topic: &str) -> Result<String>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn fetch(&self, topic: &str) -> Result<String> {
        (**self).fetch(topic)
    }
}

/// Canonical file stem for a topic: trimmed, spaces become underscores.
///
/// Topics that could escape the directory are rejected.
pub fn topic_stem(topic: &str) -> Result<String> {
    let stem = topic.trim().replace(' ', "_");
    if stem.is_empty()
        || stem.starts_with('.')
        || stem.contains(['/', '\\'])
        || stem.contains('\0')
    {
        return Err(Error::Retrieval {
            topic: topic.to_string(),
            reason: "invalid topic name".to_string(),
        });
    }
    Ok(stem)
}

/// Reads topics from `<root>/<topic>.txt` or `<root>/<topic>.md`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `topic`, if one exists.
    pub fn resolve(&self, topic: &str) -> Result<Option<PathBuf>> {
        let stem = topic_stem(topic)?;
        Ok(TOPIC_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{stem}.{ext}")))
            .find(|path| path.is_file()))
    }

    /// Topic names available in the directory, sorted.
    pub fn list_topics(&self) -> Result<Vec<String>> {
        let mut topics = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let has_topic_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| TOPIC_EXTENSIONS.contains(&e));
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && has_topic_ext
                && !stem.starts_with('.')
            {
                topics.push(stem.to_string());
            }
        }
        topics.sort();
        topics.dedup();
        Ok(topics)
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, topic: &str) -> Result<String> {
        let path = self.resolve(topic)?.ok_or_else(|| Error::Retrieval {
            topic: topic.to_string(),
            reason: format!("no topic file in {}", self.root.display()),
        })?;

        debug!(topic, path = %path.display(), "reading topic");
        std::fs::read_to_string(&path).map_err(|e| Error::Retrieval {
            topic: topic.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Topics held in memory, keyed by canonical topic stem.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        topic: &str,
        text: impl Into<String>,
    ) -> Result<&mut Self> {
        self.documents.insert(topic_stem(topic)?, text.into());
        Ok(self)
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, topic: &str) -> Result<String> {
        self.documents
            .get(&topic_stem(topic)?)
            .cloned()
            .ok_or_else(|| Error::Retrieval {
                topic: topic.to_string(),
                reason: "unknown topic".to_string(),
            })
    }
}
