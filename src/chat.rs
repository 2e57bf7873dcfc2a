//! Line-oriented chat front end.
//!
//! Each input line is either a command or a query. Commands:
//!
//! - `/hello` greets the user
//! - `/change_topic <topic>` (or `/topic <topic>`) switches the user's topic
//! - `/cancel` says goodbye and ends the conversation
//! - `stop` ends the conversation without a reply
//!
//! Anything else is answered from the user's current topic.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::{
    engine::ResponseEngine,
    error::{Error, Result},
    session::SessionStore,
    source::DocumentSource,
};

/// Input that ends the conversation silently.
pub const STOP_COMMAND: &str = "stop";

/// What the front end sends back for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send this text and keep going.
    Text(String),
    /// Nothing to send.
    Ignore,
    /// End the conversation, optionally with a parting message.
    Quit(Option<String>),
}

/// Relays user text between a transport and the response engine.
pub struct ChatFrontEnd<S> {
    engine: ResponseEngine,
    source: S,
    sessions: SessionStore,
    prompt: Option<String>,
}

impl<S: DocumentSource> ChatFrontEnd<S> {
    pub fn new(engine: ResponseEngine, source: S, sessions: SessionStore) -> Self {
        Self {
            engine,
            source,
            sessions,
            prompt: None,
        }
    }

    /// Prompt written before reading each line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one line from `user`.
    ///
    /// Retrieval failures and empty topics are reported to the user as text;
    /// other errors are returned.
    pub fn handle_line(&mut self, user: &str, line: &str) -> Result<Reply> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Reply::Ignore);
        }
        if line == STOP_COMMAND {
            return Ok(Reply::Quit(None));
        }

        if let Some(command) = line.strip_prefix('/') {
            let (name, arg) = command
                .split_once(char::is_whitespace)
                .map(|(n, a)| (n, a.trim()))
                .unwrap_or((command, ""));
            return self.handle_command(user, name, arg);
        }

        self.answer(user, line)
    }

    fn handle_command(
        &mut self,
        user: &str,
        name: &str,
        arg: &str,
    ) -> Result<Reply> {
        debug!(user, command = name, "chat command");
        match name {
            "hello" => Ok(Reply::Text(format!("Hello {user}"))),
            "cancel" => Ok(Reply::Quit(Some("Good bye".to_string()))),
            "change_topic" | "topic" if arg.is_empty() => Ok(Reply::Text(
                "Usage: /change_topic <topic>".to_string(),
            )),
            "change_topic" | "topic" => {
                match self.sessions.change_topic(user, arg, &self.source) {
                    Ok(_) => Ok(Reply::Text(format!(
                        "Topic has been changed to '{arg}'"
                    ))),
                    Err(e @ Error::Retrieval { .. }) => {
                        warn!(user, topic = arg, error = %e, "topic change failed");
                        Ok(Reply::Text(format!("Could not change topic: {e}")))
                    }
                    Err(e) => Err(e),
                }
            }
            other => Ok(Reply::Text(format!("Unknown command: /{other}"))),
        }
    }

    fn answer(&mut self, user: &str, query: &str) -> Result<Reply> {
        let session = match self.sessions.get_or_create(user, &self.source) {
            Ok(session) => session,
            Err(e @ Error::Retrieval { .. }) => {
                warn!(user, error = %e, "no document for session");
                return Ok(Reply::Text(format!("Could not load topic: {e}")));
            }
            Err(e) => return Err(e),
        };

        match self.engine.generate_response(&session.document, query) {
            Ok(response) => Ok(Reply::Text(response.text().to_string())),
            Err(Error::NoContent) => {
                warn!(user, topic = %session.topic, "topic has no sentences");
                Ok(Reply::Text(format!(
                    "The topic '{}' has no readable sentences.",
                    session.topic
                )))
            }
            Err(e) => Err(e),
        }
    }

    /// Serve `user` until input ends, `stop`, or `/cancel`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        user: &str,
        mut input: R,
        mut output: W,
    ) -> Result<()> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                output.write_all(prompt.as_bytes()).map_err(Error::Transport)?;
                output.flush().map_err(Error::Transport)?;
            }

            line.clear();
            if input.read_line(&mut line).map_err(Error::Transport)? == 0 {
                return Ok(());
            }

            match self.handle_line(user, &line)? {
                Reply::Text(text) => write_line(&mut output, &text)?,
                Reply::Ignore => {}
                Reply::Quit(message) => {
                    if let Some(text) = message {
                        write_line(&mut output, &text)?;
                    }
                    return Ok(());
                }
            }
        }
    }
}

fn write_line<W: Write>(output: &mut W, text: &str) -> Result<()> {
    writeln!(output, "{text}").map_err(Error::Transport)?;
    output.flush().map_err(Error::Transport)
}
