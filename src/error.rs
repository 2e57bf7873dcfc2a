use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no extractable sentences")]
    NoContent,

    #[error("could not retrieve topic '{topic}': {reason}")]
    Retrieval { topic: String, reason: String },

    #[error("chat transport error: {0}")]
    Transport(#[source] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("data directory does not exist and could not be created: {0}")]
    DataDir(PathBuf),
}
