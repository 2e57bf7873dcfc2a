//! docqa - answer questions by retrieving the most similar sentence from a
//! reference document.
//!
//! A document is split into sentences, every sentence and the query are
//! turned into TF-IDF vectors over a shared vocabulary of lemmatized,
//! non-stop-word tokens, and the sentence with the highest cosine
//! similarity to the query is returned verbatim. When nothing overlaps the
//! engine answers with a fixed fallback string.
//!
//! # Quick start
//!
//! ```
//! use docqa::{EngineConfig, Response, ResponseEngine};
//!
//! let engine = ResponseEngine::new(EngineConfig::default());
//! let doc = "Cats are mammals. Dogs are mammals too. The sky is blue.";
//!
//! match engine.generate_response(doc, "what are cats").unwrap() {
//!     Response::Answer { sentence, score, .. } => {
//!         assert_eq!(sentence, "Cats are mammals.");
//!         assert!(score > 0.0);
//!     }
//!     Response::Fallback => unreachable!(),
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod data_dir;
pub mod engine;
pub mod error;
pub mod lemmatizer;
pub mod normalizer;
pub mod ranker;
pub mod segmenter;
pub mod session;
pub mod source;
pub mod stop_words;
pub mod vector_space;

pub use chat::ChatFrontEnd;
pub use data_dir::DataDir;
pub use engine::{EngineConfig, FALLBACK_RESPONSE, Response, ResponseEngine};
pub use error::{Error, Result};
pub use normalizer::Normalizer;
pub use session::SessionStore;
pub use source::{DirectorySource, DocumentSource, MemorySource};
pub use stop_words::StopWords;
