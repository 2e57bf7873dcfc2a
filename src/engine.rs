//! Answering one query against one document.
//!
//! A call moves through `Segmenting -> Vectorizing -> Ranking` and keeps no
//! state afterwards; the vector space is rebuilt for every query.

use std::{fmt, path::Path};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    lemmatizer::Lemmatizer,
    normalizer::Normalizer,
    ranker,
    segmenter,
    stop_words::StopWords,
    vector_space::VectorSpaceBuilder,
};

/// Reply used when no sentence shares any term with the query.
pub const FALLBACK_RESPONSE: &str = "I'm sorry, I could not understand you.";

/// Normalizer and stop words used to build every vector space.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub normalizer: Normalizer,
    pub stop_words: StopWords,
}

impl EngineConfig {
    /// Load optional overrides: a stop-word list replacing the English one
    /// and a lemma file extending the English dictionary.
    pub fn load(
        stop_words_path: Option<&Path>,
        lemmas_path: Option<&Path>,
    ) -> Result<Self> {
        let stop_words = match stop_words_path {
            Some(path) => {
                debug!(path = %path.display(), "loading stop words");
                StopWords::load(path)?
            }
            None => StopWords::english(),
        };
        let lemmatizer = match lemmas_path {
            Some(path) => {
                debug!(path = %path.display(), "loading lemma dictionary");
                Lemmatizer::load(path)?
            }
            None => Lemmatizer::english(),
        };
        Ok(Self {
            normalizer: Normalizer::new(lemmatizer),
            stop_words,
        })
    }
}

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// A corpus sentence, verbatim.
    Answer {
        sentence: String,
        index: usize,
        score: f64,
    },
    /// No sentence was similar to the query.
    Fallback,
}

impl Response {
    /// Text to show the user.
    pub fn text(&self) -> &str {
        match self {
            Response::Answer { sentence, .. } => sentence,
            Response::Fallback => FALLBACK_RESPONSE,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Response::Fallback)
    }

    pub fn score(&self) -> f64 {
        match self {
            Response::Answer { score, .. } => *score,
            Response::Fallback => 0.0,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Retrieval-based responder.
///
/// Immutable after construction, so one engine can serve any number of
/// concurrent callers.
///
/// # Examples
///
/// ```
/// use docqa::engine::{ResponseEngine, FALLBACK_RESPONSE};
///
/// let engine = ResponseEngine::default();
/// let doc = "Cats are mammals. Dogs are mammals too. The sky is blue.";
///
/// assert_eq!(engine.respond(doc, "what are cats").unwrap(), "Cats are mammals.");
/// assert_eq!(engine.respond(doc, "purple elephants").unwrap(), FALLBACK_RESPONSE);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseEngine {
    builder: VectorSpaceBuilder,
}

impl ResponseEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            builder: VectorSpaceBuilder::new(
                config.normalizer,
                config.stop_words,
            ),
        }
    }

    pub fn builder(&self) -> &VectorSpaceBuilder {
        &self.builder
    }

    /// Find the sentence of `document_text` most similar to `user_query`.
    ///
    /// Fails with [`Error::NoContent`] if the document has no sentences.
    pub fn generate_response(
        &self,
        document_text: &str,
        user_query: &str,
    ) -> Result<Response> {
        debug!(query = user_query, "segmenting document");
        let mut sentences = segmenter::segment(document_text).sentences;
        if sentences.is_empty() {
            return Err(Error::NoContent);
        }

        let corpus_len = sentences.len();
        sentences.push(user_query.to_string());

        debug!(sentences = corpus_len, "building vector space");
        let space = self.builder.build(&sentences);
        debug!(terms = space.vocabulary().len(), "ranking sentences");

        let best = ranker::rank_excluding_query(space.vectors())
            .ok_or(Error::NoContent)?;

        if best.score == 0.0 {
            warn!(query = user_query, "no sentence matched the query");
            return Ok(Response::Fallback);
        }

        sentences.truncate(corpus_len);
        let sentence = sentences.swap_remove(best.index);
        debug!(index = best.index, score = best.score, "matched sentence");

        Ok(Response::Answer {
            sentence,
            index: best.index,
            score: best.score,
        })
    }

    /// Like [`generate_response`](Self::generate_response), rendered to text.
    pub fn respond(&self, document_text: &str, user_query: &str) -> Result<String> {
        Ok(self
            .generate_response(document_text, user_query)?
            .text()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIMALS: &str =
        "Cats are mammals. Dogs are mammals too. The sky is blue.";

    fn engine() -> ResponseEngine {
        ResponseEngine::default()
    }

    #[test]
    fn answers_with_best_sentence() {
        let response = engine().generate_response(ANIMALS, "what are cats").unwrap();
        match response {
            Response::Answer {
                sentence, index, ..
            } => {
                assert_eq!(sentence, "Cats are mammals.");
                assert_eq!(index, 0);
            }
            Response::Fallback => panic!("expected an answer"),
        }
    }

    #[test]
    fn falls_back_without_shared_terms() {
        let response = engine()
            .generate_response("Cats are mammals.", "purple elephants dance")
            .unwrap();
        assert_eq!(response, Response::Fallback);
        assert_eq!(response.text(), FALLBACK_RESPONSE);
        assert_eq!(response.score(), 0.0);
    }

    #[test]
    fn stop_word_only_query_falls_back() {
        let response = engine().generate_response(ANIMALS, "what is the").unwrap();
        assert!(response.is_fallback());
    }

    #[test]
    fn empty_query_falls_back() {
        assert!(engine().generate_response(ANIMALS, "").unwrap().is_fallback());
        assert!(engine().generate_response(ANIMALS, "?!").unwrap().is_fallback());
    }

    #[test]
    fn empty_document_is_an_error() {
        let err = engine().generate_response("", "what are cats").unwrap_err();
        assert!(matches!(err, Error::NoContent));
        let err = engine().generate_response("  [4]\n ", "cats").unwrap_err();
        assert!(matches!(err, Error::NoContent));
    }

    #[test]
    fn single_sentence_identical_to_query() {
        let response = engine()
            .generate_response("Cats are mammals.", "Cats are mammals.")
            .unwrap();
        assert_eq!(response.text(), "Cats are mammals.");
        assert!((response.score() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn exact_match_wins() {
        let doc = "Rust has ownership. Rust has borrowing and ownership rules. \
                   Go has garbage collection.";
        let response = engine()
            .generate_response(doc, "borrowing and ownership rules")
            .unwrap();
        assert_eq!(response.text(), "Rust has borrowing and ownership rules.");
    }

    #[test]
    fn answer_keeps_title_abbreviation() {
        let doc = "Dr. Smith arrived. He left at 5 p.m. today.";
        match engine().generate_response(doc, "smith").unwrap() {
            Response::Answer {
                sentence, index, ..
            } => {
                assert_eq!(sentence, "Dr. Smith arrived.");
                assert_eq!(index, 0);
            }
            Response::Fallback => panic!("expected an answer"),
        }
    }

    #[test]
    fn answer_keeps_original_text() {
        let doc = "The EIFFEL Tower[3] stands in PARIS! Rome has the Colosseum.";
        let response = engine().generate_response(doc, "eiffel").unwrap();
        assert_eq!(response.text(), "The EIFFEL Tower stands in PARIS!");
    }

    #[test]
    fn tie_picks_earliest_sentence() {
        let doc = "Owls hunt at night. Owls hunt at night. Bats fly.";
        match engine().generate_response(doc, "owls hunt").unwrap() {
            Response::Answer { index, .. } => assert_eq!(index, 0),
            Response::Fallback => panic!("expected an answer"),
        }
    }

    #[test]
    fn deterministic_across_calls() {
        let e = engine();
        let first = e.generate_response(ANIMALS, "mammals").unwrap();
        for _ in 0..5 {
            assert_eq!(e.generate_response(ANIMALS, "mammals").unwrap(), first);
        }
    }

    #[test]
    fn configured_stop_words_change_outcome() {
        let e = ResponseEngine::new(EngineConfig {
            normalizer: Normalizer::default(),
            stop_words: StopWords::from_words(["cat"]),
        });
        assert!(e.generate_response("Cats purr.", "cats").unwrap().is_fallback());
    }

    #[test]
    fn load_config_from_files() {
        let tmp = tempfile::tempdir().unwrap();
        let stop = tmp.path().join("stop_words.txt");
        let lemmas = tmp.path().join("lemmas.txt");
        std::fs::write(&stop, "the\n").unwrap();
        std::fs::write(&lemmas, "cacti cactus\n").unwrap();

        let config = EngineConfig::load(Some(stop.as_path()), Some(lemmas.as_path())).unwrap();
        assert_eq!(config.stop_words.len(), 1);
        assert_eq!(config.normalizer.normalize("cacti"), vec!["cactus"]);

        let e = ResponseEngine::new(config);
        let doc = "A cactus stores water. The fern needs shade.";
        assert_eq!(e.respond(doc, "cacti").unwrap(), "A cactus stores water.");
    }

    #[test]
    fn response_serializes_with_kind_tag() {
        let json = serde_json::to_value(Response::Fallback).unwrap();
        assert_eq!(json["kind"], "fallback");

        let answer = Response::Answer {
            sentence: "Cats are mammals.".into(),
            index: 0,
            score: 0.5,
        };
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["kind"], "answer");
        assert_eq!(json["sentence"], "Cats are mammals.");
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResponseEngine>();
    }
}
