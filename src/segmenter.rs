//! Splitting raw document text into sentences and words.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Bracketed numeric citation markers such as `[12]`.
static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9]+\]").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Abbreviations that precede a name or number rather than end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "capt", "cf", "col", "dr", "e.g", "fig", "gen", "i.e", "jr", "lt", "mr",
    "mrs", "ms", "mt", "prof", "rev", "sgt", "sr", "st", "vs",
];

/// A document split into retrieval units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    /// Sentences in document order, original casing preserved.
    pub sentences: Vec<String>,
    /// Word tokens in document order.
    pub words: Vec<String>,
}

/// Strip citation markers and collapse whitespace runs to a single space.
pub fn clean(raw_text: &str) -> String {
    let without_citations = CITATION.replace_all(raw_text, " ");
    WHITESPACE
        .replace_all(&without_citations, " ")
        .trim()
        .to_string()
}

/// Segment a document into sentences and words.
///
/// Sentence and word boundaries follow Unicode UAX #29. UAX #29 breaks
/// after any full stop followed by a capital, so a fragment ending in a
/// title abbreviation ("Dr.", "Mrs.") or a single-letter initial is joined
/// to the sentence that follows it. Other abbreviations before a capital
/// ("etc.", "a.m.") are still treated as sentence ends. Fragments with no
/// alphanumeric content are not sentences, so empty or whitespace-only
/// input yields no sentences at all.
///
/// # Examples
///
/// ```
/// use docqa::segmenter::segment;
///
/// let doc = segment("Cats purr.[1] Dogs   bark.");
/// assert_eq!(doc.sentences, vec!["Cats purr.", "Dogs bark."]);
/// assert_eq!(doc.words, vec!["Cats", "purr", "Dogs", "bark"]);
/// ```
pub fn segment(raw_text: &str) -> Segmented {
    let text = clean(raw_text);

    let mut sentences = Vec::new();
    let mut pending: Option<String> = None;

    for fragment in text.unicode_sentences().map(str::trim) {
        if fragment.is_empty() {
            continue;
        }
        let sentence = match pending.take() {
            Some(head) => format!("{head} {fragment}"),
            None => fragment.to_string(),
        };
        if ends_with_abbreviation(&sentence) {
            pending = Some(sentence);
        } else {
            sentences.push(sentence);
        }
    }
    sentences.extend(pending);

    let words = text.unicode_words().map(str::to_string).collect();

    Segmented { sentences, words }
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    let last = sentence.rsplit(' ').next().unwrap_or(sentence);
    let Some(word) = last.strip_suffix('.') else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = word.chars();
    if let (Some(initial), None) = (chars.next(), chars.next()) {
        return initial.is_uppercase();
    }

    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}
