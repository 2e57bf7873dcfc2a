//! Dictionary-form reduction for English words.
//!
//! Words are reduced to their noun base form: irregular plurals come from a
//! dictionary of exceptions, regular plurals are handled by suffix rules.
//! Reduction is idempotent for the built-in dictionary: a lemma is always
//! its own lemma.

use std::{collections::HashMap, path::Path};

use crate::error::{Error, Result};

/// Words shorter than this are never rewritten by suffix rules.
const MIN_RULE_LENGTH: usize = 4;

/// Irregular forms and their lemmas.
const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("calves", "calf"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Words ending in `s` that are already base forms.
const INVARIANT: &[&str] = &[
    "afterwards",
    "always",
    "news",
    "ourselves",
    "perhaps",
    "series",
    "species",
    "themselves",
    "thus",
    "whereas",
    "yourselves",
];

/// Endings that look plural but mark a singular word.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ics", "ous"];

/// Noun-form lemmatizer backed by an exception dictionary.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Lemmatizer {
    /// The built-in English dictionary.
    pub fn english() -> Self {
        let mut exceptions: HashMap<String, String> = IRREGULAR
            .iter()
            .map(|(word, lemma)| (word.to_string(), lemma.to_string()))
            .collect();
        for word in INVARIANT {
            exceptions.insert(word.to_string(), word.to_string());
        }
        Self { exceptions }
    }

    /// Add or override dictionary entries.
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (word, lemma) in entries {
            self.exceptions
                .insert(word.into().to_lowercase(), lemma.into().to_lowercase());
        }
        self
    }

    /// Extend the English dictionary with a `word lemma` file.
    ///
    /// One pair per line, separated by whitespace. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut entries = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(word), Some(lemma), None) => {
                    entries.push((word.to_string(), lemma.to_string()))
                }
                _ => {
                    return Err(Error::Config(format!(
                        "{}:{}: expected 'word lemma'",
                        path.display(),
                        line_no + 1
                    )));
                }
            }
        }

        Ok(Self::english().with_entries(entries))
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.exceptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty()
    }

    /// Reduce a lower-cased word to its base form.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }

        let Some(stem) = strip_plural(word) else {
            return word.to_string();
        };

        // A stripped form can itself be an irregular plural ("mices").
        match self.exceptions.get(&stem) {
            Some(lemma) => lemma.clone(),
            None => stem,
        }
    }
}

fn strip_plural(word: &str) -> Option<String> {
    if word.len() < MIN_RULE_LENGTH
        || !word.chars().all(|c| c.is_ascii_alphabetic())
        || !word.ends_with('s')
        || SINGULAR_ENDINGS.iter().any(|end| word.ends_with(end))
    {
        return None;
    }

    if let Some(stem) = word.strip_suffix("ies")
        && stem.len() >= 2
    {
        return Some(format!("{stem}y"));
    }

    for suffix in ["sses", "shes", "ches", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }

    Some(word[..word.len() - 1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals() {
        let lem = Lemmatizer::english();
        assert_eq!(lem.lemmatize("cats"), "cat");
        assert_eq!(lem.lemmatize("mammals"), "mammal");
        assert_eq!(lem.lemmatize("cities"), "city");
        assert_eq!(lem.lemmatize("classes"), "class");
        assert_eq!(lem.lemmatize("boxes"), "box");
        assert_eq!(lem.lemmatize("churches"), "church");
        assert_eq!(lem.lemmatize("dishes"), "dish");
        assert_eq!(lem.lemmatize("horses"), "horse");
    }

    #[test]
    fn irregular_plurals() {
        let lem = Lemmatizer::english();
        assert_eq!(lem.lemmatize("children"), "child");
        assert_eq!(lem.lemmatize("mice"), "mouse");
        assert_eq!(lem.lemmatize("wolves"), "wolf");
        assert_eq!(lem.lemmatize("people"), "person");
    }

    #[test]
    fn singular_words_are_unchanged() {
        let lem = Lemmatizer::english();
        for word in [
            "glass", "bus", "analysis", "physics", "famous", "series", "news",
            "running", "is", "was", "its", "thus",
        ] {
            assert_eq!(lem.lemmatize(word), word, "{word}");
        }
    }

    #[test]
    fn non_alphabetic_words_are_unchanged() {
        let lem = Lemmatizer::english();
        assert_eq!(lem.lemmatize("1990s"), "1990s");
        assert_eq!(lem.lemmatize("cafés"), "cafés");
    }

    #[test]
    fn lemmas_are_fixed_points() {
        let lem = Lemmatizer::english();
        let words = IRREGULAR
            .iter()
            .flat_map(|(w, l)| [*w, *l])
            .chain(INVARIANT.iter().copied())
            .chain(["cats", "cities", "classes", "boxes", "mices", "buses"]);
        for word in words {
            let once = lem.lemmatize(word);
            assert_eq!(lem.lemmatize(&once), once, "{word}");
        }
    }

    #[test]
    fn custom_entries_override() {
        let lem = Lemmatizer::english().with_entries([("Geese", "gander")]);
        assert_eq!(lem.lemmatize("geese"), "gander");
    }

    #[test]
    fn load_extends_dictionary() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("lemmas.txt");
        std::fs::write(&path, "# extra forms\ncacti cactus\n\nfungi fungus\n")
            .unwrap();

        let lem = Lemmatizer::load(&path).unwrap();
        assert_eq!(lem.lemmatize("cacti"), "cactus");
        assert_eq!(lem.lemmatize("fungi"), "fungus");
        assert_eq!(lem.lemmatize("children"), "child");
    }

    #[test]
    fn load_rejects_malformed_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("lemmas.txt");
        std::fs::write(&path, "cacti cactus extra\n").unwrap();

        let err = Lemmatizer::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains(":1:")));
    }
}
