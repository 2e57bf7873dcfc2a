use unicode_segmentation::UnicodeSegmentation;

use crate::lemmatizer::Lemmatizer;

/// Typographic punctuation outside the ASCII range that is stripped along
/// with ASCII punctuation.
const EXTRA_PUNCTUATION: &[char] = &[
    '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2013}', '\u{2014}',
    '\u{2026}', '\u{00AB}', '\u{00BB}', '\u{00BF}', '\u{00A1}',
];

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

/// Maps text to lemmatized, punctuation-free, lower-cased tokens.
///
/// The same normalizer is applied to every corpus sentence and to the
/// query, so their tokens are directly comparable.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    lemmatizer: Lemmatizer,
}

impl Normalizer {
    pub fn new(lemmatizer: Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    /// Lower-case, delete punctuation, split into words, then lemmatize.
    ///
    /// # Examples
    ///
    /// ```
    /// use docqa::normalizer::Normalizer;
    ///
    /// let tokens = Normalizer::default().normalize("Cats aren't mammals?!");
    /// assert_eq!(tokens, vec!["cat", "arent", "mammal"]);
    /// ```
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let stripped: String = text
            .to_lowercase()
            .chars()
            .filter(|&c| !is_punctuation(c))
            .collect();

        stripped
            .unicode_words()
            .map(|word| self.lemmatizer.lemmatize(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn lowercases_and_lemmatizes() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("What are CATS"), vec!["what", "are", "cat"]);
    }

    #[test]
    fn punctuation_is_deleted_not_replaced() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("don't"), vec!["dont"]);
        assert_eq!(n.normalize("e-mail"), vec!["email"]);
        assert_eq!(n.normalize("\u{201C}quoted\u{201D}"), vec!["quoted"]);
    }

    #[test]
    fn empty_and_punctuation_only_text() {
        let n = Normalizer::default();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("?! ... --").is_empty());
    }

    #[test]
    fn uses_configured_lemmatizer() {
        let n = Normalizer::new(
            Lemmatizer::english().with_entries([("cacti", "cactus")]),
        );
        assert_eq!(n.normalize("Cacti bloom"), vec!["cactus", "bloom"]);
    }

    #[test]
    fn non_ascii_and_digits_survive() {
        let n = Normalizer::default();
        assert_eq!(
            n.normalize("Caf\u{00E9}s \u{2014} 1990s\u{2026} \u{00AB}Stra\u{00DF}e\u{00BB}"),
            vec!["caf\u{00E9}s", "1990s", "stra\u{00DF}e"]
        );
    }

    #[test]
    fn deterministic() {
        let n = Normalizer::default();
        let text = "The children's toys were scattered across 3 rooms.";
        assert_eq!(n.normalize(text), n.normalize(text));
    }

    proptest! {
        #[test]
        fn normalizing_tokens_is_idempotent(
            words in prop::collection::vec(
                "[\"'(\u{201C}\u{2018}\u{00AB}]?\
                 [A-Za-z0-9\u{00E9}\u{00FC}\u{00DF}\u{00C6}\u{00F8}]{1,12}\
                 ([-\u{2013}\u{2014}][a-z]{1,6})?\
                 [.,!?;:'\u{2019}\u{201D}\u{00BB}\u{2026}]?",
                0..12,
            )
        ) {
            let n = Normalizer::default();
            let tokens = n.normalize(&words.join(" "));
            let again = n.normalize(&tokens.join(" "));
            prop_assert_eq!(again, tokens);
        }
    }
}
