//! The growing category lexicon.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free, append-only list of category members.
///
/// Order is seed order followed by promotion order. Words are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    words: IndexSet<String>,
}

impl Lexicon {
    /// Build a lexicon from seed words. Repeated seeds keep their first position.
    pub fn from_seeds<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: seeds.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Append `word`; returns `false` (and leaves the lexicon untouched) if it is already present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of lexicon words present in `head_nouns` (the `semfreq` count).
    pub fn count_present<'a, I>(&self, head_nouns: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        head_nouns
            .into_iter()
            .filter(|noun| self.words.contains(noun.as_str()))
            .count()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_deduplicated_in_first_occurrence_order() {
        let lex = Lexicon::from_seeds(["dog", "cat", "dog", "eel"]);
        assert_eq!(lex.to_vec(), vec!["dog", "cat", "eel"]);
    }

    #[test]
    fn insert_is_append_only() {
        let mut lex = Lexicon::from_seeds(["dog"]);
        assert!(lex.insert("fox"));
        assert!(!lex.insert("dog"));
        assert_eq!(lex.to_vec(), vec!["dog", "fox"]);
    }

    #[test]
    fn count_present_ignores_unknown_words() {
        let lex = Lexicon::from_seeds(["dog", "cat"]);
        let nouns: Vec<String> = ["dog", "fox", "cat", "owl"].iter().map(|s| s.to_string()).collect();
        assert_eq!(lex.count_present(&nouns), 2);
        assert_eq!(Lexicon::default().count_present(&nouns), 0);
    }
}
