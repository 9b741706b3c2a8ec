//! Pattern table: pattern id → head nouns observed filling that pattern.
//!
//! Built once from context records and never mutated by the bootstrapping loop. Scores are
//! not stored here; see [`crate::scoring::PatternScores`].

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Stable position of a pattern in its [`PatternTable`] (insertion order).
pub type PatternIndex = usize;

/// The head nouns observed with one pattern, lowercase and in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternContext {
    head_nouns: IndexSet<String>,
}

impl PatternContext {
    pub fn head_nouns(&self) -> &IndexSet<String> {
        &self.head_nouns
    }

    pub fn contains(&self, noun: &str) -> bool {
        self.head_nouns.contains(noun)
    }

    /// `totalfreq`: number of distinct head nouns.
    pub fn total_frequency(&self) -> usize {
        self.head_nouns.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    patterns: IndexMap<String, PatternContext>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `head_noun` was observed with `pattern`. The noun is lowercased; repeats
    /// are ignored. Returns whether the noun was new for this pattern.
    pub fn insert_occurrence(&mut self, pattern: &str, head_noun: &str) -> bool {
        self.patterns
            .entry(pattern.to_string())
            .or_default()
            .head_nouns
            .insert(head_noun.to_lowercase())
    }

    pub fn get(&self, pattern: &str) -> Option<&PatternContext> {
        self.patterns.get(pattern)
    }

    pub fn get_index(&self, index: PatternIndex) -> Option<(&str, &PatternContext)> {
        self.patterns
            .get_index(index)
            .map(|(id, ctx)| (id.as_str(), ctx))
    }

    pub fn index_of(&self, pattern: &str) -> Option<PatternIndex> {
        self.patterns.get_index_of(pattern)
    }

    /// Number of distinct pattern ids.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatternContext)> {
        self.patterns.iter().map(|(id, ctx)| (id.as_str(), ctx))
    }

    /// Distinct head nouns across all patterns.
    pub fn distinct_head_nouns(&self) -> usize {
        self.patterns
            .values()
            .flat_map(|ctx| ctx.head_nouns.iter())
            .collect::<IndexSet<_>>()
            .len()
    }
}

impl<P, N> FromIterator<(P, N)> for PatternTable
where
    P: AsRef<str>,
    N: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (P, N)>>(iter: T) -> Self {
        let mut table = PatternTable::new();
        for (pattern, noun) in iter {
            table.insert_occurrence(pattern.as_ref(), noun.as_ref());
        }
        table
    }
}
