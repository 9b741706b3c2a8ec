//! Pattern pool: the per-iteration top-ranked patterns used as evidence.

use serde::{Deserialize, Serialize};

use crate::patterns::{PatternIndex, PatternTable};
use crate::ranking::{rank_descending, PlateauRule};
use crate::scoring::PatternScores;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Position of the pattern in the pattern table.
    pub index: PatternIndex,
    pub pattern: String,
    pub score: f64,
}

/// Patterns selected this iteration, in rank order (score desc, pattern id asc).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternPool {
    entries: Vec<PoolEntry>,
}

impl PatternPool {
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.iter().any(|e| e.pattern == pattern)
    }

    pub fn into_entries(self) -> Vec<PoolEntry> {
        self.entries
    }
}

/// Rank every pattern by its score and keep the plateau-rule prefix.
pub fn select_pattern_pool(
    table: &PatternTable,
    scores: &PatternScores,
    rule: PlateauRule,
) -> PatternPool {
    let ranked = rank_descending(table.iter().enumerate().map(|(index, (id, _))| {
        let score = scores.get(index).unwrap_or(0.0);
        ((id, index), score)
    }));

    let entries = rule
        .select(ranked)
        .into_iter()
        .map(|r| PoolEntry {
            index: r.key.1,
            pattern: r.key.0.to_string(),
            score: r.score,
        })
        .collect();
    PatternPool { entries }
}
