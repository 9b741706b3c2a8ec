//! Scoring math: RlogF for patterns, AvgLog for candidate words.
//!
//! Pattern scores are an explicit per-iteration value ([`PatternScores`]) rather than state
//! stored on the patterns, so every iteration starts from zero and recomputes against the
//! current lexicon.

use crate::lexicon::Lexicon;
use crate::patterns::{PatternIndex, PatternTable};

/// Relative log frequency: `(semfreq / totalfreq) * log2(semfreq)`.
///
/// Callers only pass `semfreq >= 1`; with `semfreq == 1` the score is exactly zero.
pub fn rlogf(semfreq: usize, totalfreq: usize) -> f64 {
    debug_assert!((1..=totalfreq).contains(&semfreq));
    (semfreq as f64 / totalfreq as f64) * (semfreq as f64).log2()
}

/// Mean of `log2(f + 1)` over per-pattern lexicon frequencies; `None` for an empty slice.
pub fn avg_log(frequencies: &[usize]) -> Option<f64> {
    if frequencies.is_empty() {
        return None;
    }
    let total: f64 = frequencies.iter().map(|f| (*f as f64 + 1.0).log2()).sum();
    Some(total / frequencies.len() as f64)
}

/// Scores for every pattern in a [`PatternTable`], indexed by [`PatternIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct PatternScores {
    scores: Vec<f64>,
}

impl PatternScores {
    pub fn get(&self, index: PatternIndex) -> Option<f64> {
        self.scores.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternIndex, f64)> + '_ {
        self.scores.iter().copied().enumerate()
    }

    /// Patterns with a strictly positive score.
    pub fn positive_count(&self) -> usize {
        self.scores.iter().filter(|s| **s > 0.0).count()
    }
}

/// Score every pattern against the current lexicon.
///
/// Patterns sharing no word with the lexicon keep a score of `0.0`.
pub fn score_patterns(table: &PatternTable, lexicon: &Lexicon) -> PatternScores {
    let scores = table
        .iter()
        .map(|(_, ctx)| {
            let semfreq = lexicon.count_present(ctx.head_nouns());
            if semfreq == 0 {
                0.0
            } else {
                rlogf(semfreq, ctx.total_frequency())
            }
        })
        .collect();
    PatternScores { scores }
}
