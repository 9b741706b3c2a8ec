//! Tie-aware top-K selection ("plateau rule").
//!
//! Both the pattern pool and word promotion walk a descending ranking, always keep the first
//! `window` entries, then keep going only while entries tie with the `window`-th score. The
//! ranking itself is total: score descending (`f64::total_cmp`), then key ascending, so the
//! same inputs always produce the same order.
//!
//! Boundary behavior:
//! - fewer than `window` entries: every entry is selected (subject to the zero stop);
//! - all-equal scores: everything ties with the boundary, so everything is selected;
//! - `stop_at_zero`: the walk ends at the first exact `0.0`, even inside the window;
//! - `window == 0`: nothing is selected.

use serde::{Deserialize, Serialize};

/// Default pattern pool window.
pub const POOL_WINDOW: usize = 10;
/// Default promotion window.
pub const PROMOTION_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<K> {
    pub key: K,
    pub score: f64,
}

impl<K> Ranked<K> {
    pub fn new(key: K, score: f64) -> Self {
        Self { key, score }
    }
}

/// Sort `(key, score)` pairs by score descending, ties broken by key ascending.
pub fn rank_descending<K, I>(items: I) -> Vec<Ranked<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut ranked: Vec<Ranked<K>> = items
        .into_iter()
        .map(|(key, score)| Ranked { key, score })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)));
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateauRule {
    pub window: usize,
    pub stop_at_zero: bool,
}

impl PlateauRule {
    /// Pattern pool selection: zero-scored patterns never enter the pool.
    pub const fn pattern_pool(window: usize) -> Self {
        Self {
            window,
            stop_at_zero: true,
        }
    }

    /// Word promotion over new (non-lexicon) candidates.
    pub const fn promotion(window: usize) -> Self {
        Self {
            window,
            stop_at_zero: false,
        }
    }

    /// Select a prefix of `ranked` (already in descending order) according to the rule.
    pub fn select<K, I>(&self, ranked: I) -> Vec<Ranked<K>>
    where
        I: IntoIterator<Item = Ranked<K>>,
    {
        let mut selected: Vec<Ranked<K>> = Vec::new();
        if self.window == 0 {
            return selected;
        }

        for entry in ranked {
            if selected.len() >= self.window {
                let boundary = selected[self.window - 1].score;
                if entry.score != boundary {
                    break;
                }
            }
            if self.stop_at_zero && entry.score == 0.0 {
                break;
            }
            selected.push(entry);
        }
        selected
    }
}
