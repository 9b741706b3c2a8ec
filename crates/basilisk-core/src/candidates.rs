//! Candidate words: extraction from the pool, AvgLog scoring, and promotion.

use indexmap::IndexMap;

use crate::error::{BootstrapError, Result};
use crate::lexicon::Lexicon;
use crate::patterns::{PatternIndex, PatternTable};
use crate::pool::PatternPool;
use crate::ranking::{rank_descending, PlateauRule, Ranked};
use crate::scoring::avg_log;

/// Candidate word → every pattern (pooled or not) whose head nouns contain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    members: IndexMap<String, Vec<PatternIndex>>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains_key(word)
    }

    /// Patterns recorded for `word`, in pattern table order.
    pub fn patterns_of(&self, word: &str) -> Option<&[PatternIndex]> {
        self.members.get(word).map(Vec::as_slice)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Register `word` with an empty membership list (no-op if already present).
    pub fn register(&mut self, word: &str) {
        if !self.members.contains_key(word) {
            self.members.insert(word.to_string(), Vec::new());
        }
    }

    /// Fill membership lists from the whole pattern table, replacing earlier contents.
    pub fn collect_memberships(&mut self, table: &PatternTable) {
        for patterns in self.members.values_mut() {
            patterns.clear();
        }
        for (index, (_, ctx)) in table.iter().enumerate() {
            for noun in ctx.head_nouns() {
                if let Some(patterns) = self.members.get_mut(noun.as_str()) {
                    patterns.push(index);
                }
            }
        }
    }
}

/// Every head noun of every pooled pattern, including words already in the lexicon.
///
/// Order is pool rank order, then head-noun insertion order; memberships start empty.
pub fn extract_candidates(pool: &PatternPool, table: &PatternTable) -> CandidateSet {
    let mut candidates = CandidateSet::default();
    for entry in pool.entries() {
        if let Some((_, ctx)) = table.get_index(entry.index) {
            for noun in ctx.head_nouns() {
                candidates.register(noun);
            }
        }
    }
    candidates
}

/// Candidate word → AvgLog score.
pub type ScoreTable = IndexMap<String, f64>;

/// AvgLog over each candidate's patterns, with lexicon frequencies counted fresh.
///
/// Memberships must already be collected; a candidate with none is an
/// [`BootstrapError::InvalidState`].
pub fn score_candidates(
    candidates: &CandidateSet,
    table: &PatternTable,
    lexicon: &Lexicon,
) -> Result<ScoreTable> {
    let mut scores = ScoreTable::with_capacity(candidates.len());
    for (word, patterns) in &candidates.members {
        let frequencies: Vec<usize> = patterns
            .iter()
            .filter_map(|index| table.get_index(*index))
            .map(|(_, ctx)| lexicon.count_present(ctx.head_nouns()))
            .collect();
        let score = avg_log(&frequencies).ok_or_else(|| {
            BootstrapError::InvalidState(format!(
                "candidate `{}` has no associated pattern",
                word
            ))
        })?;
        scores.insert(word.clone(), score);
    }
    Ok(scores)
}

/// Promote the plateau-rule prefix of new candidates into `lexicon`.
///
/// Candidates already in the lexicon are skipped before the window is counted. Returns the
/// promoted words with their scores, in promotion order (score desc, word asc).
pub fn promote_candidates(
    scores: &ScoreTable,
    lexicon: &mut Lexicon,
    rule: PlateauRule,
) -> Vec<Ranked<String>> {
    let ranked = rank_descending(
        scores
            .iter()
            .filter(|(word, _)| !lexicon.contains(word))
            .map(|(word, score)| (word.clone(), *score)),
    );
    let promoted = rule.select(ranked);
    for entry in &promoted {
        lexicon.insert(entry.key.clone());
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::select_pattern_pool;
    use crate::ranking::{POOL_WINDOW, PROMOTION_WINDOW};
    use crate::scoring::score_patterns;
    use approx::assert_relative_eq;

    fn sample_table() -> PatternTable {
        [
            ("chased_<dobj>", "dog"),
            ("chased_<dobj>", "cat"),
            ("chased_<dobj>", "fox"),
            ("<subj>_barked", "dog"),
            ("<subj>_barked", "fox"),
            ("drove_<dobj>", "car"),
            ("drove_<dobj>", "fox"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn extraction_includes_lexicon_words_once() {
        let table = sample_table();
        let lexicon = Lexicon::from_seeds(["dog", "cat"]);
        let scores = score_patterns(&table, &lexicon);
        let pool = select_pattern_pool(&table, &scores, PlateauRule::pattern_pool(POOL_WINDOW));
        assert_eq!(pool.len(), 1);

        let candidates = extract_candidates(&pool, &table);
        assert_eq!(candidates.words().collect::<Vec<_>>(), vec!["dog", "cat", "fox"]);
        assert_eq!(candidates.patterns_of("fox"), Some(&[][..]));
    }

    #[test]
    fn candidate_scores_use_all_patterns() {
        let table = sample_table();
        let lexicon = Lexicon::from_seeds(["dog", "cat"]);
        let mut candidates = CandidateSet::default();
        candidates.register("fox");
        candidates.collect_memberships(&table);
        assert_eq!(candidates.patterns_of("fox"), Some(&[0, 1, 2][..]));

        let scores = score_candidates(&candidates, &table, &lexicon).unwrap();
        // frequencies 2, 1, 0 → (log2 3 + 1 + 0) / 3
        assert_relative_eq!(scores["fox"], (3f64.log2() + 1.0) / 3.0);
    }

    #[test]
    fn candidate_without_patterns_is_invalid_state() {
        let table = sample_table();
        let mut candidates = CandidateSet::default();
        candidates.register("zebra");
        candidates.collect_memberships(&table);
        let err = score_candidates(&candidates, &table, &Lexicon::default()).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidState(_)));
    }

    #[test]
    fn promotion_skips_lexicon_words_before_counting() {
        let mut scores = ScoreTable::new();
        for (word, score) in [
            ("dog", 10.0),
            ("a", 9.0),
            ("b", 8.0),
            ("c", 7.0),
            ("d", 6.0),
            ("e", 6.0),
            ("f", 6.0),
            ("g", 5.0),
        ] {
            scores.insert(word.to_string(), score);
        }
        let mut lexicon = Lexicon::from_seeds(["dog"]);
        let promoted = promote_candidates(&scores, &mut lexicon, PlateauRule::promotion(PROMOTION_WINDOW));

        let words: Vec<&str> = promoted.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(lexicon.to_vec(), vec!["dog", "a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn fewer_than_window_promotes_all_new_words() {
        let mut scores = ScoreTable::new();
        scores.insert("cat".to_string(), 1.0);
        scores.insert("fox".to_string(), 0.5);
        scores.insert("owl".to_string(), 0.0);
        let mut lexicon = Lexicon::from_seeds(["cat"]);
        let promoted = promote_candidates(&scores, &mut lexicon, PlateauRule::promotion(PROMOTION_WINDOW));
        assert_eq!(promoted.len(), 2);
        assert_eq!(lexicon.len(), 3);
    }
}
