//! The mutual bootstrapping loop.
//!
//! One iteration walks the phases in a fixed order:
//!
//! ```text
//! ScoringPatterns → SelectingPool → ExtractingCandidates → ScoringCandidates → PromotingWords
//! ```
//!
//! and either loops back or ends in `Done` once the configured number of iterations has run.
//! Only the lexicon survives between iterations; pattern scores, the pool and the candidate
//! tables are rebuilt from scratch each time.

use serde::{Deserialize, Serialize};

use crate::candidates::{extract_candidates, promote_candidates, score_candidates};
use crate::error::{BootstrapError, Result};
use crate::lexicon::Lexicon;
use crate::options::BootstrapOptionsV1;
use crate::patterns::PatternTable;
use crate::pool::{select_pattern_pool, PoolEntry};
use crate::ranking::PlateauRule;
use crate::scoring::score_patterns;
use crate::trace::TraceReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPhase {
    ScoringPatterns,
    SelectingPool,
    ExtractingCandidates,
    ScoringCandidates,
    PromotingWords,
    Done,
}

impl std::fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BootstrapPhase::ScoringPatterns => "scoring_patterns",
            BootstrapPhase::SelectingPool => "selecting_pool",
            BootstrapPhase::ExtractingCandidates => "extracting_candidates",
            BootstrapPhase::ScoringCandidates => "scoring_candidates",
            BootstrapPhase::PromotingWords => "promoting_words",
            BootstrapPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// A promoted word and the AvgLog score it was promoted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWordV1 {
    pub word: String,
    pub score: f64,
}

/// What one iteration produced, handed to the trace reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationSnapshotV1 {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Pooled patterns, score desc then id asc.
    pub pool: Vec<PoolEntry>,
    /// Promoted words, score desc then word asc.
    pub new_words: Vec<NewWordV1>,
    pub lexicon_size: usize,
}

/// Owns the pattern table and the lexicon for one run.
#[derive(Debug, Clone)]
pub struct BootstrapEngine {
    seeds: Vec<String>,
    patterns: PatternTable,
    lexicon: Lexicon,
    options: BootstrapOptionsV1,
    completed: usize,
    phase: BootstrapPhase,
}

impl BootstrapEngine {
    pub fn new<I, S>(seeds: I, patterns: PatternTable, options: BootstrapOptionsV1) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lexicon = Lexicon::from_seeds(seeds);
        let phase = if options.iterations == 0 {
            BootstrapPhase::Done
        } else {
            BootstrapPhase::ScoringPatterns
        };
        Self {
            seeds: lexicon.to_vec(),
            patterns,
            lexicon,
            options,
            completed: 0,
            phase,
        }
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn options(&self) -> &BootstrapOptionsV1 {
        &self.options
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    pub fn iterations_completed(&self) -> usize {
        self.completed
    }

    pub fn is_done(&self) -> bool {
        self.phase == BootstrapPhase::Done
    }

    pub fn into_lexicon(self) -> Lexicon {
        self.lexicon
    }

    fn enter(&mut self, phase: BootstrapPhase) {
        tracing::trace!(iteration = self.completed + 1, %phase, "entering phase");
        self.phase = phase;
    }

    /// Run one full iteration.
    pub fn step(&mut self) -> Result<IterationSnapshotV1> {
        if self.is_done() {
            return Err(BootstrapError::InvalidState(format!(
                "bootstrapping already finished after {} iteration(s)",
                self.completed
            )));
        }
        let iteration = self.completed + 1;

        self.enter(BootstrapPhase::ScoringPatterns);
        let scores = score_patterns(&self.patterns, &self.lexicon);
        tracing::debug!(
            iteration,
            patterns = scores.len(),
            positive = scores.positive_count(),
            "scored patterns"
        );

        self.enter(BootstrapPhase::SelectingPool);
        let pool = select_pattern_pool(
            &self.patterns,
            &scores,
            PlateauRule::pattern_pool(self.options.pool_window),
        );
        tracing::debug!(iteration, pool = pool.len(), "selected pattern pool");

        self.enter(BootstrapPhase::ExtractingCandidates);
        let mut candidates = extract_candidates(&pool, &self.patterns);
        tracing::debug!(iteration, candidates = candidates.len(), "extracted candidates");

        self.enter(BootstrapPhase::ScoringCandidates);
        candidates.collect_memberships(&self.patterns);
        let candidate_scores = score_candidates(&candidates, &self.patterns, &self.lexicon)?;

        self.enter(BootstrapPhase::PromotingWords);
        let promoted = promote_candidates(
            &candidate_scores,
            &mut self.lexicon,
            PlateauRule::promotion(self.options.promotion_window),
        );

        self.completed = iteration;
        self.phase = if self.completed >= self.options.iterations {
            BootstrapPhase::Done
        } else {
            BootstrapPhase::ScoringPatterns
        };

        if promoted.is_empty() {
            tracing::debug!(iteration, "no new words promoted");
        }
        tracing::info!(
            iteration,
            pool = pool.len(),
            promoted = promoted.len(),
            lexicon = self.lexicon.len(),
            "iteration finished"
        );

        Ok(IterationSnapshotV1 {
            iteration,
            pool: pool.into_entries(),
            new_words: promoted
                .into_iter()
                .map(|r| NewWordV1 {
                    word: r.key,
                    score: r.score,
                })
                .collect(),
            lexicon_size: self.lexicon.len(),
        })
    }

    /// Run every iteration on a fresh engine, reporting the preamble and each snapshot.
    ///
    /// An engine that has already been stepped is rejected with
    /// [`BootstrapError::InvalidState`], since the preamble must open the trace.
    pub fn run<R: TraceReporter + ?Sized>(&mut self, reporter: &mut R) -> Result<()> {
        if self.completed > 0 {
            return Err(BootstrapError::InvalidState(format!(
                "run must start from a fresh engine ({} iteration(s) already stepped)",
                self.completed
            )));
        }
        reporter.preamble(&self.seeds, self.patterns.len())?;
        while !self.is_done() {
            let snapshot = self.step()?;
            reporter.iteration(&snapshot)?;
        }
        reporter.finish()
    }
}
