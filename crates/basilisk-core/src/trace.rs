//! Trace reporters: a human-readable `.trace` log and a structured JSON trace.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::engine::IterationSnapshotV1;
use crate::error::Result;
use crate::options::BootstrapOptionsV1;

pub const BOOTSTRAP_TRACE_VERSION_V1: u32 = 1;

/// Receives the run preamble and every iteration snapshot, in order.
pub trait TraceReporter {
    fn preamble(&mut self, seeds: &[String], unique_patterns: usize) -> Result<()>;

    fn iteration(&mut self, snapshot: &IterationSnapshotV1) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Fan out to two reporters.
impl<A: TraceReporter, B: TraceReporter> TraceReporter for (A, B) {
    fn preamble(&mut self, seeds: &[String], unique_patterns: usize) -> Result<()> {
        self.0.preamble(seeds, unique_patterns)?;
        self.1.preamble(seeds, unique_patterns)
    }

    fn iteration(&mut self, snapshot: &IterationSnapshotV1) -> Result<()> {
        self.0.iteration(snapshot)?;
        self.1.iteration(snapshot)
    }

    fn finish(&mut self) -> Result<()> {
        self.0.finish()?;
        self.1.finish()
    }
}

fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Writes the plain-text trace:
///
/// ```text
///
/// Seed Words: dog cat
/// Unique patterns: 1
///
/// ITERATION 1
///
/// PATTERN POOL
/// 1. P1  (0.667)
///
/// NEW WORDS
/// fox  (1.585)
/// ```
pub struct TextTraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TextTraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceReporter for TextTraceWriter<W> {
    fn preamble(&mut self, seeds: &[String], unique_patterns: usize) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Seed Words: {}", seeds.join(" "))?;
        writeln!(self.out, "Unique patterns: {}", unique_patterns)?;
        Ok(())
    }

    fn iteration(&mut self, snapshot: &IterationSnapshotV1) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "ITERATION {}", snapshot.iteration)?;
        writeln!(self.out)?;
        writeln!(self.out, "PATTERN POOL")?;
        for (rank, entry) in snapshot.pool.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {}  ({})",
                rank + 1,
                entry.pattern,
                format_score(entry.score)
            )?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "NEW WORDS")?;
        for new_word in &snapshot.new_words {
            writeln!(self.out, "{}  ({})", new_word.word, format_score(new_word.score))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Structured record of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapTraceV1 {
    pub version: u32,
    pub options: BootstrapOptionsV1,
    pub seeds: Vec<String>,
    pub unique_patterns: usize,
    pub iterations: Vec<IterationSnapshotV1>,
}

impl BootstrapTraceV1 {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every word promoted during the run, in promotion order.
    pub fn promoted_words(&self) -> impl Iterator<Item = &str> {
        self.iterations
            .iter()
            .flat_map(|it| it.new_words.iter().map(|w| w.word.as_str()))
    }
}

/// Collects snapshots into a [`BootstrapTraceV1`].
#[derive(Debug, Clone)]
pub struct TraceCollector {
    trace: BootstrapTraceV1,
}

impl TraceCollector {
    pub fn new(options: BootstrapOptionsV1) -> Self {
        Self {
            trace: BootstrapTraceV1 {
                version: BOOTSTRAP_TRACE_VERSION_V1,
                options,
                seeds: Vec::new(),
                unique_patterns: 0,
                iterations: Vec::new(),
            },
        }
    }

    pub fn trace(&self) -> &BootstrapTraceV1 {
        &self.trace
    }

    pub fn into_trace(self) -> BootstrapTraceV1 {
        self.trace
    }
}

impl TraceReporter for TraceCollector {
    fn preamble(&mut self, seeds: &[String], unique_patterns: usize) -> Result<()> {
        self.trace.seeds = seeds.to_vec();
        self.trace.unique_patterns = unique_patterns;
        Ok(())
    }

    fn iteration(&mut self, snapshot: &IterationSnapshotV1) -> Result<()> {
        self.trace.iterations.push(snapshot.clone());
        Ok(())
    }
}
