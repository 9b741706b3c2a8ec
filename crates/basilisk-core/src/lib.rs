//! Basilisk: semantic lexicon bootstrapping
//!
//! Starting from a handful of seed words for a semantic category, the engine alternates
//! between:
//! - scoring extraction patterns by how strongly they co-occur with known category members
//!   (RlogF),
//! - pooling the best patterns,
//! - scoring every head noun of the pooled patterns (AvgLog over all of its patterns),
//! - promoting the best new words into the lexicon,
//!
//! for a fixed number of iterations. Each iteration is reported to a [`TraceReporter`].
//!
//! ```no_run
//! use basilisk_core::{BootstrapEngine, BootstrapOptionsV1, TextTraceWriter};
//!
//! let seeds = basilisk_core::parse_seed_words("dog\ncat\n");
//! let patterns = basilisk_core::parse_context_records("a fox * chased_<dobj>\n")?;
//! let mut engine = BootstrapEngine::new(seeds, patterns, BootstrapOptionsV1::default());
//! engine.run(&mut TextTraceWriter::new(std::io::stdout()))?;
//! # Ok::<(), basilisk_core::BootstrapError>(())
//! ```

pub mod candidates;
pub mod engine;
pub mod error;
pub mod input;
pub mod lexicon;
pub mod options;
pub mod patterns;
pub mod pool;
pub mod ranking;
pub mod scoring;
pub mod trace;

pub use candidates::*;
pub use engine::*;
pub use error::*;
pub use input::*;
pub use lexicon::*;
pub use options::*;
pub use patterns::*;
pub use pool::*;
pub use ranking::*;
pub use scoring::*;
pub use trace::*;
