//! Basilisk CLI
//!
//! - `run`: bootstrap a semantic lexicon from seed words and context records, writing a
//!   `.trace` log (and optionally a JSON trace)
//! - `check`: parse the inputs and print a summary without running the loop

use anyhow::{Context, Result};
use basilisk_core::{
    derive_trace_path, read_context_records, read_seed_words, BootstrapEngine,
    BootstrapOptionsV1, PatternTable, TextTraceWriter, TraceCollector,
};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "basilisk")]
#[command(author, version, about = "Basilisk: semantic lexicon bootstrapping")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Seed words, one per line
    seeds: PathBuf,
    /// Context records: `<noun phrase> * ... <pattern>` per line
    contexts: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bootstrapping loop and write the trace log.
    Run {
        #[command(flatten)]
        inputs: InputArgs,
        /// Number of iterations (default: 5, or the value from `--options`)
        #[arg(short = 'n', long)]
        iterations: Option<usize>,
        /// Trace output path (default: `<seed prefix>-<context prefix>.trace`)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Also write the structured trace as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// JSON options file (`iterations`, `pool_window`, `promotion_window`)
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Parse seeds and context records and print a summary.
    Check {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            inputs,
            iterations,
            out,
            json,
            options,
        } => cmd_run(&inputs, iterations, out, json.as_deref(), options.as_deref()),
        Commands::Check { inputs } => cmd_check(&inputs),
    }
}

fn load_inputs(inputs: &InputArgs) -> Result<(Vec<String>, PatternTable)> {
    let seeds = read_seed_words(&inputs.seeds)
        .with_context(|| format!("failed to read seeds `{}`", inputs.seeds.display()))?;
    let patterns = read_context_records(&inputs.contexts)
        .with_context(|| format!("failed to read contexts `{}`", inputs.contexts.display()))?;
    tracing::info!(
        seeds = seeds.len(),
        patterns = patterns.len(),
        "loaded inputs"
    );
    Ok((seeds, patterns))
}

fn load_options(path: Option<&Path>, iterations: Option<usize>) -> Result<BootstrapOptionsV1> {
    let mut options = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options `{}`", path.display()))?;
            BootstrapOptionsV1::from_json(&text)
                .with_context(|| format!("invalid options file `{}`", path.display()))?
        }
        None => BootstrapOptionsV1::default(),
    };
    if let Some(n) = iterations {
        options.iterations = n;
    }
    Ok(options)
}

fn cmd_run(
    inputs: &InputArgs,
    iterations: Option<usize>,
    out: Option<PathBuf>,
    json: Option<&Path>,
    options_path: Option<&Path>,
) -> Result<()> {
    let options = load_options(options_path, iterations)?;
    // Inputs are fully parsed before the trace file is created.
    let (seeds, patterns) = load_inputs(inputs)?;

    let out = out.unwrap_or_else(|| derive_trace_path(&inputs.seeds, &inputs.contexts));
    let file =
        File::create(&out).with_context(|| format!("failed to create `{}`", out.display()))?;

    let mut engine = BootstrapEngine::new(seeds, patterns, options);
    let mut reporters = (
        TextTraceWriter::new(BufWriter::new(file)),
        TraceCollector::new(options),
    );
    engine
        .run(&mut reporters)
        .with_context(|| format!("bootstrapping failed (trace: `{}`)", out.display()))?;
    eprintln!("{} {}", "wrote".green().bold(), out.display().to_string().bold());

    if let Some(json_path) = json {
        let trace = reporters.1.into_trace();
        fs::write(json_path, trace.to_json_pretty()?)
            .with_context(|| format!("failed to write `{}`", json_path.display()))?;
        eprintln!(
            "{} {}",
            "wrote".green().bold(),
            json_path.display().to_string().bold()
        );
    }

    println!(
        "{} lexicon: {} words ({} promoted over {} iteration(s))",
        "ok".green().bold(),
        engine.lexicon().len(),
        engine.lexicon().len() - engine.seeds().len(),
        engine.iterations_completed()
    );
    Ok(())
}

fn cmd_check(inputs: &InputArgs) -> Result<()> {
    let (seeds, patterns) = load_inputs(inputs)?;
    let engine = BootstrapEngine::new(seeds, patterns, BootstrapOptionsV1::default());

    let seeds_in_corpus = engine
        .seeds()
        .iter()
        .filter(|seed| engine.patterns().iter().any(|(_, ctx)| ctx.contains(seed)))
        .count();

    println!(
        "{} seeds={} unique_patterns={} head_nouns={}",
        "ok".green().bold(),
        engine.seeds().len(),
        engine.patterns().len(),
        engine.patterns().distinct_head_nouns()
    );
    if seeds_in_corpus == 0 {
        println!(
            "{} no seed word occurs in any context record; every pattern will score 0",
            "info:".yellow().bold()
        );
    }
    Ok(())
}
