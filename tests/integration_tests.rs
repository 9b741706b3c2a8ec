//! Integration tests for the complete Basilisk pipeline
//!
//! These tests exercise the file-facing surface end to end:
//! - seed / context files → pattern table + lexicon
//! - engine run → `.trace` text and JSON trace
//! - output name derivation
//!
//! Run with: cargo test --test integration_tests

use basilisk_core::{
    derive_trace_path, read_context_records, read_seed_words, BootstrapEngine, BootstrapError,
    BootstrapOptionsV1, TextTraceWriter, TraceCollector,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SEEDS: &str = "Dog\ncat\nhorse\n";

const CONTEXTS: &str = "\
the dog * <subj>_barked
a cat * <subj>_barked
the fox * <subj>_barked
a wolf * <subj>_barked
the dog * chased_<dobj>
the cat * chased_<dobj>
a horse * chased_<dobj>
a wolf * 2 chased_<dobj>
the car * chased_<dobj>
the horse * fed_<dobj>
the cat * fed_<dobj>
a goat * fed_<dobj>
the car * drove_<dobj>
a truck * drove_<dobj>
the bus * drove_<dobj>
the goat * <subj>_grazed
the horse * <subj>_grazed
a sheep * <subj>_grazed
";

fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let seeds = dir.join("animals-seeds.txt");
    let contexts = dir.join("farm-contexts.txt");
    fs::write(&seeds, SEEDS).expect("write seeds");
    fs::write(&contexts, CONTEXTS).expect("write contexts");
    (seeds, contexts)
}

fn run_text(seeds: &Path, contexts: &Path, options: BootstrapOptionsV1) -> String {
    let seed_words = read_seed_words(seeds).expect("read seeds");
    let patterns = read_context_records(contexts).expect("read contexts");
    let mut engine = BootstrapEngine::new(seed_words, patterns, options);
    let mut writer = TextTraceWriter::new(Vec::new());
    engine.run(&mut writer).expect("run");
    String::from_utf8(writer.into_inner()).expect("utf8 trace")
}

// ============================================================================
// Input files
// ============================================================================

#[test]
fn test_read_inputs_from_files() {
    let dir = tempdir().unwrap();
    let (seeds, contexts) = write_inputs(dir.path());

    assert_eq!(read_seed_words(&seeds).unwrap(), vec!["dog", "cat", "horse"]);

    let table = read_context_records(&contexts).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(table.get("chased_<dobj>").unwrap().total_frequency(), 5);
}

#[test]
fn test_missing_input_is_resource_error() {
    let dir = tempdir().unwrap();
    let err = read_seed_words(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, BootstrapError::Resource(_)));
}

#[test]
fn test_malformed_context_file_aborts() {
    let dir = tempdir().unwrap();
    let contexts = dir.path().join("bad-contexts.txt");
    fs::write(&contexts, "the dog * p1\nno separator here p2\n").unwrap();
    let err = read_context_records(&contexts).unwrap_err();
    assert!(matches!(err, BootstrapError::MalformedInput { line: 2, .. }));
}

#[test]
fn test_trace_path_from_input_names() {
    let dir = tempdir().unwrap();
    let (seeds, contexts) = write_inputs(dir.path());
    assert_eq!(
        derive_trace_path(&seeds, &contexts),
        Path::new("animals-farm.trace")
    );
}

// ============================================================================
// End-to-end runs
// ============================================================================

#[test]
fn test_first_iteration_trace() {
    let dir = tempdir().unwrap();
    let (seeds, contexts) = write_inputs(dir.path());
    let text = run_text(
        &seeds,
        &contexts,
        BootstrapOptionsV1::default().with_iterations(1),
    );

    // chased: 3/5 * log2 3 = 0.951; barked: 2/4 * 1 = 0.5; fed: 2/3 * 1 = 0.667;
    // grazed: 1 lexicon word → 0, not pooled.
    // Candidates: fox (barked: 2 → log2 3), wolf (barked 2, chased 3 → (log2 3 + 2) / 2),
    // car (chased 3, drove 0 → 1), goat (fed 2, grazed 1 → (log2 3 + 1) / 2).
    let expected = "
Seed Words: dog cat horse
Unique patterns: 5

ITERATION 1

PATTERN POOL
1. chased_<dobj>  (0.951)
2. fed_<dobj>  (0.667)
3. <subj>_barked  (0.500)

NEW WORDS
wolf  (1.792)
fox  (1.585)
goat  (1.292)
car  (1.000)
";
    assert_eq!(text, expected);
}

#[test]
fn test_later_iterations_pool_new_evidence() {
    let dir = tempdir().unwrap();
    let (seeds, contexts) = write_inputs(dir.path());
    let seed_words = read_seed_words(&seeds).unwrap();
    let patterns = read_context_records(&contexts).unwrap();
    let mut engine = BootstrapEngine::new(seed_words, patterns, BootstrapOptionsV1::default());
    let mut collector = TraceCollector::new(*engine.options());
    engine.run(&mut collector).unwrap();

    let trace = collector.into_trace();
    assert_eq!(trace.iterations.len(), 5);
    assert_eq!(
        trace.promoted_words().collect::<Vec<_>>(),
        vec!["wolf", "fox", "goat", "car", "sheep"]
    );
    // goat joins the lexicon, so grazed (goat, horse) is pooled in round two.
    assert!(trace.iterations[1]
        .pool
        .iter()
        .any(|e| e.pattern == "<subj>_grazed"));
    // drove only ever holds one lexicon word (car), so bus and truck stay out.
    assert!(trace.iterations[2..].iter().all(|it| it.new_words.is_empty()));
    assert!(!engine.lexicon().contains("bus"));
    assert_eq!(engine.lexicon().len(), 8);
}

#[test]
fn test_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    let (seeds, contexts) = write_inputs(dir.path());
    let a = run_text(&seeds, &contexts, BootstrapOptionsV1::default());
    let b = run_text(&seeds, &contexts, BootstrapOptionsV1::default());
    assert_eq!(a, b);
    assert_eq!(a.matches("ITERATION").count(), 5);
}

#[test]
fn test_json_trace_roundtrips() {
    let dir = tempdir().unwrap();
    let (seeds, contexts) = write_inputs(dir.path());
    let mut engine = BootstrapEngine::new(
        read_seed_words(&seeds).unwrap(),
        read_context_records(&contexts).unwrap(),
        BootstrapOptionsV1::default().with_iterations(2),
    );
    let mut collector = TraceCollector::new(*engine.options());
    engine.run(&mut collector).unwrap();

    let json_path = dir.path().join("trace.json");
    let trace = collector.into_trace();
    fs::write(&json_path, trace.to_json_pretty().unwrap()).unwrap();

    let parsed: basilisk_core::BootstrapTraceV1 =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.seeds, vec!["dog", "cat", "horse"]);
    assert_eq!(parsed.iterations.len(), 2);
    approx::assert_relative_eq!(
        parsed.iterations[0].new_words[0].score,
        (3f64.log2() + 2.0) / 2.0
    );
}
