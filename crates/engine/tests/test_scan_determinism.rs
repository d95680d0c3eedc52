/// Determinism and idempotence of whole-run output across worker counts.
use kansa_engine::{EngineConfig, FileUnit, ProvidedFile, ScanEngine, ScanResult};

fn corpus() -> Vec<ProvidedFile> {
    let mut files: Vec<ProvidedFile> = Vec::new();
    for i in 0..24 {
        let content = format!(
            "import os\n\
             # Note: helper module {i}\n\
             API_KEY = \"sk_live_{i:04}abcdefghij\"\n\
             def process_batch(items):\n\
             \x20   for item in items:\n\
             \x20       for sub in item:\n\
             \x20           for leaf in sub:\n\
             \x20               eval(leaf)\n\
             temp = 1\n"
        );
        files.push(Ok(FileUnit::new(format!("src/mod_{i:02}.py", i = i), content)));
    }
    files
}

fn run_with_workers(workers: usize) -> ScanResult {
    let config = EngineConfig {
        workers: Some(workers),
        ..EngineConfig::default()
    };
    let engine = ScanEngine::new(config).expect("valid config");
    engine.run(corpus())
}

fn assert_equal_ignoring_time(a: &ScanResult, b: &ScanResult) {
    assert_eq!(a.findings, b.findings);
    assert_eq!(a.file_scores, b.file_scores);
    assert_eq!(a.incomplete, b.incomplete);

    assert_eq!(a.summary.files_scanned, b.summary.files_scanned);
    assert_eq!(a.summary.security_issues, b.summary.security_issues);
    assert_eq!(a.summary.performance_issues, b.summary.performance_issues);
    assert_eq!(
        a.summary.maintainability_issues,
        b.summary.maintainability_issues
    );
    assert_eq!(a.summary.ai_pattern_issues, b.summary.ai_pattern_issues);
    assert_eq!(a.summary.severity_counts, b.summary.severity_counts);
    assert_eq!(
        a.summary.maintainability_score,
        b.summary.maintainability_score
    );
    assert_eq!(
        a.summary.ai_generated_percentage,
        b.summary.ai_generated_percentage
    );
}

#[test]
fn single_and_multi_worker_runs_are_byte_identical() {
    let serial = run_with_workers(1);
    let parallel = run_with_workers(4);

    assert_equal_ignoring_time(&serial, &parallel);

    assert!(!serial.findings.is_empty(), "corpus should produce findings");
}

#[test]
fn scanning_twice_is_idempotent() {
    let first = run_with_workers(4);
    let second = run_with_workers(4);
    assert_equal_ignoring_time(&first, &second);
}

#[test]
fn findings_are_ordered_by_path_then_location() {
    let result = run_with_workers(4);

    let mut previous: Option<(&str, usize, usize, &str)> = None;
    for finding in &result.findings {
        let key = (
            finding.file.as_str(),
            finding.line,
            finding.column,
            finding.rule_id.as_str(),
        );
        if let Some(prev) = previous {
            assert!(prev <= key, "findings out of order: {prev:?} then {key:?}");
        }
        previous = Some(key);
    }
}

#[test]
fn no_duplicate_findings() {
    let result = run_with_workers(4);
    let mut keys: Vec<_> = result
        .findings
        .iter()
        .map(|f| (f.rule_id.clone(), f.file.clone(), f.line, f.column))
        .collect();
    let before = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(before, keys.len());
}
