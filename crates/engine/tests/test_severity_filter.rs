/// Severity filter monotonicity and verdict independence over real scans.
use kansa_engine::{EngineConfig, FileUnit, ScanEngine, Severity, SeverityFilter, Verdict};

fn mixed_result() -> kansa_engine::ScanResult {
    // Critical secret, high SQL concat, medium perf smell, low TODO.
    let content = "\
# TODO: tidy this up
API_KEY = \"sk_test_1234567890abcdef\"
query = \"SELECT * FROM users WHERE id = \" + user_id
for i in range(len(items)):
    use(items[i])
";
    let engine = ScanEngine::new(EngineConfig::default()).expect("valid config");
    engine.run(vec![Ok(FileUnit::new("mixed.py", content))])
}

#[test]
fn retained_sets_are_nested_across_thresholds() {
    let result = mixed_result();

    let at_low = SeverityFilter::new(Severity::Low).apply(&result);
    let at_medium = SeverityFilter::new(Severity::Medium).apply(&result);
    let at_high = SeverityFilter::new(Severity::High).apply(&result);
    let at_critical = SeverityFilter::new(Severity::Critical).apply(&result);

    assert!(!at_critical.is_empty());
    assert!(at_low.len() >= at_medium.len());
    assert!(at_medium.len() >= at_high.len());
    assert!(at_high.len() >= at_critical.len());

    // Nesting, not just counts: everything retained at a stricter
    // threshold appears at every looser one.
    for f in &at_critical {
        assert!(at_high.contains(f));
    }
    for f in &at_high {
        assert!(at_medium.contains(f));
    }
    for f in &at_medium {
        assert!(at_low.contains(f));
    }
}

#[test]
fn display_threshold_never_masks_the_failure_decision() {
    let result = mixed_result();

    // Report only Low findings? The verdict still sees the Critical one.
    let shown = SeverityFilter::new(Severity::Critical).apply(&result);
    assert!(shown.iter().any(|f| f.severity == Severity::Critical));

    for display_threshold in Severity::ALL {
        let _ = SeverityFilter::new(display_threshold).apply(&result);
        let verdict = Verdict::evaluate(&result.summary, Severity::Critical);
        assert!(verdict.is_failing());
    }
}

#[test]
fn stricter_fail_levels_catch_lower_severities() {
    let engine = ScanEngine::new(EngineConfig::default()).expect("valid config");
    // Only a High finding, no Critical.
    let result = engine.run(vec![Ok(FileUnit::new(
        "db.py",
        "query = \"SELECT * FROM users WHERE id = \" + user_id\n",
    ))]);

    assert_eq!(result.summary.severity_counts.critical, 0);
    assert!(result.summary.severity_counts.high >= 1);

    assert!(!Verdict::evaluate(&result.summary, Severity::Critical).is_failing());
    assert!(Verdict::evaluate(&result.summary, Severity::High).is_failing());
}
