/// Score formulas and bounds at the whole-engine level.
use kansa_engine::{
    AnalyzerToggles, Category, EngineConfig, FileUnit, ProvidedFile, RuleSpec, ScanEngine,
    Severity, Verdict,
};

fn ai_only_config() -> EngineConfig {
    EngineConfig {
        analyzers: AnalyzerToggles {
            security: false,
            performance: false,
            maintainability: false,
            ai_patterns: true,
        },
        ..EngineConfig::default()
    }
}

fn ai_marker_rule(confidence: f64) -> Vec<RuleSpec> {
    vec![RuleSpec::pattern(
        "ai.custom.marker",
        Category::AiPattern,
        Severity::Low,
        r"generated_marker",
        "synthetic AI marker",
    )
    .with_confidence(confidence)]
}

fn two_file_run(confidence: f64) -> f64 {
    let engine = ScanEngine::with_rules(ai_only_config(), ai_marker_rule(confidence))
        .expect("valid rules");
    let files: Vec<ProvidedFile> = vec![
        Ok(FileUnit::new("suspect.py", "x = generated_marker\n")),
        Ok(FileUnit::new("clean.py", "y = 2\n")),
    ];
    engine.run(files).summary.ai_generated_percentage
}

#[test]
fn ai_percentage_respects_the_confidence_threshold() {
    // 0.65 < 0.7: the file does not count as AI-generated.
    assert_eq!(two_file_run(0.65), 0.0);

    // 0.72 >= 0.7: one of two files counts.
    assert_eq!(two_file_run(0.72), 50.0);
}

#[test]
fn empty_input_is_trivially_successful() {
    let engine = ScanEngine::new(EngineConfig::default()).expect("valid config");
    let result = engine.run(Vec::new());

    assert_eq!(result.summary.files_scanned, 0);
    assert_eq!(result.summary.maintainability_score, 10.0);
    assert_eq!(result.summary.ai_generated_percentage, 0.0);
    assert!(!Verdict::evaluate(&result.summary, Severity::Critical).is_failing());
}

#[test]
fn scores_stay_in_bounds_under_heavy_findings() {
    // A file dense with maintainability smells cannot push the score
    // below zero or the percentage outside [0, 100].
    let mut noisy = String::new();
    for _ in 0..40 {
        noisy.push_str("                              deeply = nested\n");
    }
    let files: Vec<ProvidedFile> = vec![
        Ok(FileUnit::new("noisy.py", noisy)),
        Ok(FileUnit::new("ok.py", "value = 1\n")),
    ];

    let engine = ScanEngine::new(EngineConfig::default()).expect("valid config");
    let result = engine.run(files);

    let score = result.summary.maintainability_score;
    assert!((0.0..=10.0).contains(&score), "score out of bounds: {score}");
    assert!(!score.is_nan());

    let pct = result.summary.ai_generated_percentage;
    assert!((0.0..=100.0).contains(&pct));

    for file_score in result.file_scores.values() {
        assert!((0.0..=10.0).contains(&file_score.maintainability_score));
        assert!((0.0..=1.0).contains(&file_score.ai_confidence));
    }
}

#[test]
fn larger_files_weigh_more_in_the_run_score() {
    // Same findings profile, very different file sizes: the run-level
    // score must sit near the big file's score, not the midpoint.
    let small_clean = "ok = 1\n".repeat(5);
    let mut big_messy = String::new();
    for _ in 0..200 {
        big_messy.push_str("                              deeply = nested\n");
    }

    let engine = ScanEngine::new(EngineConfig::default()).expect("valid config");
    let result = engine.run(vec![
        Ok(FileUnit::new("small.py", small_clean)),
        Ok(FileUnit::new("big.py", big_messy)),
    ]);

    let big_score = result.file_scores["big.py"].maintainability_score;
    let run_score = result.summary.maintainability_score;
    assert!(
        (run_score - big_score).abs() < 0.5,
        "run score {run_score} should track the dominant file's {big_score}"
    );
}
