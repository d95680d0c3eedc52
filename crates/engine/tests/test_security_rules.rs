/// Built-in security catalog behavior against realistic snippets.
use kansa_engine::{Category, EngineConfig, FileUnit, ScanEngine, Severity};

fn scan_one(path: &str, content: &str) -> kansa_engine::ScanResult {
    let engine = ScanEngine::new(EngineConfig::default()).expect("valid config");
    engine.run(vec![Ok(FileUnit::new(path, content))])
}

#[test]
fn hardcoded_api_key_is_critical_at_its_line() {
    let content = "\
import os

def connect():
    API_KEY = \"sk_test_1234567890abcdef\"
    return client(API_KEY)
";
    let result = scan_one("settings.py", content);

    let secret = result
        .findings
        .iter()
        .find(|f| f.rule_id == "security.secrets.api-key")
        .expect("API key finding");

    assert_eq!(secret.category, Category::Security);
    assert_eq!(secret.severity, Severity::Critical);
    assert_eq!(secret.line, 4);
    assert!(secret.snippet.as_deref().unwrap_or("").contains("API_KEY"));
}

#[test]
fn eval_and_pickle_are_critical() {
    let content = "import pickle\nresult = eval(user_input)\nobj = pickle.loads(raw)\n";
    let result = scan_one("handler.py", content);

    for rule in ["security.injection.eval", "security.deserialization.pickle"] {
        let finding = result
            .findings
            .iter()
            .find(|f| f.rule_id == rule)
            .unwrap_or_else(|| panic!("missing {rule}"));
        assert_eq!(finding.severity, Severity::Critical);
    }
}

#[test]
fn sql_concatenation_is_flagged() {
    let content = "query = \"SELECT * FROM users WHERE id = \" + user_id\ncursor.execute(query)\n";
    let result = scan_one("db.py", content);

    assert!(result
        .findings
        .iter()
        .any(|f| f.rule_id == "security.sql-injection.concat" && f.line == 1));
}

#[test]
fn xss_sinks_are_flagged_in_javascript() {
    let content = "element.innerHTML = \"<b>\" + userName;\n";
    let result = scan_one("view.js", content);

    assert!(result
        .findings
        .iter()
        .any(|f| f.rule_id == "security.xss.inner-html" && f.severity == Severity::High));
}

#[test]
fn patterns_do_not_fire_inside_comments() {
    let content = "\
# bad old code: eval(user_input)
# API_KEY = \"sk_test_1234567890abcdef\"
safe = compute()
";
    let result = scan_one("clean.py", content);

    assert!(
        !result
            .findings
            .iter()
            .any(|f| f.category == Category::Security),
        "commented-out code must not produce security findings: {:?}",
        result.findings
    );
}

#[test]
fn security_findings_fail_the_run_at_default_fail_level() {
    let result = scan_one(
        "settings.py",
        "PASSWORD = \"hunter2hunter2\"\n",
    );
    assert!(result.summary.severity_counts.critical >= 1);
    assert!(kansa_engine::Verdict::evaluate(&result.summary, Severity::Critical).is_failing());
}
