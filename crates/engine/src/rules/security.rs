//! Security rule catalog: injection sinks, hardcoded secrets, unsafe
//! deserialization, command execution with tainted input.

use super::RuleSpec;
use crate::core::severity::{Category::Security, Severity};

pub fn rules() -> Vec<RuleSpec> {
    vec![
        // SQL injection via string building
        RuleSpec::pattern(
            "security.sql-injection.format",
            Security,
            Severity::High,
            r#"(?i)execute\s*\(\s*["'][^"']*%"#,
            "SQL statement built with %-style string formatting",
        ),
        RuleSpec::pattern(
            "security.sql-injection.fstring",
            Security,
            Severity::High,
            r#"(?i)cursor\.execute\s*\(\s*f["']"#,
            "SQL statement built with an f-string",
        ),
        RuleSpec::pattern(
            "security.sql-injection.concat",
            Security,
            Severity::High,
            r#"(?i)query\s*=\s*["'][^"']*["']\s*\+"#,
            "SQL statement built with string concatenation",
        ),
        RuleSpec::pattern(
            "security.sql-injection.where-concat",
            Security,
            Severity::High,
            r#"(?i)WHERE\s+[^"'\n]*=\s*["'][^"']*["']\s*\+"#,
            "WHERE clause built with string concatenation",
        ),
        // XSS sinks
        RuleSpec::pattern(
            "security.xss.inner-html",
            Security,
            Severity::High,
            r#"innerHTML\s*=\s*[^;\n]*\+"#,
            "innerHTML assigned from concatenated input",
        ),
        RuleSpec::pattern(
            "security.xss.document-write",
            Security,
            Severity::High,
            r#"document\.write\s*\([^)\n]*\+"#,
            "document.write called with concatenated input",
        ),
        RuleSpec::pattern(
            "security.xss.template-script",
            Security,
            Severity::High,
            r#"<script>[^<\n]*\$\{"#,
            "template interpolation inside a script tag",
        ),
        // Hardcoded secrets
        RuleSpec::pattern(
            "security.secrets.password",
            Security,
            Severity::Critical,
            r#"(?i)password\s*=\s*["'][^"']{8,}["']"#,
            "Hardcoded password",
        ),
        RuleSpec::pattern(
            "security.secrets.api-key",
            Security,
            Severity::Critical,
            r#"(?i)api[_-]?key\s*=\s*["'][A-Za-z0-9_\-]{12,}["']"#,
            "Hardcoded API key",
        ),
        RuleSpec::pattern(
            "security.secrets.secret-key",
            Security,
            Severity::Critical,
            r#"(?i)secret[_-]?key\s*=\s*["'][A-Za-z0-9_\-]{12,}["']"#,
            "Hardcoded secret key",
        ),
        RuleSpec::pattern(
            "security.secrets.token",
            Security,
            Severity::Critical,
            r#"(?i)token\s*=\s*["'][A-Za-z0-9_\-]{20,}["']"#,
            "Hardcoded token",
        ),
        RuleSpec::pattern(
            "security.secrets.aws-key",
            Security,
            Severity::Critical,
            r#"["']AKIA[A-Z0-9]{16}["']"#,
            "AWS access key id in source",
        ),
        // Unsafe deserialization and code injection
        RuleSpec::pattern(
            "security.deserialization.pickle",
            Security,
            Severity::Critical,
            r"\bpickle\.loads?\s*\(",
            "Unsafe pickle deserialization",
        ),
        RuleSpec::pattern(
            "security.deserialization.yaml-load",
            Security,
            Severity::Critical,
            r"\byaml\.load\s*\(",
            "yaml.load without a safe loader",
        ),
        RuleSpec::pattern(
            "security.injection.eval",
            Security,
            Severity::Critical,
            r"\beval\s*\(",
            "Code injection via eval",
        ),
        RuleSpec::pattern(
            "security.injection.exec",
            Security,
            Severity::Critical,
            r"\bexec\s*\(",
            "Code injection via exec",
        ),
        // Command execution with tainted input
        RuleSpec::pattern(
            "security.command.os-system",
            Security,
            Severity::High,
            r"os\.system\s*\([^)\n]*\+",
            "Command built with concatenation passed to os.system",
        ),
        RuleSpec::pattern(
            "security.command.subprocess-tainted",
            Security,
            Severity::High,
            r"subprocess\.(call|run|Popen)\s*\([^)\n]*(input|request|argv)",
            "Subprocess invoked with unvalidated input",
        ),
        RuleSpec::pattern(
            "security.model-load.tainted",
            Security,
            Severity::High,
            r"(torch|joblib)\.load\s*\([^)\n]*(input|request|user)",
            "Model deserialized from user-controlled input",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compiled(id: &str) -> Regex {
        let rules = rules();
        let spec = rules.iter().find(|r| r.id == id).expect("rule exists");
        match &spec.matcher {
            crate::rules::MatcherSpec::Pattern { pattern, .. } => {
                Regex::new(pattern).expect("pattern compiles")
            }
            _ => panic!("not a pattern rule"),
        }
    }

    #[test]
    fn api_key_pattern_matches_realistic_keys() {
        let re = compiled("security.secrets.api-key");
        assert!(re.is_match(r#"API_KEY = "sk_test_1234567890abcdef""#));
        assert!(re.is_match(r#"api-key = 'AbCdEf123456789012'"#));
        assert!(!re.is_match(r#"api_key = get_key()"#));
        assert!(!re.is_match(r#"API_KEY = "short""#));
    }

    #[test]
    fn sql_concat_pattern() {
        let re = compiled("security.sql-injection.concat");
        assert!(re.is_match(r#"query = "SELECT * FROM users WHERE id = " + user_id"#));
        assert!(!re.is_match(r#"query = "SELECT * FROM users WHERE id = ?""#));
    }

    #[test]
    fn eval_requires_word_boundary() {
        let re = compiled("security.injection.eval");
        assert!(re.is_match("result = eval(expr)"));
        assert!(!re.is_match("model.evaluate(data)"));
    }
}
