//! AI-generation signal catalog.
//!
//! Each rule carries a static confidence in [0, 1] estimating how strongly
//! the pattern indicates machine authorship. A file's aggregate confidence
//! is the maximum over its matches — one distinctive signal (a telltale
//! comment block) outweighs many weak ones. All rules here report at Low
//! severity: they are signals, not defects.

use super::{MatchScope, RuleSpec};
use crate::core::severity::{Category::AiPattern, Severity};

pub fn rules() -> Vec<RuleSpec> {
    vec![
        // Comment voice
        RuleSpec::pattern_in(
            "ai.comment.explanatory",
            AiPattern,
            Severity::Low,
            MatchScope::Comment,
            r"(?i)\b(this|here)\s+is\s+(a|an)\s+",
            "AI-style explanatory comment",
        )
        .with_confidence(0.8),
        RuleSpec::pattern_in(
            "ai.comment.note",
            AiPattern,
            Severity::Low,
            MatchScope::Comment,
            r"(?i)\bnote:\s",
            "AI-style note comment",
        )
        .with_confidence(0.7),
        RuleSpec::pattern_in(
            "ai.comment.important",
            AiPattern,
            Severity::Low,
            MatchScope::Comment,
            r"(?i)\bimportant:\s",
            "AI-style important comment",
        )
        .with_confidence(0.7),
        RuleSpec::pattern_in(
            "ai.comment.example",
            AiPattern,
            Severity::Low,
            MatchScope::Comment,
            r"(?i)\bexample:\s",
            "AI-style example comment",
        )
        .with_confidence(0.6),
        RuleSpec::pattern_in(
            "ai.comment.todo-implement",
            AiPattern,
            Severity::Low,
            MatchScope::Comment,
            r"(?i)TODO:\s*implement\s",
            "Generic implement-me TODO",
        )
        .with_confidence(0.5),
        RuleSpec::pattern_in(
            "ai.comment.action",
            AiPattern,
            Severity::Low,
            MatchScope::Comment,
            r"(?i)\b(initialize|create|define)\s+(the|a)\s+",
            "AI-style action comment",
        )
        .with_confidence(0.7),
        // Naming
        RuleSpec::pattern(
            "ai.naming.my-prefix",
            AiPattern,
            Severity::Low,
            r"\bmy_\w+",
            "Placeholder my_-prefixed identifier",
        )
        .with_confidence(0.7),
        RuleSpec::pattern(
            "ai.naming.temp",
            AiPattern,
            Severity::Low,
            r"\btemp\b",
            "Generic 'temp' identifier",
        )
        .with_confidence(0.6),
        // Boilerplate structure
        RuleSpec::pattern(
            "ai.structure.my-class",
            AiPattern,
            Severity::Low,
            r"\bclass\s+MyClass\b",
            "Placeholder MyClass class name",
        )
        .with_confidence(0.9),
        RuleSpec::pattern(
            "ai.structure.my-function",
            AiPattern,
            Severity::Low,
            r"\bdef\s+my_function\b",
            "Placeholder my_function function name",
        )
        .with_confidence(0.9),
        RuleSpec::pattern(
            "ai.structure.verb-prefix",
            AiPattern,
            Severity::Low,
            r"\bdef\s+(calculate|process|handle)_\w+",
            "Boilerplate verb_noun function name",
        )
        .with_confidence(0.6),
        RuleSpec::pattern(
            "ai.structure.generic-main",
            AiPattern,
            Severity::Low,
            r"\bdef\s+main\s*\(\s*\)\s*:",
            "Generic main function",
        )
        .with_confidence(0.5),
        RuleSpec::pattern(
            "ai.structure.main-guard",
            AiPattern,
            Severity::Low,
            r#"if\s+__name__\s*==\s*["']__main__["']"#,
            "Standard main guard",
        )
        .with_confidence(0.4),
        // Telltale strings; these must match inside string literals
        RuleSpec::pattern_in(
            "ai.string.hello-world",
            AiPattern,
            Severity::Low,
            MatchScope::Any,
            r#"(?i)["']hello,?\s+world!?["']"#,
            "Hello World placeholder string",
        )
        .with_confidence(0.8),
        RuleSpec::pattern_in(
            "ai.string.this-is-a-test",
            AiPattern,
            Severity::Low,
            MatchScope::Any,
            r#"(?i)["']this\s+is\s+a\s+test["']"#,
            "Placeholder test string",
        )
        .with_confidence(0.7),
        // Import habits
        RuleSpec::pattern(
            "ai.imports.typing-triple",
            AiPattern,
            Severity::Low,
            r"from\s+typing\s+import\s+List,\s*Dict,\s*Any",
            "Stock typing import triple",
        )
        .with_confidence(0.6),
    ]
}
