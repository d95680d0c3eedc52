//! Maintainability rule catalog: size and shape limits from the
//! structural index plus a few lexical smells.

use super::{MatchScope, RuleSpec, StructuralCheck};
use crate::core::severity::{Category::Maintainability, Severity};

pub fn rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::structural(
            "maintainability.line-length",
            Maintainability,
            Severity::Low,
            StructuralCheck::LongLine,
            "Line exceeds the configured length limit",
        ),
        RuleSpec::structural(
            "maintainability.long-function",
            Maintainability,
            Severity::Medium,
            StructuralCheck::LongFunction,
            "Function exceeds the configured length limit",
        ),
        RuleSpec::structural(
            "maintainability.too-many-params",
            Maintainability,
            Severity::Medium,
            StructuralCheck::TooManyParameters,
            "Function takes too many parameters",
        ),
        RuleSpec::structural(
            "maintainability.high-complexity",
            Maintainability,
            Severity::Medium,
            StructuralCheck::HighComplexity,
            "Function complexity exceeds the configured threshold",
        ),
        RuleSpec::structural(
            "maintainability.deep-nesting",
            Maintainability,
            Severity::Medium,
            StructuralCheck::DeepNesting,
            "Code is too deeply nested",
        ),
        RuleSpec::pattern(
            "maintainability.magic-number",
            Maintainability,
            Severity::Low,
            r"\b\d{4,}\b",
            "Magic number; consider a named constant",
        ),
        RuleSpec::pattern_in(
            "maintainability.todo-marker",
            Maintainability,
            Severity::Low,
            MatchScope::Comment,
            r"\b(TODO|FIXME|HACK|XXX)\b",
            "Unresolved TODO/FIXME marker",
        ),
    ]
}
