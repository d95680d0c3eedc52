//! Rule model and the built-in detection catalog.
//!
//! A rule is data: an id, a category, a severity, and a matcher. Matchers
//! come in three shapes — a regex over raw content, a structural check
//! computed from the per-file index, or a plain function for callers that
//! need custom behavior. The registry compiles specs into executable rules
//! and rejects broken ones before any file is scanned.

pub mod ai_patterns;
pub mod maintainability;
pub mod performance;
pub mod security;

use crate::analyzer::index::StructuralIndex;
use crate::core::file_unit::FileUnit;
use crate::core::severity::{Category, Severity};
use anyhow::Result;

/// Where a pattern rule is allowed to match, relative to the structural
/// index's comment and string spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    /// Only outside comments and string literals.
    Code,
    /// Only inside comments.
    Comment,
    /// Anywhere, string literals included.
    Any,
}

/// One match site produced by a matcher. Line and column are 1-based.
#[derive(Debug, Clone)]
pub struct MatchSite {
    pub line: usize,
    pub column: usize,
    /// Overrides the rule's message template when present; structural
    /// checks use it to report measured values.
    pub detail: Option<String>,
    pub snippet: Option<String>,
}

impl MatchSite {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            detail: None,
            snippet: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Signature for function matchers: pure, read-only over the unit and its
/// index, and allowed to fail — a failure is isolated to one (rule, file)
/// pair and recorded as a diagnostic finding.
pub type MatcherFn = fn(&FileUnit, &StructuralIndex) -> Result<Vec<MatchSite>>;

#[derive(Debug, Clone)]
pub enum MatcherSpec {
    /// Regex applied to the raw content; each match site yields one finding.
    Pattern {
        pattern: &'static str,
        scope: MatchScope,
    },
    /// Cross-line check computed from the structural index, never raw regex.
    Structural(StructuralCheck),
    /// Arbitrary matcher function.
    Function(MatcherFn),
}

/// Closed set of index-backed checks. These need function/comment context
/// a line regex cannot see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralCheck {
    LongLine,
    LongFunction,
    TooManyParameters,
    HighComplexity,
    DeepNesting,
    DeeplyNestedLoops,
}

/// Declarative rule description, compiled by the registry.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub id: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub matcher: MatcherSpec,
    pub message: &'static str,
    /// AiPattern rules only; must sit in [0, 1].
    pub confidence: Option<f64>,
}

impl RuleSpec {
    pub fn pattern(
        id: &'static str,
        category: Category,
        severity: Severity,
        pattern: &'static str,
        message: &'static str,
    ) -> Self {
        Self::pattern_in(id, category, severity, MatchScope::Code, pattern, message)
    }

    pub fn pattern_in(
        id: &'static str,
        category: Category,
        severity: Severity,
        scope: MatchScope,
        pattern: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            severity,
            matcher: MatcherSpec::Pattern { pattern, scope },
            message,
            confidence: None,
        }
    }

    pub fn structural(
        id: &'static str,
        category: Category,
        severity: Severity,
        check: StructuralCheck,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            severity,
            matcher: MatcherSpec::Structural(check),
            message,
            confidence: None,
        }
    }

    pub fn function(
        id: &'static str,
        category: Category,
        severity: Severity,
        matcher: MatcherFn,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            category,
            severity,
            matcher: MatcherSpec::Function(matcher),
            message,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// The full built-in catalog, all categories. The registry filters this
/// down to the enabled analyzer set.
pub fn builtin_rules() -> Vec<RuleSpec> {
    let mut rules = Vec::new();
    rules.extend(security::rules());
    rules.extend(performance::rules());
    rules.extend(maintainability::rules());
    rules.extend(ai_patterns::rules());
    rules
}
