use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding. The derived `Ord` follows declaration order, so
/// `Low < Medium < High < Critical` — threshold comparisons rely on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Critical => "🔴",
            Self::High => "🟠",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }
}

/// Analyzer category a rule belongs to. One closed set rather than open
/// registration: every rule is tagged with exactly one of these, and the
/// registry partitions by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Security,
    Performance,
    Maintainability,
    AiPattern,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Security => write!(f, "security"),
            Self::Performance => write!(f, "performance"),
            Self::Maintainability => write!(f, "maintainability"),
            Self::AiPattern => write!(f, "ai_pattern"),
        }
    }
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Security,
        Category::Performance,
        Category::Maintainability,
        Category::AiPattern,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_total_order() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn severity_serde_names() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        let parsed: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Severity::Medium);
    }
}
