use crate::core::severity::{Category, Severity};
use serde::{Deserialize, Serialize};

/// Rule id reserved for files that could not be read or decoded.
pub const FILE_READ_ERROR_RULE: &str = "internal.file-read-error";

/// Rule id reserved for rules that faulted during execution.
pub const RULE_FAULT_RULE: &str = "internal.rule-error";

/// A single normalized detection result tied to a file location.
///
/// Findings are immutable once produced; two findings are equal iff all
/// fields match. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub category: Category,
    pub severity: Severity,
    pub message: String,

    /// AI-authorship likelihood in [0, 1]. Present only on AiPattern findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub confidence: Option<f64>,

    /// Bounded-length excerpt of the offending source line.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub snippet: Option<String>,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        category: Category,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            file: String::new(),
            line: 1,
            column: 1,
            category,
            severity,
            message: message.into(),
            confidence: None,
            snippet: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: usize, column: usize) -> Self {
        self.file = file.into();
        self.line = line;
        self.column = column;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Synthetic finding for a file that could not be read or decoded.
    /// Recovered locally per the partial-failure contract: the run continues.
    pub fn file_read_error(path: &str, detail: &str) -> Self {
        Finding::new(
            FILE_READ_ERROR_RULE,
            Category::Maintainability,
            Severity::Low,
            format!("file could not be read or decoded: {detail}"),
        )
        .at(path, 1, 1)
    }

    /// Synthetic finding recording a rule that faulted while scanning one
    /// file. The offending rule contributes nothing else for that file.
    pub fn rule_fault(path: &str, rule_id: &str, detail: &str) -> Self {
        Finding::new(
            RULE_FAULT_RULE,
            Category::Maintainability,
            Severity::Low,
            format!("rule '{rule_id}' failed during execution: {detail}"),
        )
        .at(path, 1, 1)
    }

    /// True for findings that report an internal fault rather than a code
    /// issue. Report builders render these distinctly.
    pub fn is_diagnostic(&self) -> bool {
        self.rule_id.starts_with("internal.")
    }

    /// Deterministic within-file ordering: line, then column, then rule id.
    pub fn sort_key(&self) -> (usize, usize, &str) {
        (self.line, self.column, self.rule_id.as_str())
    }
}
