//! Severity filtering and the pass/fail decision.
//!
//! The filter decides what a report shows; the verdict decides whether the
//! run failed. They are deliberately independent: the verdict is a pure
//! function of the unfiltered summary counts, so a permissive display
//! threshold can never mask a Critical issue from CI.

use crate::aggregate::{ScanResult, ScanSummary};
use crate::core::finding::Finding;
use crate::core::severity::Severity;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct SeverityFilter {
    threshold: Severity,
}

impl SeverityFilter {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    /// Findings at or above the threshold, order preserved.
    pub fn retain(&self, findings: &[Finding]) -> Vec<Finding> {
        findings
            .iter()
            .filter(|f| f.severity >= self.threshold)
            .cloned()
            .collect()
    }

    pub fn apply(&self, result: &ScanResult) -> Vec<Finding> {
        self.retain(&result.findings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passing,
    Failing,
}

impl Verdict {
    /// Failing iff at least one finding sits at or above `fail_level`,
    /// evaluated over the unfiltered summary counts.
    pub fn evaluate(summary: &ScanSummary, fail_level: Severity) -> Self {
        if summary.severity_counts.at_or_above(fail_level) > 0 {
            Verdict::Failing
        } else {
            Verdict::Passing
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(self, Verdict::Failing)
    }
}
