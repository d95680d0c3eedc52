//! Aggregation of per-file findings into scores and the run-level result.
//!
//! Combining per-file results is associative and commutative: files are
//! keyed by path and the final ordering is derived by sorting, never from
//! arrival order, so parallel completion order cannot leak into the output.

use crate::core::finding::Finding;
use crate::core::severity::{Category, Severity};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maintainability penalty per finding, by severity (Low..Critical).
const MAINTAINABILITY_PENALTY: [(Severity, f64); 4] = [
    (Severity::Low, 0.25),
    (Severity::Medium, 0.75),
    (Severity::High, 1.5),
    (Severity::Critical, 2.5),
];

fn penalty_for(severity: Severity) -> f64 {
    MAINTAINABILITY_PENALTY
        .iter()
        .find(|(s, _)| *s == severity)
        .map(|(_, p)| *p)
        .unwrap_or(0.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Finding tallies by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    /// Findings at or above `level` under the total severity order.
    pub fn at_or_above(&self, level: Severity) -> usize {
        let mut count = self.critical;
        if level <= Severity::High {
            count += self.high;
        }
        if level <= Severity::Medium {
            count += self.medium;
        }
        if level <= Severity::Low {
            count += self.low;
        }
        count
    }

    pub fn merge(&mut self, other: &SeverityCounts) {
        self.critical += other.critical;
        self.high += other.high;
        self.medium += other.medium;
        self.low += other.low;
    }
}

/// Finding tallies by analyzer category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub security: usize,
    pub performance: usize,
    pub maintainability: usize,
    pub ai_pattern: usize,
}

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Security => self.security += 1,
            Category::Performance => self.performance += 1,
            Category::Maintainability => self.maintainability += 1,
            Category::AiPattern => self.ai_pattern += 1,
        }
    }

    pub fn merge(&mut self, other: &CategoryCounts) {
        self.security += other.security;
        self.performance += other.performance;
        self.maintainability += other.maintainability;
        self.ai_pattern += other.ai_pattern;
    }
}

/// Per-file aggregate derived from its unfiltered findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileScore {
    pub path: String,
    pub line_count: usize,
    pub severity_counts: SeverityCounts,
    pub category_counts: CategoryCounts,
    /// In [0, 10]; starts at 10.0 and loses a severity-weighted penalty per
    /// Maintainability finding.
    pub maintainability_score: f64,
    /// Maximum confidence among the file's AiPattern findings, 0.0 if none.
    pub ai_confidence: f64,
}

impl FileScore {
    pub fn compute(path: &str, line_count: usize, findings: &[Finding]) -> Self {
        let mut severity_counts = SeverityCounts::default();
        let mut category_counts = CategoryCounts::default();
        let mut penalty = 0.0;
        let mut ai_confidence = 0.0f64;

        for finding in findings {
            severity_counts.record(finding.severity);
            category_counts.record(finding.category);

            if finding.category == Category::Maintainability {
                penalty += penalty_for(finding.severity);
            }
            if finding.category == Category::AiPattern {
                if let Some(confidence) = finding.confidence {
                    ai_confidence = ai_confidence.max(confidence);
                }
            }
        }

        Self {
            path: path.to_string(),
            line_count,
            severity_counts,
            category_counts,
            maintainability_score: (10.0 - penalty).clamp(0.0, 10.0),
            ai_confidence: ai_confidence.clamp(0.0, 1.0),
        }
    }
}

/// Run-level summary over the full, unfiltered finding set. The display
/// severity filter never changes these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub security_issues: usize,
    pub performance_issues: usize,
    pub maintainability_issues: usize,
    pub ai_pattern_issues: usize,
    pub severity_counts: SeverityCounts,
    /// Line-count-weighted mean of per-file scores, one decimal. 10.0 for
    /// an empty run.
    pub maintainability_score: f64,
    /// Share of files whose ai_confidence reached the configured threshold,
    /// one decimal. 0.0 for an empty run.
    pub ai_generated_percentage: f64,
    pub execution_time_seconds: f64,
}

/// The sole object handed to report builders. Shape and ordering are a
/// pure function of the input file set and rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub summary: ScanSummary,
    /// Lexicographic by path, then line, column, rule id within a file.
    pub findings: Vec<Finding>,
    pub file_scores: BTreeMap<String, FileScore>,
    /// True when the run was cancelled before covering every file. A
    /// partial result is still internally consistent.
    pub incomplete: bool,
}

impl ScanResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Accumulates per-file analyses and emits the final [`ScanResult`].
#[derive(Debug)]
pub struct Aggregator {
    ai_confidence_threshold: f64,
    files: BTreeMap<String, (FileScore, Vec<Finding>)>,
}

impl Aggregator {
    pub fn new(ai_confidence_threshold: f64) -> Self {
        Self {
            ai_confidence_threshold,
            files: BTreeMap::new(),
        }
    }

    /// Order-independent: results may arrive from workers in any order.
    pub fn add_file(&mut self, score: FileScore, findings: Vec<Finding>) {
        self.files.insert(score.path.clone(), (score, findings));
    }

    pub fn files_seen(&self) -> usize {
        self.files.len()
    }

    pub fn finalize(self, execution_time_seconds: f64, incomplete: bool) -> ScanResult {
        let mut severity_counts = SeverityCounts::default();
        let mut category_counts = CategoryCounts::default();
        let mut findings = Vec::new();
        let mut file_scores = BTreeMap::new();

        let mut weighted_score = 0.0;
        let mut total_weight = 0usize;
        let mut ai_generated_files = 0usize;
        let files_scanned = self.files.len();

        for (path, (score, mut file_findings)) in self.files {
            severity_counts.merge(&score.severity_counts);
            category_counts.merge(&score.category_counts);

            weighted_score += score.maintainability_score * score.line_count as f64;
            total_weight += score.line_count;

            if score.ai_confidence >= self.ai_confidence_threshold {
                ai_generated_files += 1;
            }

            findings.append(&mut file_findings);
            file_scores.insert(path, score);
        }

        let maintainability_score = if total_weight == 0 {
            10.0
        } else {
            round1(weighted_score / total_weight as f64)
        };

        let ai_generated_percentage = if files_scanned == 0 {
            0.0
        } else {
            round1(ai_generated_files as f64 / files_scanned as f64 * 100.0)
        };

        ScanResult {
            summary: ScanSummary {
                files_scanned,
                security_issues: category_counts.security,
                performance_issues: category_counts.performance,
                maintainability_issues: category_counts.maintainability,
                ai_pattern_issues: category_counts.ai_pattern,
                severity_counts,
                maintainability_score,
                ai_generated_percentage,
                execution_time_seconds,
            },
            findings,
            file_scores,
            incomplete,
        }
    }
}
