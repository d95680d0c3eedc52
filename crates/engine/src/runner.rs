//! Scan engine: parallel execution of the analyzer over a file-unit
//! sequence.
//!
//! Files are independent, so the fan-out axis is the file. A bounded rayon
//! pool caps peak memory at one file's content plus its structural index
//! per worker; idle workers steal the next pending file so one slow file
//! does not stall the run. Findings accumulate in worker-local buffers and
//! meet only at the aggregator, keeping the hot loop lock-free.

use crate::aggregate::{Aggregator, FileScore, ScanResult};
use crate::analyzer::analyze_file;
use crate::core::config::EngineConfig;
use crate::core::error::ConfigError;
use crate::core::file_unit::FileUnit;
use crate::core::finding::Finding;
use crate::registry::RuleRegistry;
use crate::rules::RuleSpec;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// A file the provider could not read or decode. The engine converts it
/// into a synthetic diagnostic finding instead of aborting the run.
#[derive(Debug, Clone)]
pub struct FileAccessError {
    pub path: String,
    pub detail: String,
}

/// What the file unit provider hands the engine, one entry per discovered
/// file.
pub type ProvidedFile = Result<FileUnit, FileAccessError>;

/// Cooperative cancellation handle. Cancelling stops new files from being
/// picked up; in-flight analyses finish and the result is tagged
/// incomplete.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Ties a validated registry and configuration together and runs scans.
#[derive(Debug)]
pub struct ScanEngine {
    registry: Arc<RuleRegistry>,
    config: EngineConfig,
}

impl ScanEngine {
    /// Engine over the built-in rule catalog. Fails fast on invalid
    /// configuration, before any file is touched.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let registry = RuleRegistry::with_builtin_rules(&config)?;
        Ok(Self {
            registry: Arc::new(registry),
            config,
        })
    }

    /// Engine over a caller-supplied rule set.
    pub fn with_rules(config: EngineConfig, specs: Vec<RuleSpec>) -> Result<Self, ConfigError> {
        let registry = RuleRegistry::build(&config, specs)?;
        Ok(Self {
            registry: Arc::new(registry),
            config,
        })
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run(&self, files: Vec<ProvidedFile>) -> ScanResult {
        self.run_with_cancel(files, &CancelFlag::new())
    }

    /// Scans every provided file and aggregates the results. Always returns
    /// a usable report: per-file and per-rule faults become diagnostic
    /// findings, and cancellation yields a consistent partial result.
    pub fn run_with_cancel(&self, files: Vec<ProvidedFile>, cancel: &CancelFlag) -> ScanResult {
        let start = Instant::now();
        let provided = files.len();
        debug!(files = provided, rules = self.registry.len(), "starting scan");

        let analyses: Vec<Option<(FileScore, Vec<Finding>)>> =
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers.unwrap_or(0))
                .build()
            {
                Ok(pool) => pool.install(|| {
                    files
                        .par_iter()
                        .map(|file| self.analyze_one(file, cancel))
                        .collect()
                }),
                Err(error) => {
                    warn!(%error, "worker pool unavailable, scanning sequentially");
                    files
                        .iter()
                        .map(|file| self.analyze_one(file, cancel))
                        .collect()
                }
            };

        let mut aggregator = Aggregator::new(self.config.ai_confidence_threshold);
        for analysis in analyses.into_iter().flatten() {
            let (score, findings) = analysis;
            aggregator.add_file(score, findings);
        }

        let incomplete = cancel.is_cancelled() && aggregator.files_seen() < provided;
        let result = aggregator.finalize(start.elapsed().as_secs_f64(), incomplete);
        debug!(
            files = result.summary.files_scanned,
            findings = result.findings.len(),
            incomplete,
            "scan finished"
        );
        result
    }

    fn analyze_one(
        &self,
        file: &ProvidedFile,
        cancel: &CancelFlag,
    ) -> Option<(FileScore, Vec<Finding>)> {
        if cancel.is_cancelled() {
            return None;
        }
        match file {
            Ok(unit) => {
                let findings = analyze_file(unit, &self.registry, &self.config);
                let score = FileScore::compute(&unit.path, unit.line_count, &findings);
                Some((score, findings))
            }
            Err(error) => {
                warn!(file = %error.path, detail = %error.detail, "file unreadable");
                let findings = vec![Finding::file_read_error(&error.path, &error.detail)];
                let score = FileScore::compute(&error.path, 0, &findings);
                Some((score, findings))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_valid_run() {
        let engine = ScanEngine::new(EngineConfig::default()).unwrap();
        let result = engine.run(Vec::new());
        assert_eq!(result.summary.files_scanned, 0);
        assert_eq!(result.summary.maintainability_score, 10.0);
        assert!(!result.incomplete);
    }

    #[test]
    fn pre_cancelled_run_is_incomplete_but_consistent() {
        let engine = ScanEngine::new(EngineConfig::default()).unwrap();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let files = vec![Ok(FileUnit::new("a.py", "eval(x)\n"))];
        let result = engine.run_with_cancel(files, &cancel);

        assert!(result.incomplete);
        assert_eq!(result.summary.files_scanned, 0);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn unreadable_file_becomes_a_diagnostic_finding() {
        let engine = ScanEngine::new(EngineConfig::default()).unwrap();
        let files = vec![Err(FileAccessError {
            path: "broken.py".to_string(),
            detail: "stream did not contain valid UTF-8".to_string(),
        })];
        let result = engine.run(files);

        assert_eq!(result.summary.files_scanned, 1);
        assert_eq!(result.findings.len(), 1);
        assert!(result.findings[0].is_diagnostic());
        assert_eq!(result.findings[0].file, "broken.py");
    }
}
