//! Kansa scan engine.
//!
//! A multi-analyzer static scanner core: independent rule sets for
//! security, performance, maintainability, and AI-generation signals run
//! over each file, their findings normalize into one model, and an
//! aggregator turns them into per-file and run-level scores. Output is
//! deterministic regardless of worker count, and per-file or per-rule
//! faults degrade into diagnostic findings rather than aborting the run.

pub mod aggregate;
pub mod analyzer;
pub mod core;
pub mod filter;
pub mod registry;
pub mod rules;
pub mod runner;

pub use aggregate::{
    Aggregator, CategoryCounts, FileScore, ScanResult, ScanSummary, SeverityCounts,
};
pub use analyzer::{analyze_file, FunctionSpan, LoopSite, StructuralIndex};
pub use core::config::{AnalyzerToggles, EngineConfig};
pub use core::error::ConfigError;
pub use core::file_unit::{FileUnit, Language};
pub use core::finding::{Finding, FILE_READ_ERROR_RULE, RULE_FAULT_RULE};
pub use core::severity::{Category, Severity};
pub use filter::{SeverityFilter, Verdict};
pub use registry::{CompiledMatcher, CompiledRule, RuleRegistry};
pub use rules::{
    builtin_rules, MatchScope, MatchSite, MatcherFn, MatcherSpec, RuleSpec, StructuralCheck,
};
pub use runner::{CancelFlag, FileAccessError, ProvidedFile, ScanEngine};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
