//! Core data model shared by every analyzer: file units, findings,
//! severities, configuration, and the fatal error taxonomy.

pub mod config;
pub mod error;
pub mod file_unit;
pub mod finding;
pub mod severity;

pub use config::{AnalyzerToggles, EngineConfig};
pub use error::ConfigError;
pub use file_unit::{FileUnit, Language};
pub use finding::{Finding, FILE_READ_ERROR_RULE, RULE_FAULT_RULE};
pub use severity::{Category, Severity};
