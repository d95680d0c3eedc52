use crate::core::severity::Category;
use thiserror::Error;

/// Fatal configuration problems, surfaced at registry-build time before
/// any file is scanned. Everything else the engine encounters mid-run is
/// converted into diagnostic findings instead of being thrown upward.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no analyzers enabled")]
    NoAnalyzersEnabled,

    #[error("analyzer '{0}' is enabled but has no rules")]
    EmptyCategory(Category),

    #[error("rule '{rule_id}': invalid pattern")]
    InvalidPattern {
        rule_id: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("{name} must be {expected}, got {value}")]
    OutOfBounds {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
