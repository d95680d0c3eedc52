use crate::core::error::ConfigError;
use crate::core::severity::{Category, Severity};
use serde::{Deserialize, Serialize};

/// Engine configuration. Values outside declared bounds fail validation
/// with a [`ConfigError`] at registry-build time; nothing is silently
/// clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub analyzers: AnalyzerToggles,

    /// Minimum severity shown in reports. Display-only; the pass/fail
    /// decision never looks at it.
    pub severity_threshold: Severity,

    /// The run fails iff any finding sits at or above this level.
    pub fail_level: Severity,

    /// A file counts as AI-generated when its strongest AiPattern signal
    /// reaches this confidence.
    pub ai_confidence_threshold: f64,

    pub max_complexity: usize,
    pub max_function_length: usize,
    pub max_line_length: usize,
    pub max_parameters: usize,

    /// Source excerpts attached to findings are truncated to this many
    /// characters.
    pub max_snippet_length: usize,

    /// Worker pool size; `None` uses the available hardware concurrency.
    pub workers: Option<usize>,

    /// Path fragments excluded from discovery. Consumed by the provider
    /// upstream of the engine; carried here so one config file covers both.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerToggles {
    pub security: bool,
    pub performance: bool,
    pub maintainability: bool,
    pub ai_patterns: bool,
}

impl Default for AnalyzerToggles {
    fn default() -> Self {
        Self {
            security: true,
            performance: true,
            maintainability: true,
            ai_patterns: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            analyzers: AnalyzerToggles::default(),
            severity_threshold: Severity::Medium,
            fail_level: Severity::Critical,
            ai_confidence_threshold: 0.7,
            max_complexity: 10,
            max_function_length: 50,
            max_line_length: 120,
            max_parameters: 5,
            max_snippet_length: 160,
            workers: None,
            exclude: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "__pycache__".to_string(),
                "target".to_string(),
                "venv".to_string(),
                ".min.js".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Security => self.analyzers.security,
            Category::Performance => self.analyzers.performance,
            Category::Maintainability => self.analyzers.maintainability,
            Category::AiPattern => self.analyzers.ai_patterns,
        }
    }

    pub fn enabled_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_categories().is_empty() {
            return Err(ConfigError::NoAnalyzersEnabled);
        }
        if !(0.0..=1.0).contains(&self.ai_confidence_threshold) {
            return Err(ConfigError::OutOfBounds {
                name: "ai_confidence_threshold",
                expected: "within [0, 1]",
                value: self.ai_confidence_threshold.to_string(),
            });
        }
        for (name, value) in [
            ("max_complexity", self.max_complexity),
            ("max_function_length", self.max_function_length),
            ("max_line_length", self.max_line_length),
            ("max_parameters", self.max_parameters),
            ("max_snippet_length", self.max_snippet_length),
        ] {
            if value == 0 {
                return Err(ConfigError::OutOfBounds {
                    name,
                    expected: "a positive integer",
                    value: value.to_string(),
                });
            }
        }
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(ConfigError::OutOfBounds {
                    name: "workers",
                    expected: "a positive integer",
                    value: workers.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_bounds_threshold_is_rejected_not_clamped() {
        let mut config = EngineConfig::default();
        config.ai_confidence_threshold = 1.2;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBounds { name: "ai_confidence_threshold", .. })
        ));
    }

    #[test]
    fn zero_tunables_are_rejected() {
        let mut config = EngineConfig::default();
        config.max_complexity = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.workers = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn all_analyzers_disabled_is_rejected() {
        let mut config = EngineConfig::default();
        config.analyzers = AnalyzerToggles {
            security: false,
            performance: false,
            maintainability: false,
            ai_patterns: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoAnalyzersEnabled)
        ));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"severity_threshold": "high", "max_complexity": 15}"#)
                .unwrap();
        assert_eq!(config.severity_threshold, Severity::High);
        assert_eq!(config.max_complexity, 15);
        assert_eq!(config.max_function_length, 50);
        assert!(config.analyzers.ai_patterns);
    }
}
