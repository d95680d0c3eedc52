//! Rule registry: the authoritative, read-only rule set for a run.
//!
//! Built once from the enabled-analyzer configuration, validated eagerly
//! (a broken rule must never silently produce zero findings), then shared
//! by reference across concurrently scanned files without synchronization.

use crate::core::config::EngineConfig;
use crate::core::error::ConfigError;
use crate::core::severity::{Category, Severity};
use crate::rules::{builtin_rules, MatchScope, MatcherFn, MatcherSpec, RuleSpec, StructuralCheck};
use regex::Regex;
use std::collections::BTreeMap;

/// A rule with its matcher compiled and ready to execute.
#[derive(Debug)]
pub struct CompiledRule {
    pub id: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub matcher: CompiledMatcher,
    pub message: &'static str,
    pub confidence: Option<f64>,
}

#[derive(Debug)]
pub enum CompiledMatcher {
    Pattern { regex: Regex, scope: MatchScope },
    Structural(StructuralCheck),
    Function(MatcherFn),
}

/// Immutable, category-partitioned rule set. Categories iterate in a fixed
/// order and rules keep their declaration order, so registry iteration is
/// deterministic.
#[derive(Debug)]
pub struct RuleRegistry {
    by_category: BTreeMap<Category, Vec<CompiledRule>>,
    rule_count: usize,
}

impl RuleRegistry {
    /// Compiles `specs` filtered to the enabled categories. Fails fast on
    /// invalid configuration, an unparseable pattern, an out-of-range rule
    /// confidence, or an enabled category that ends up with zero rules.
    pub fn build(config: &EngineConfig, specs: Vec<RuleSpec>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut by_category: BTreeMap<Category, Vec<CompiledRule>> = BTreeMap::new();
        for category in config.enabled_categories() {
            by_category.insert(category, Vec::new());
        }

        for spec in specs {
            let Some(bucket) = by_category.get_mut(&spec.category) else {
                continue;
            };

            if let Some(confidence) = spec.confidence {
                if !(0.0..=1.0).contains(&confidence) {
                    return Err(ConfigError::OutOfBounds {
                        name: "rule confidence",
                        expected: "within [0, 1]",
                        value: format!("{confidence} ({})", spec.id),
                    });
                }
            }

            let matcher = match spec.matcher {
                MatcherSpec::Pattern { pattern, scope } => {
                    let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                        rule_id: spec.id.to_string(),
                        source: Box::new(source),
                    })?;
                    CompiledMatcher::Pattern { regex, scope }
                }
                MatcherSpec::Structural(check) => CompiledMatcher::Structural(check),
                MatcherSpec::Function(f) => CompiledMatcher::Function(f),
            };

            bucket.push(CompiledRule {
                id: spec.id,
                category: spec.category,
                severity: spec.severity,
                matcher,
                message: spec.message,
                confidence: spec.confidence,
            });
        }

        for (category, rules) in &by_category {
            if rules.is_empty() {
                return Err(ConfigError::EmptyCategory(*category));
            }
        }

        let rule_count = by_category.values().map(Vec::len).sum();
        Ok(Self {
            by_category,
            rule_count,
        })
    }

    /// Registry over the built-in catalog.
    pub fn with_builtin_rules(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::build(config, builtin_rules())
    }

    pub fn rules_for(&self, category: Category) -> &[CompiledRule] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All rules, category order then declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.by_category.values().flatten()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_category.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AnalyzerToggles;
    use crate::core::severity::Category;

    fn security_only() -> EngineConfig {
        EngineConfig {
            analyzers: AnalyzerToggles {
                security: true,
                performance: false,
                maintainability: false,
                ai_patterns: false,
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn builds_builtin_catalog() {
        let registry = RuleRegistry::with_builtin_rules(&EngineConfig::default()).unwrap();
        assert!(registry.len() > 30);
        assert_eq!(registry.categories().count(), 4);
    }

    #[test]
    fn disabled_categories_are_excluded() {
        let registry = RuleRegistry::with_builtin_rules(&security_only()).unwrap();
        assert_eq!(registry.categories().count(), 1);
        assert!(registry.rules_for(Category::Performance).is_empty());
        assert!(!registry.rules_for(Category::Security).is_empty());
    }

    #[test]
    fn enabled_category_without_rules_fails_fast() {
        let err = RuleRegistry::build(&security_only(), Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCategory(Category::Security)));
    }

    #[test]
    fn invalid_pattern_fails_fast() {
        let specs = vec![RuleSpec::pattern(
            "security.test.broken",
            Category::Security,
            Severity::High,
            r"(unclosed",
            "broken",
        )];
        let err = RuleRegistry::build(&security_only(), specs).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn out_of_range_rule_confidence_fails_fast() {
        let mut config = security_only();
        config.analyzers.ai_patterns = true;
        let specs = vec![
            RuleSpec::pattern(
                "security.test.ok",
                Category::Security,
                Severity::High,
                r"x",
                "ok",
            ),
            RuleSpec::pattern(
                "ai.test.bad",
                Category::AiPattern,
                Severity::Low,
                r"y",
                "bad",
            )
            .with_confidence(1.5),
        ];
        let err = RuleRegistry::build(&config, specs).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfBounds { .. }));
    }

    #[test]
    fn invalid_config_is_rejected_before_compilation() {
        let mut config = security_only();
        config.max_complexity = 0;
        assert!(RuleRegistry::with_builtin_rules(&config).is_err());
    }
}
