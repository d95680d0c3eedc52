//! Rule execution over a single file unit.
//!
//! The structural index is built once per file and every rule reads it.
//! Rules are isolated: a faulting matcher contributes zero findings for
//! that file plus one diagnostic finding, and analysis continues with the
//! next rule. Nothing a rule does can abort the file, let alone the run.

use crate::analyzer::index::StructuralIndex;
use crate::core::config::EngineConfig;
use crate::core::file_unit::FileUnit;
use crate::core::finding::Finding;
use crate::registry::{CompiledMatcher, CompiledRule, RuleRegistry};
use crate::rules::{MatchScope, MatchSite, StructuralCheck};
use anyhow::Result;
use tracing::warn;

/// Applies every active rule to one file and returns its findings in the
/// deterministic per-file order: line, then column, then rule id.
/// Duplicate sites (same rule, line, column) collapse to one finding.
pub fn analyze_file(
    unit: &FileUnit,
    registry: &RuleRegistry,
    config: &EngineConfig,
) -> Vec<Finding> {
    let index = StructuralIndex::build(unit);
    let mut findings = Vec::new();

    for rule in registry.iter() {
        match run_rule(rule, unit, &index, config) {
            Ok(sites) => {
                for site in sites {
                    findings.push(finding_from_site(rule, unit, site));
                }
            }
            Err(error) => {
                warn!(rule = rule.id, file = %unit.path, %error, "rule execution failed");
                findings.push(Finding::rule_fault(&unit.path, rule.id, &format!("{error:#}")));
            }
        }
    }

    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    findings.dedup_by(|a, b| a.rule_id == b.rule_id && a.line == b.line && a.column == b.column);
    findings
}

fn finding_from_site(rule: &CompiledRule, unit: &FileUnit, site: MatchSite) -> Finding {
    let message = site.detail.unwrap_or_else(|| rule.message.to_string());
    let mut finding = Finding::new(rule.id, rule.category, rule.severity, message).at(
        &unit.path,
        site.line,
        site.column,
    );
    if let Some(confidence) = rule.confidence {
        finding = finding.with_confidence(confidence);
    }
    if let Some(snippet) = site.snippet {
        finding = finding.with_snippet(snippet);
    }
    finding
}

fn run_rule(
    rule: &CompiledRule,
    unit: &FileUnit,
    index: &StructuralIndex,
    config: &EngineConfig,
) -> Result<Vec<MatchSite>> {
    match &rule.matcher {
        CompiledMatcher::Pattern { regex, scope } => {
            Ok(run_pattern(regex, *scope, unit, index, config))
        }
        CompiledMatcher::Structural(check) => Ok(run_structural(*check, unit, index, config)),
        CompiledMatcher::Function(matcher) => matcher(unit, index),
    }
}

fn run_pattern(
    regex: &regex::Regex,
    scope: MatchScope,
    unit: &FileUnit,
    index: &StructuralIndex,
    config: &EngineConfig,
) -> Vec<MatchSite> {
    let mut sites = Vec::new();
    for m in regex.find_iter(&unit.content) {
        let in_scope = match scope {
            MatchScope::Code => index.is_code(m.start()),
            MatchScope::Comment => index.in_comment(m.start()),
            MatchScope::Any => true,
        };
        if !in_scope {
            continue;
        }
        let (line, column) = index.position(m.start());
        sites.push(
            MatchSite::new(line, column)
                .with_snippet(snippet_for(unit, index, line, config.max_snippet_length)),
        );
    }
    sites
}

/// The trimmed source line, truncated to the configured excerpt length.
fn snippet_for(unit: &FileUnit, index: &StructuralIndex, line: usize, max_len: usize) -> String {
    let start = index.line_start(line);
    let text = unit.content[start..]
        .lines()
        .next()
        .unwrap_or_default()
        .trim();
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len).collect();
        format!("{truncated}…")
    }
}

/// Nesting deeper than six four-space levels reads as a structural smell
/// regardless of the configured limits.
const MAX_INDENT_WIDTH: usize = 24;

fn run_structural(
    check: StructuralCheck,
    unit: &FileUnit,
    index: &StructuralIndex,
    config: &EngineConfig,
) -> Vec<MatchSite> {
    let mut sites = Vec::new();
    match check {
        StructuralCheck::LongLine => {
            for (idx, line) in unit.content.lines().enumerate() {
                let length = line.chars().count();
                if length > config.max_line_length {
                    sites.push(MatchSite::new(idx + 1, 1).with_detail(format!(
                        "Line is {length} characters long (limit {})",
                        config.max_line_length
                    )));
                }
            }
        }
        StructuralCheck::LongFunction => {
            for function in index.functions() {
                let span = function.line_span();
                if span > config.max_function_length {
                    sites.push(MatchSite::new(function.start_line, 1).with_detail(format!(
                        "Function '{}' is {span} lines long (limit {})",
                        function.name, config.max_function_length
                    )));
                }
            }
        }
        StructuralCheck::TooManyParameters => {
            for function in index.functions() {
                if function.parameter_count > config.max_parameters {
                    sites.push(MatchSite::new(function.start_line, 1).with_detail(format!(
                        "Function '{}' takes {} parameters (limit {})",
                        function.name, function.parameter_count, config.max_parameters
                    )));
                }
            }
        }
        StructuralCheck::HighComplexity => {
            for function in index.functions() {
                let complexity = function.complexity();
                if complexity > config.max_complexity {
                    sites.push(MatchSite::new(function.start_line, 1).with_detail(format!(
                        "Function '{}' has complexity {complexity} (limit {})",
                        function.name, config.max_complexity
                    )));
                }
            }
        }
        StructuralCheck::DeepNesting => {
            for (idx, line) in unit.content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let width = line
                    .chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .map(|c| if c == '\t' { 4 } else { 1 })
                    .sum::<usize>();
                if width > MAX_INDENT_WIDTH {
                    sites.push(MatchSite::new(idx + 1, 1).with_detail(format!(
                        "Code is nested {width} columns deep; extract a helper"
                    )));
                }
            }
        }
        StructuralCheck::DeeplyNestedLoops => {
            for site in index.loop_sites() {
                if site.depth >= 3 {
                    sites.push(MatchSite::new(site.line, site.column).with_detail(format!(
                        "Loop nested {} levels deep",
                        site.depth
                    )));
                }
            }
        }
    }
    sites
}
