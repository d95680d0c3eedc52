//! Scan command: discover file units, run the engine, render the report,
//! and map the verdict onto the process exit status.
//!
//! Rendering is a consumer of the engine's `ScanResult`; nothing here
//! feeds back into scoring. The displayed finding list honors the severity
//! threshold, while the pass/fail decision is computed from the unfiltered
//! summary, so lowering the display threshold never changes CI behavior.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use kansa_engine::{Finding, ScanEngine, ScanResult, Severity, SeverityFilter, Verdict};
use std::path::PathBuf;

use crate::config_file;
use crate::provider;

#[derive(Args)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub format: ReportFormat,

    /// Minimum severity shown in the report
    #[arg(long, value_enum)]
    pub severity: Option<SeverityArg>,

    /// Severity at or above which the scan fails
    #[arg(long, value_enum)]
    pub fail_on: Option<SeverityArg>,

    /// Worker pool size (defaults to available cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Configuration file (defaults to .kansa.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable the AI-generation analyzer
    #[arg(long)]
    pub no_ai: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum ReportFormat {
    Console,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum SeverityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::Low => Severity::Low,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::High => Severity::High,
            SeverityArg::Critical => Severity::Critical,
        }
    }
}

pub fn execute(args: ScanArgs) -> Result<()> {
    let mut config = config_file::load(args.config.as_deref())?;
    if let Some(severity) = args.severity {
        config.severity_threshold = severity.into();
    }
    if let Some(fail_on) = args.fail_on {
        config.fail_level = fail_on.into();
    }
    if args.workers.is_some() {
        config.workers = args.workers;
    }
    if args.no_ai {
        config.analyzers.ai_patterns = false;
    }

    let engine = ScanEngine::new(config.clone()).context("invalid configuration")?;

    let files = provider::collect(&args.paths, &config.exclude)?;
    if args.verbose {
        println!("📁 Collected {} file(s) to scan", files.len());
    }

    let result = engine.run(files);
    let verdict = Verdict::evaluate(&result.summary, config.fail_level);
    let shown = SeverityFilter::new(config.severity_threshold).apply(&result);

    match args.format {
        ReportFormat::Console => render_console(&result, &shown, verdict, args.verbose),
        ReportFormat::Json => println!("{}", result.to_json()?),
    }

    if verdict.is_failing() {
        std::process::exit(1);
    }
    Ok(())
}

fn render_console(result: &ScanResult, shown: &[Finding], verdict: Verdict, verbose: bool) {
    let summary = &result.summary;

    println!("\n{}", "📊 Scan Summary".bold());
    if result.incomplete {
        println!("{}", "⚠️  Run was cancelled; results are partial".yellow());
    }
    println!("   Files scanned:     {}", summary.files_scanned);
    println!(
        "   Security issues:   {}  Performance issues: {}",
        summary.security_issues, summary.performance_issues
    );
    println!(
        "   Maintainability:   {:.1}/10  AI-generated: {:.1}%",
        summary.maintainability_score, summary.ai_generated_percentage
    );
    println!("   Elapsed:           {:.2}s", summary.execution_time_seconds);

    if shown.is_empty() {
        println!("\n✅ No findings at or above the severity threshold");
    } else {
        println!("\n⚠️  {} finding(s):", shown.len());
        for (i, finding) in shown.iter().enumerate() {
            println!(
                "\n{}. {} {}: {}",
                i + 1,
                finding.severity.emoji(),
                finding.severity,
                finding.message.bold()
            );
            println!(
                "   {}:{}:{}  [{}]",
                finding.file, finding.line, finding.column, finding.rule_id
            );
            if let Some(confidence) = finding.confidence {
                println!("   Confidence: {:.0}%", confidence * 100.0);
            }
            if verbose {
                if let Some(snippet) = &finding.snippet {
                    println!("   {}", snippet.dimmed());
                }
            }
        }
    }

    match verdict {
        Verdict::Failing => println!("\n{}", "❌ FAILING".bright_red().bold()),
        Verdict::Passing => println!("\n{}", "✅ PASSING".bright_green().bold()),
    }
}
