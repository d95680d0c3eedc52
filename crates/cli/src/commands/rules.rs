//! Rules command: print the built-in catalog grouped by category.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use kansa_engine::{builtin_rules, Category};

#[derive(Args)]
pub struct RulesArgs {
    /// Only list rules for one category
    #[arg(long)]
    pub category: Option<String>,
}

pub fn execute(args: RulesArgs) -> Result<()> {
    let rules = builtin_rules();

    for category in Category::ALL {
        if let Some(filter) = &args.category {
            if category.to_string() != *filter {
                continue;
            }
        }

        let in_category: Vec<_> = rules.iter().filter(|r| r.category == category).collect();
        if in_category.is_empty() {
            continue;
        }

        println!("\n{} ({} rules)", category.to_string().bold(), in_category.len());
        for rule in in_category {
            let confidence = rule
                .confidence
                .map(|c| format!("  confidence {:.0}%", c * 100.0))
                .unwrap_or_default();
            println!(
                "  {} {:<40} {}{}",
                rule.severity.emoji(),
                rule.id,
                rule.message,
                confidence.dimmed()
            );
        }
    }

    Ok(())
}
