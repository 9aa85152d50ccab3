use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use tracing::info;

use arbor_diff::{compare_nodes, diff_orders, DiffLine, OperationCounts, OrderSummary};
use arbor_types::{codec, Operation, TreeNode};

use crate::cli::*;
use crate::config::ArborConfig;

pub fn run_command(cli: Cli, config: &ArborConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, &cli.format),
        Command::Verify(args) => cmd_verify(args, config),
        Command::Summary(args) => cmd_summary(args, &cli.format),
    }
}

/// Load both trees and merge them into an annotated order.
fn compute_order(initial_path: &Path, new_path: &Path) -> anyhow::Result<TreeNode> {
    info!(path = %initial_path.display(), "reading initial tree");
    let initial = codec::load_tree(initial_path).context("loading initial tree")?;

    info!(path = %new_path.display(), "reading new tree");
    let new = codec::load_tree(new_path).context("loading new tree")?;

    compare_nodes(Some(&initial), Some(&new))
        .ok_or_else(|| anyhow!("comparison returned an empty result; check the input trees"))
}

fn resolve(arg: Option<PathBuf>, configured: &Path) -> PathBuf {
    arg.unwrap_or_else(|| configured.to_path_buf())
}

fn cmd_diff(args: DiffArgs, config: &ArborConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let initial = resolve(args.initial, &config.initial_path);
    let new = resolve(args.new, &config.new_path);
    let order = compute_order(&initial, &new)?;

    if args.stdout {
        println!("{}", codec::to_pretty_string(&order)?);
    } else {
        let output = resolve(args.output, &config.output_path);
        codec::save_tree(&output, &order)?;
        let shown = fs::canonicalize(&output).unwrap_or(output);
        info!(path = %shown.display(), "comparison complete");
        println!("{} Order written to {}", "✓".green().bold(), shown.display().to_string().bold());
    }

    if args.summary {
        print_summary(&OrderSummary::from_tree(&order), format)?;
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs, config: &ArborConfig) -> anyhow::Result<()> {
    let initial = resolve(args.initial, &config.initial_path);
    let new = resolve(args.new, &config.new_path);
    let order = compute_order(&initial, &new)?;

    // Compare raw JSON values so formatting is ignored but every field counts.
    let raw = fs::read_to_string(&args.expected)
        .with_context(|| format!("reading expected order {}", args.expected.display()))?;
    let expected: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing expected order {}", args.expected.display()))?;
    let actual = serde_json::to_value(&order)?;

    if expected == actual {
        println!("{} Order matches {}", "✓".green().bold(), args.expected.display().to_string().bold());
        return Ok(());
    }

    let diff = diff_orders(
        &serde_json::to_string_pretty(&expected)?,
        &serde_json::to_string_pretty(&actual)?,
    );

    println!("{} Order differs from {}", "✗".red().bold(), args.expected.display().to_string().bold());
    println!("{}", "--- expected".red());
    println!("{}", "+++ actual".green());
    for hunk in &diff.hunks {
        println!("{}", hunk.header().cyan());
        for line in &hunk.lines {
            let text = line.to_string();
            match line {
                DiffLine::Added(_) => println!("{}", text.green()),
                DiffLine::Removed(_) => println!("{}", text.red()),
                DiffLine::Context(_) => println!("{}", text.dimmed()),
            }
        }
    }
    bail!(
        "order does not match {} ({} added, {} removed lines)",
        args.expected.display(),
        diff.additions(),
        diff.deletions()
    )
}

fn cmd_summary(args: SummaryArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let order = codec::load_tree(&args.order).context("loading order")?;
    print_summary(&OrderSummary::from_tree(&order), format)
}

fn print_summary(summary: &OrderSummary, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => {
            println!("{:<12}{}", "Nodes:", format_counts(&summary.nodes));
            println!("{:<12}{}", "Attributes:", format_counts(&summary.attributes));
            if !summary.has_changes() {
                println!("\nNo changes required.");
            }
        }
    }
    Ok(())
}

fn format_counts(counts: &OperationCounts) -> String {
    let mut parts: Vec<String> = Operation::ALL
        .iter()
        .map(|op| {
            let label = format!("{} {}", counts.get(*op), op);
            match op {
                Operation::Create => label.green().to_string(),
                Operation::Update => label.yellow().to_string(),
                Operation::Delete => label.red().to_string(),
                Operation::NoAction => label.dimmed().to_string(),
            }
        })
        .collect();
    if counts.unmarked > 0 {
        parts.push(format!("{} unmarked", counts.unmarked));
    }
    parts.push(format!("({} total)", counts.total()));
    parts.join("  ")
}
