use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arbor",
    about = "Arbor -- structural tree diff producing change orders",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./arbor.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two trees and write the annotated order
    Diff(DiffArgs),
    /// Compare two trees and check the order against an expected file
    Verify(VerifyArgs),
    /// Count the operations in an existing order
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Initial tree (defaults to the configured initial_path)
    pub initial: Option<PathBuf>,
    /// New tree (defaults to the configured new_path)
    pub new: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print the order instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
    /// Also print operation counts
    #[arg(short, long)]
    pub summary: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub initial: Option<PathBuf>,
    pub new: Option<PathBuf>,
    /// Expected order, compared as JSON values: formatting is ignored, but
    /// every field must match the written order, including its canonical names
    #[arg(short, long)]
    pub expected: PathBuf,
}

#[derive(Args)]
pub struct SummaryArgs {
    pub order: PathBuf,
}
