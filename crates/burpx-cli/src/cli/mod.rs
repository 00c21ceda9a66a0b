//! CLI for the burpx sitemap extractor.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{run_completions, run_extract, run_man};

/// Input file looked up in the current directory when `-i` is not given.
pub const DEFAULT_INPUT: &str = "sitemap.xml";

/// Top-level CLI for burpx.
#[derive(Debug, Parser)]
#[command(name = "burpx")]
#[command(about = "burpx: extract a Burp Suite sitemap export into a directory tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract every captured response into files mirroring the site layout.
    Extract(ExtractArgs),

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Path to the Burp Suite XML sitemap export to extract.
    #[arg(short, long, default_value = DEFAULT_INPUT, value_name = "FILE")]
    pub input: PathBuf,

    /// Base directory for the extracted sitemap.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub out: PathBuf,

    /// Write records whose path is already taken with an `_N` suffix.
    #[arg(long)]
    pub dup: bool,

    /// Skip records whose response status is not 2xx.
    #[arg(long)]
    pub skip_non_success: bool,

    /// Skip records whose request method is not GET.
    #[arg(long)]
    pub skip_non_get: bool,

    /// Write a JSON manifest of written and skipped records to FILE.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Additional mime.types file used for extension inference.
    #[arg(long, value_name = "FILE")]
    pub mime_types: Option<PathBuf>,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Extract(args) => run_extract(&args)?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
