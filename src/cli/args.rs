//! Clap argument types.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Resolve the effective semantic-release configuration of a project.
#[derive(Parser, Debug)]
#[command(name = "semrel", version = semrel::constants::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration.
    Config(ConfigArgs),

    /// Show which commit parser the configuration selects.
    Parser(OverrideArgs),

    /// Parse a commit message with the configured parser.
    Parse(ParseArgs),

    /// Print version information.
    Version,
}

/// Options shared by every command that loads the configuration.
#[derive(clap::Args, Debug, Default)]
pub struct OverrideArgs {
    /// Project directory holding pyproject.toml (default: current directory).
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Override a setting, e.g. `-D hvcs=gitlab`. Repeatable.
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub defines: Vec<String>,
}

/// Arguments for the `config` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the `parse` subcommand.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// The full commit message (subject, body and footers).
    pub message: String,
}

/// Output format for the effective configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, colored key/value listing.
    #[default]
    Terminal,
    /// Flat TOML document.
    Toml,
    /// JSON object.
    Json,
}
