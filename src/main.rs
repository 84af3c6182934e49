//! semrel — semantic-release configuration CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use semrel::config;
use semrel::constants;
use semrel::env::Env;
use semrel::parser;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command, ConfigArgs, OutputFormat, OverrideArgs, ParseArgs};
use config::{EffectiveConfig, LoadedConfig};

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Install a stderr subscriber; `SEMREL_LOG` overrides the `warn` default.
fn init_logging() {
    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Config(args) => run_config(args),
        Command::Parser(args) => run_parser(args),
        Command::Parse(args) => run_parse(args),
        Command::Version => {
            println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
            Ok(())
        }
    }
}

/// Load the configuration for the requested directory and apply `-D` overrides.
fn load(args: &OverrideArgs) -> Result<LoadedConfig> {
    let dir = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("could not determine working directory")?,
    };
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let mut loaded = config::load_config_from(&dir);
    config::apply_defines(&mut loaded.config, &args.defines);
    Ok(loaded)
}

/// Print the effective configuration.
fn run_config(args: ConfigArgs) -> Result<()> {
    let loaded = load(&args.overrides)?;

    match args.format {
        OutputFormat::Terminal => print!("{}", cli::render_config(&loaded.config, Some(&loaded.outcome))),
        OutputFormat::Toml => print!(
            "{}",
            loaded
                .config
                .to_toml_string()
                .context("failed to render configuration as TOML")?
        ),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&cli::config_to_json(&loaded.config))
                .context("failed to render configuration as JSON")?
        ),
    }

    Ok(())
}

/// Show the selected parser, the registered alternatives, and credential status.
fn run_parser(args: OverrideArgs) -> Result<()> {
    let loaded = load(&args)?;
    let identifier = parser::registry::commit_parser_identifier(&loaded.config)?;
    let selected = select_parser(&loaded.config)?;

    println!(
        "  {} {}  {}",
        "✔".green().bold(),
        identifier.bold(),
        format!("({})", selected.name()).dimmed()
    );

    let registry = parser::ParserRegistry::builtin(&loaded.config);
    println!("\n  {}", "available:".cyan());
    for id in registry.identifiers() {
        println!("    {id}");
    }

    let creds = config::Credentials::from_env(&loaded.config, &Env::real());
    let hvcs = loaded.config.get_str("hvcs").unwrap_or("github");
    let token_status = if creds.hvcs_token.is_some() {
        "set".green()
    } else {
        "missing".yellow()
    };
    println!("\n  {} {token_status}", format!("{hvcs} token:").cyan());

    Ok(())
}

/// Run the configured parser over a single commit message.
fn run_parse(args: ParseArgs) -> Result<()> {
    let loaded = load(&args.overrides)?;
    let selected = select_parser(&loaded.config)?;

    let commit = selected
        .parse(&args.message)
        .with_context(|| format!("{} parser rejected the message", selected.name()))?;

    println!("  {}  {}", "bump:".cyan(), commit.bump.to_string().bold());
    println!("  {}  {}", "kind:".cyan(), commit.kind);
    if let Some(scope) = &commit.scope {
        println!("  {} {scope}", "scope:".cyan());
    }
    for description in &commit.descriptions {
        println!("         {description}");
    }
    for breaking in &commit.breaking_descriptions {
        println!("  {} {breaking}", "BREAKING:".red().bold());
    }

    Ok(())
}

fn select_parser(config: &EffectiveConfig) -> Result<Arc<dyn parser::CommitParser>> {
    parser::current_commit_parser(config).context("improper configuration")
}
