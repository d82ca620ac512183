//! gdcruiser CLI tool.
//!
//! Usage:
//! ```bash
//! gdcruiser check [OPTIONS] [PATH]
//! gdcruiser validate [PATH]
//! gdcruiser init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Dependency analyzer and architecture rule checker for Godot projects
#[derive(Parser)]
#[command(name = "gdcruiser")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project: build the graph, detect cycles, evaluate rules
    Check {
        /// Godot project path (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the report to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip cycle detection
        #[arg(long)]
        no_cycles: bool,

        /// Skip rule evaluation
        #[arg(long)]
        ignore_rules: bool,

        /// Exclude glob patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Validate the configuration file without analyzing
    Validate {
        /// Project path used for config discovery (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for analysis reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// GraphViz DOT.
    Dot,
    /// Mermaid flowchart.
    Mermaid,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            output,
            no_cycles,
            ignore_rules,
            exclude,
        } => {
            let config_file = config_resolver::locate(&path, cli.config.as_deref())?;
            let options = commands::check::CheckOptions {
                format,
                output,
                detect_cycles: !no_cycles,
                evaluate_rules: !ignore_rules,
                exclude,
            };
            commands::check::run(&path, &options, config_file.as_ref())
        }
        Commands::Validate { path } => {
            let config_file = config_resolver::locate(&path, cli.config.as_deref())?;
            commands::validate::run(config_file.as_ref())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
