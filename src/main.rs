//! Script Treemap CLI
//!
//! Turns page artifacts (scripts, source-map bundles, coverage) into a
//! treemap report of bytes per source.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use script_treemap::commands::{
    display_schema, display_version, execute_build, validate_args, validate_report_file,
    BuildArgs,
};
use script_treemap::utils::config::DEFAULT_TOP_SOURCES;

/// Script Treemap - bytes, unused code and duplication per source file
#[derive(Parser, Debug)]
#[command(name = "script-treemap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a treemap from page artifacts
    Build {
        /// Page artifacts JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the treemap JSON
        #[arg(short, long, default_value = "treemap.json")]
        output: PathBuf,

        /// Number of largest sources to list in the summary
        #[arg(long, default_value_t = DEFAULT_TOP_SOURCES)]
        top_sources: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate a treemap JSON file
    Validate {
        /// Path to treemap JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Build {
            input,
            output,
            top_sources,
            summary,
            compact,
        } => {
            let args = BuildArgs {
                input,
                output,
                top_sources,
                print_summary: summary,
                compact,
            };

            validate_args(&args)?;
            execute_build(&args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
