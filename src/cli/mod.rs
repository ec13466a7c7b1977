//! CLI module for SeguChamba
//!
//! Headless access to the document operations. Running the binary without a
//! subcommand opens the window instead.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::{print_error, OutputFormat};

/// SeguChamba - document assistant client
#[derive(Parser, Debug)]
#[command(name = "seguchamba")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Uploaded document management
    Docs {
        #[command(subcommand)]
        command: commands::docs::DocsCommands,
    },

    /// Ask a question about the uploaded documents
    Ask {
        /// Question text
        prompt: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    match cli.command {
        Commands::Docs { command } => commands::docs::run(command, format, quiet).await,
        Commands::Ask { prompt } => commands::ask::run(&prompt, format).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
