//! Spar CLI - argue with a generated debate partner
//!
//! # Usage
//!
//! ```bash
//! # Open a debate and reply line by line on stdin
//! spar chat --topic "Is pineapple a good pizza topping?"
//!
//! # Strip markdown from text on stdin
//! echo "**Bold** claim" | spar clean
//!
//! # Show providers and effective settings
//! spar info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

use commands::{chat, clean, info};

/// Spar - a debate partner that argues back
#[derive(Parser)]
#[command(
    name = "spar",
    version,
    about = "Spar - debate any topic with a generated opponent",
    long_about = "Spar picks a stance and depth for every turn, asks the model for a reply,\n\
                  and strips it down to plain conversational text."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Debate a topic interactively
    #[command(name = "chat")]
    Chat(chat::ChatArgs),

    /// Sanitize text from stdin
    #[command(name = "clean")]
    Clean(clean::CleanArgs),

    /// Show providers and configuration
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Chat(args) => chat::run(args).await,
        Commands::Clean(args) => clean::run(args).await,
        Commands::Info(args) => info::run(args).await,
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info,spar_debate=debug",
        2 => "debug",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}

/// Print an error message with an X
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chat() {
        let cli = Cli::parse_from([
            "spar", "-v", "chat", "--topic", "tea", "--provider", "mock",
        ]);
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Chat(_)));
    }
}
