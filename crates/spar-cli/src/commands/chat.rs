//! Chat command - debate a topic on stdin/stdout
//!
//! Usage:
//! ```bash
//! spar chat --topic "Cities should ban cars" --provider gemini
//! spar chat --topic "Tabs or spaces" --provider mock --transcript debate.json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use spar_debate::{CacheConfig, DebateCache, DebateConfig, ResponseOrchestrator};
use spar_llm::LlmConfig;

use crate::{print_error, print_warning};

/// Arguments for the chat command
#[derive(Args)]
pub struct ChatArgs {
    /// Topic to open the debate with
    #[arg(short, long)]
    topic: String,

    /// Model backend: gemini, ollama or mock
    #[arg(short, long, env = "SPAR_PROVIDER")]
    provider: Option<String>,

    /// Write the transcript as JSON when the debate ends
    #[arg(long)]
    transcript: Option<PathBuf>,
}

/// Run the chat command
pub async fn run(args: ChatArgs) -> Result<()> {
    let llm = LlmConfig::from_env()
        .build_provider(args.provider.as_deref())
        .context("Failed to set up model provider")?;
    let config = DebateConfig::from_env().context("Invalid debate configuration")?;
    tracing::info!(provider = %llm.name(), "Model provider ready");

    let cache = Arc::new(DebateCache::new(CacheConfig::default()));
    let sweeper = cache.spawn_sweeper();

    let spar = ResponseOrchestrator::new(llm, cache, config);

    println!("{} {}", "Topic:".bold().cyan(), args.topic);
    let mut session = spar
        .open(&args.topic)
        .await
        .context("Could not open the debate")?;
    if let Some(opening) = session.last() {
        println!("{} {}\n", "spar ›".green().bold(), opening.content);
    }

    println!("{}", "Type your reply, or /quit to stop.".dimmed());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" {
            break;
        }

        match spar.reply(&mut session, message).await {
            Ok(reply) => println!("{} {}\n", "spar ›".green().bold(), reply),
            Err(e) => {
                print_error(&e.to_string());
                print_warning("That turn was not recorded; try again.");
            }
        }
    }

    if let Some(path) = args.transcript {
        let json = serde_json::to_string_pretty(&session)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
        println!("{} {}", "Transcript saved:".dimmed(), path.display());
    }

    sweeper.abort();
    Ok(())
}
