//! Clean command - sanitize text from stdin or a file
//!
//! Usage:
//! ```bash
//! spar clean < reply.md
//! spar clean --file reply.md
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Arguments for the clean command
#[derive(Args)]
pub struct CleanArgs {
    /// Read from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
}

/// Run the clean command
pub async fn run(args: CleanArgs) -> Result<()> {
    let raw = match args.file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read stdin")?;
            raw
        }
    };

    println!("{}", spar_debate::clean(&raw));
    Ok(())
}
