//! Info command - show providers and configuration
//!
//! Usage:
//! ```bash
//! spar info
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use spar_debate::{CacheConfig, DebateConfig};
use spar_llm::LlmConfig;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Probe each configured provider over the network
    #[arg(long)]
    probe: bool,
}

/// Run the info command
pub async fn run(args: InfoArgs) -> Result<()> {
    let llm_config = LlmConfig::from_env();
    let debate = DebateConfig::from_env().context("Invalid debate configuration")?;
    let cache = CacheConfig::default();

    println!("{}", "Spar - debate partner".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!(
        "  {} {}",
        "Version:".dimmed(),
        env!("CARGO_PKG_VERSION").green()
    );
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Provider").fg(Color::Cyan),
            Cell::new("Configured").fg(Color::Cyan),
            Cell::new("Reachable").fg(Color::Cyan),
        ]);

    for name in ["gemini", "ollama", "mock"] {
        let configured = llm_config.is_configured(name);
        let reachable = if args.probe && configured {
            match llm_config.build_provider(Some(name)) {
                Ok(provider) => {
                    if provider.is_available().await {
                        "yes"
                    } else {
                        "no"
                    }
                }
                Err(_) => "no",
            }
        } else {
            "-"
        };
        let marker = if name == llm_config.default_provider {
            format!("{} (default)", name)
        } else {
            name.to_string()
        };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(if configured { "✓" } else { "✗" }),
            Cell::new(reachable),
        ]);
    }
    println!("{}", "Providers:".bold());
    println!("{table}");
    println!("  {} {}", "Model:".dimmed(), llm_config.default_model);
    println!();

    println!("{}", "Debate:".bold());
    println!(
        "  {} {}s",
        "Reply cache TTL:".dimmed(),
        debate.response_ttl.as_secs()
    );
    println!(
        "  {} {}s",
        "Stance cache TTL:".dimmed(),
        debate.sentiment_ttl.as_secs()
    );
    println!("  {} {}", "Opening turns:".dimmed(), debate.bootstrap_turns);
    println!(
        "  {} {} / {}",
        "Temperature (challenging / other):".dimmed(),
        debate.challenging_temperature,
        debate.default_temperature
    );
    println!(
        "  {} {}",
        "Restate stance each turn:".dimmed(),
        debate.restate_policy_each_turn
    );
    println!(
        "  {} {} entries, sweep every {}s",
        "Cache:".dimmed(),
        cache.max_entries,
        cache.sweep_interval.as_secs()
    );
    println!();

    Ok(())
}
