mod gateway;
mod logging;

use cardsift_channels::telegram::TelegramTransport;
use cardsift_core::config::{self, shellexpand, Config};
use cardsift_engine::DecisionEngine;
use cardsift_memory::Store;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "cardsift",
    version,
    about = "Keyword-driven like/skip for profile-card bots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the target bot and start sifting profiles.
    Start,
    /// Show the effective configuration and decision totals.
    Status {
        /// How many recent decisions to list.
        #[arg(short, long, default_value_t = 5)]
        recent: i64,
    },
    /// Classify a profile text offline and print the decision.
    Check {
        /// The profile text.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    let mut cfg = config::load(path)?;
    cfg.apply_overrides(|key| std::env::var(key).ok());
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    // Only the long-running gateway writes a log file.
    let data_dir = matches!(cli.command, Commands::Start).then_some(cfg.cardsift.data_dir.as_str());
    let _log_guard = logging::init(&cfg.cardsift.log_level, data_dir);

    match cli.command {
        Commands::Start => {
            let tg = match cfg.channel.telegram {
                Some(ref tg) if tg.enabled => tg,
                _ => anyhow::bail!(
                    "Telegram is not enabled. Enable [channel.telegram] in {}.",
                    cli.config
                ),
            };
            if tg.api_token.is_empty() {
                anyhow::bail!(
                    "Telegram is enabled but api_token is empty. \
                     Set it in {} or the {} env var.",
                    cli.config,
                    config::ENV_TELEGRAM_TOKEN
                );
            }
            if cfg.target.username().is_empty() {
                anyhow::bail!("target bot is empty. Set [target] bot in {}.", cli.config);
            }

            let transport = Arc::new(TelegramTransport::new(tg));
            let store = Arc::new(Store::new(&cfg.memory).await?);

            println!("cardsift: sifting @{}...", cfg.target.username());
            let gw = gateway::Gateway::new(transport, store, &cfg);
            gw.run().await?;
        }
        Commands::Status { recent } => {
            println!("cardsift status\n");
            println!("Config: {}", cli.config);
            println!("Target: @{}", cfg.target.username());
            println!(
                "Filter: {} include ({:?}), {} exclude, min length {}",
                cfg.filter.include_keywords.len(),
                cfg.filter.include_mode,
                cfg.filter.exclude_keywords.len(),
                cfg.filter.min_text_len
            );
            println!();

            match cfg.channel.telegram {
                Some(ref tg) => println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.api_token.is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing api_token"
                    } else {
                        "disabled"
                    }
                ),
                None => println!("  telegram: not configured"),
            }
            println!();

            let db_path = shellexpand(&cfg.memory.db_path);
            if !Path::new(&db_path).exists() {
                println!("Decisions: none yet ({db_path})");
                return Ok(());
            }

            let store = Store::new(&cfg.memory).await?;
            let counts = store.decision_counts().await?;
            println!(
                "Decisions: {} total, {} like, {} skip",
                counts.total, counts.like, counts.skip
            );
            for row in store.recent_decisions(recent).await? {
                let preview: String = row.text.chars().take(50).collect();
                println!("  {} {:<4} {:<16} {}", row.ts, row.action, row.reason, preview);
            }
        }
        Commands::Check { text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: cardsift check <text>");
            }

            let text = text.join(" ");
            let engine = DecisionEngine::from_config(&cfg.filter);
            let decision = engine.decide(&text);

            println!("action:  {}", decision.action);
            println!("reason:  {}", decision.reason);
            if !decision.matched_include.is_empty() {
                println!("include: {}", decision.matched_include.join(", "));
            }
            if !decision.matched_exclude.is_empty() {
                println!("exclude: {}", decision.matched_exclude.join(", "));
            }
        }
    }

    Ok(())
}
