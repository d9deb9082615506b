//! Demo table runner: seats a handful of bots at one table and lets them
//! play until the hand limit or the match end.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;

use holdem_engine::bot::{BotContext, SimpleBot};
use holdem_engine::config::Config;
use holdem_engine::game::{Phase, Player};
use holdem_engine::pretty;
use holdem_engine::table::{self, TableEvent, Tables};

#[derive(Parser, Debug)]
#[command(name = "holdem-engine", about = "Run a bot-driven Texas Hold'em table")]
struct Cli {
    /// Path to the TOML config (created with defaults if missing).
    #[arg(long, default_value = "holdem.toml")]
    config: PathBuf,

    /// Override the configured number of bot seats.
    #[arg(long)]
    bots: Option<usize>,

    /// Stop after this many showdowns.
    #[arg(long, default_value_t = 10)]
    hands: u32,

    /// Verbose logging.
    #[arg(long)]
    debug: bool,

    /// Print events as JSON lines instead of human-readable text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "debug".to_string()
    } else {
        "holdem_engine=info,warn".to_string()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .init();

    let mut cfg = Config::load_or_create(&cli.config)
        .with_context(|| format!("loading or creating config '{}'", cli.config.display()))?;
    if let Some(bots) = cli.bots {
        cfg.bots = bots;
    }
    let seats = cfg.bots.max(2);
    tracing::info!(
        config = %cli.config.display(),
        seats,
        small_blind = cfg.small_blind,
        big_blind = cfg.big_blind,
        "starting demo table"
    );

    let players = (0..seats)
        .map(|i| Player::new(format!("Bot {}", i + 1), format!("bot-{}", i + 1), cfg.buy_in))
        .collect::<Result<Vec<_>, _>>()
        .context("building bot roster")?;

    let tables = Tables::new(cfg.pacing());
    let game_id = "table-1";
    let handle = tables
        .create(game_id, players, cfg.small_blind, cfg.big_blind)
        .await?;
    let mut events = handle.subscribe();
    // the registry keeps the table alive; holding on here would keep
    // pacing tasks from noticing its removal
    drop(handle);

    table::start_new_hand(&tables, game_id).await?;

    let bot = SimpleBot::default();
    let color = std::io::stdout().is_terminal() && !cli.json;
    let mut hands_played = 0u32;

    loop {
        let event = match events.recv().await {
            Ok(ev) => ev,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event stream lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        if cli.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{}", pretty::format_event(&event, color));
        }

        match &event {
            TableEvent::State(snapshot) => {
                if snapshot.game_over || snapshot.phase == Phase::Showdown {
                    continue;
                }
                let Some(actor) = snapshot.to_act.clone() else {
                    continue;
                };
                let Some(ctx) = BotContext::from_snapshot(snapshot, &actor) else {
                    continue;
                };
                let decision = bot.decide(&ctx);
                if let Err(e) =
                    table::process_player_action(&tables, game_id, &actor, decision).await
                {
                    // snapshots race with pacing; a stale decision is expected noise
                    tracing::debug!(error = %e, "bot decision dropped");
                }
            }
            TableEvent::ShowdownResult { .. } => {
                hands_played += 1;
                if hands_played >= cli.hands {
                    tracing::info!(hands_played, "hand limit reached, closing the table");
                    tables.remove(game_id).await;
                }
            }
            _ => {}
        }
    }

    tracing::info!(hands_played, "table closed");
    Ok(())
}
