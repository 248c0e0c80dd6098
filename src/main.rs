// Copyright 2026 Statuswatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Statuswatch — entry point.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::time::Duration;

use statuswatch::config::{resolve_config_path, Config};
use statuswatch::hypixel::{HypixelClient, StatusProvider};
use statuswatch::rules::RuleChain;
use statuswatch::watcher::Watcher;
use statuswatch::webhook::DiscordWebhook;

#[derive(Parser)]
#[command(
    name = "statuswatch",
    about = "Statuswatch — watch Hypixel player presence and notify a Discord webhook",
    version
)]
struct Cli {
    /// Path to the JSON config file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the watch loop until interrupted (default).
    Run,

    /// Validate the config file and API key, then exit.
    Check,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(cli.config.as_deref()).await,
        Commands::Check => check(cli.config.as_deref()).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "statuswatch", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    result
}

async fn run(config_path: Option<&str>) -> Result<()> {
    let path = resolve_config_path(config_path);
    let config = Config::load(&path)?;
    config.validate()?;

    tracing::info!(
        config = %path.display(),
        "starting statuswatch v{}",
        env!("CARGO_PKG_VERSION")
    );

    let provider = HypixelClient::new(&config.api_key)?;
    let notifier = DiscordWebhook::new(&config.webhook_url)?;
    let watcher = Watcher::new(
        provider,
        notifier,
        RuleChain::new(config.rules),
        config.uuids,
        Duration::from_secs(config.interval_secs),
    );

    let shutdown = watcher.shutdown_handle();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received shutdown signal");
        shutdown.notify_one();
    });

    watcher.run().await
}

async fn check(config_path: Option<&str>) -> Result<()> {
    let path = resolve_config_path(config_path);
    let config = Config::load(&path)?;
    config.validate()?;

    println!("Config OK: {}", path.display());
    println!("  Players: {}", config.uuids.len());
    println!("  Rules:   {}", config.rules.len());

    let provider = HypixelClient::new(&config.api_key)?;
    let code = provider.validate_key().await?;
    println!("  API key: valid (HTTP {code})");

    Ok(())
}
