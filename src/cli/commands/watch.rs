//! Implementation of the `yosai watch` command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{action_success, output, CommandOutput};
use crate::cli::CommandContext;
use crate::domain::models::ResolvedSettings;
use crate::infrastructure::config::{ConfigWatcher, WatcherConfig};
use crate::services::SettingsStore;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between checks of the configuration files
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ReloadEvent {
    pub event: &'static str,
    pub source: String,
    pub environment: String,
    pub bind_address: String,
}

impl ReloadEvent {
    fn new(event: &'static str, settings: &ResolvedSettings) -> Self {
        Self {
            event,
            source: settings.source().display().to_string(),
            environment: settings.app().environment.clone(),
            bind_address: settings.app().bind_address(),
        }
    }
}

impl CommandOutput for ReloadEvent {
    fn to_human(&self) -> String {
        action_success(&format!(
            "{} {} ({}, {})",
            self.event, self.source, self.environment, self.bind_address
        ))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: WatchArgs, ctx: &CommandContext, json_mode: bool) -> Result<()> {
    let (settings, _logger) = ctx.bootstrap()?;
    output(&ReloadEvent::new("loaded", &settings), json_mode);

    let store = Arc::new(SettingsStore::new(settings));
    let watcher = ConfigWatcher::new(
        ctx.source.clone(),
        ctx.env.clone(),
        ctx.rules,
        Arc::clone(&store),
        WatcherConfig::with_interval(Duration::from_secs(args.interval_secs)),
    );

    let mut updates = store.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let current = Arc::clone(&updates.borrow_and_update());
            output(&ReloadEvent::new("reloaded", &current), json_mode);
        }
    });

    watcher
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for ctrl-c");
            }
        })
        .await;

    printer.abort();
    Ok(())
}
