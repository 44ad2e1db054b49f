//! Implementation of the `yosai check` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{action_success, output, CommandOutput};
use crate::cli::CommandContext;
use crate::domain::models::ResolvedSettings;

#[derive(Args, Debug)]
pub struct CheckArgs {}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub source: String,
    pub overlays: Vec<String>,
    pub environment: String,
    pub bind_address: String,
    pub database: String,
    pub cache: String,
    pub enabled_plugins: Vec<String>,
}

impl CheckOutput {
    pub fn new(ctx: &CommandContext, settings: &ResolvedSettings) -> Self {
        Self {
            valid: true,
            source: settings.source().display().to_string(),
            overlays: ctx
                .source
                .overlays
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            environment: settings.app().environment.clone(),
            bind_address: settings.app().bind_address(),
            database: settings.database().kind.as_str().to_string(),
            cache: settings.cache().kind.as_str().to_string(),
            enabled_plugins: settings
                .enabled_plugins()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![action_success(&format!("Configuration is valid: {}", self.source))];
        for overlay in &self.overlays {
            lines.push(format!("  overlay:     {overlay}"));
        }
        lines.push(format!("  environment: {}", self.environment));
        lines.push(format!("  bind:        {}", self.bind_address));
        lines.push(format!("  database:    {}", self.database));
        lines.push(format!("  cache:       {}", self.cache));
        if self.enabled_plugins.is_empty() {
            lines.push("  plugins:     none".to_string());
        } else {
            lines.push(format!("  plugins:     {}", self.enabled_plugins.join(", ")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: CheckArgs, ctx: &CommandContext, json_mode: bool) -> Result<()> {
    let (settings, _logger) = ctx.bootstrap()?;
    output(&CheckOutput::new(ctx, &settings), json_mode);
    Ok(())
}
