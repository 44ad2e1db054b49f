//! Implementation of the `yosai show` command.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, CommandOutput};
use crate::cli::CommandContext;
use crate::domain::models::{ConfigValue, ResolvedSettings};
use crate::services::SecretScrubber;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Only print this top-level section
    #[arg(short, long)]
    pub section: Option<String>,

    /// Print secret values instead of redacting them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub source: String,
    pub settings: ConfigValue,
}

impl ShowOutput {
    pub fn new(settings: &ResolvedSettings, args: &ShowArgs) -> Result<Self> {
        let scrubber = SecretScrubber::shared();
        let value = match args.section {
            Some(ref section) => {
                let Some(value) = settings.tree().get(section) else {
                    bail!("unknown settings section: {section}");
                };
                if args.reveal {
                    value.clone()
                } else {
                    scrubber.redact_value(section, value)
                }
            }
            None if args.reveal => ConfigValue::Mapping(settings.tree().clone()),
            None => ConfigValue::Mapping(scrubber.redact_tree(settings.tree())),
        };

        Ok(Self {
            source: settings.source().display().to_string(),
            settings: value,
        })
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        match self.settings {
            ConfigValue::Mapping(ref map) if map.is_empty() => "{}".to_string(),
            ref other => serde_yaml::to_string(other)
                .unwrap_or_default()
                .trim_end()
                .to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ShowArgs, ctx: &CommandContext, json_mode: bool) -> Result<()> {
    let (settings, _logger) = ctx.bootstrap()?;
    output(&ShowOutput::new(&settings, &args)?, json_mode);
    Ok(())
}
