//! Implementation of the `yosai get` command.

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, CommandOutput};
use crate::cli::CommandContext;
use crate::domain::models::{ConfigValue, ResolvedSettings};
use crate::services::SecretScrubber;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted settings path, e.g. `database.host`
    pub key: String,

    /// Print the value even if the key looks like a secret
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Debug, Serialize)]
pub struct GetOutput {
    pub key: String,
    pub value: ConfigValue,
}

impl GetOutput {
    pub fn new(settings: &ResolvedSettings, args: &GetArgs) -> Result<Self> {
        let value = settings
            .get(&args.key)
            .ok_or_else(|| anyhow!("unknown settings key: {}", args.key))?;
        let value = if args.reveal {
            value.clone()
        } else {
            SecretScrubber::shared().redact_value(&args.key, value)
        };
        Ok(Self {
            key: args.key.clone(),
            value,
        })
    }
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        if self.value.is_scalar() {
            self.value.to_string()
        } else {
            serde_yaml::to_string(&self.value)
                .unwrap_or_default()
                .trim_end()
                .to_string()
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: GetArgs, ctx: &CommandContext, json_mode: bool) -> Result<()> {
    let (settings, _logger) = ctx.bootstrap()?;
    output(&GetOutput::new(&settings, &args)?, json_mode);
    Ok(())
}
