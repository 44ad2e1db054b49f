//! Implementation of the `yosai rules` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::cli::CommandContext;
use crate::domain::models::{Environment, OverrideRule};
use crate::services::{SecretScrubber, REDACTED};

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list rules whose variable is set
    #[arg(long)]
    pub set_only: bool,
}

#[derive(Debug, Serialize)]
pub struct RuleRow {
    pub env: &'static str,
    pub path: &'static str,
    pub set: bool,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RulesOutput {
    pub rules: Vec<RuleRow>,
}

impl RulesOutput {
    pub fn new(rules: &[OverrideRule], env: &Environment, set_only: bool) -> Self {
        let scrubber = SecretScrubber::shared();
        let rules = rules
            .iter()
            .map(|rule| {
                let value = env.get(rule.env).map(|value| {
                    if scrubber.is_secret_path(rule.path) && !value.is_empty() {
                        REDACTED.to_string()
                    } else {
                        value.to_string()
                    }
                });
                RuleRow {
                    env: rule.env,
                    path: rule.path,
                    set: value.is_some(),
                    value,
                }
            })
            .filter(|row| row.set || !set_only)
            .collect();
        Self { rules }
    }
}

impl CommandOutput for RulesOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["env", "path", "value"]);
        for row in &self.rules {
            let value = row.value.as_deref().unwrap_or("-");
            table.add_row(vec![row.env, row.path, value]);
        }
        render_list("rule", &table, self.rules.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RulesArgs, ctx: &CommandContext, json_mode: bool) -> Result<()> {
    output(&RulesOutput::new(ctx.rules, &ctx.env, args.set_only), json_mode);
    Ok(())
}
