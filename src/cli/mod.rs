//! Command line interface

pub mod commands;
pub mod context;
pub mod display;
pub mod types;

use console::style;
use serde::Serialize;

pub use context::CommandContext;
pub use types::{Cli, Commands};

use crate::domain::ConfigError;

/// Run the parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CommandContext::from_cli(&cli)?;

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &ctx, cli.json).await,
        Commands::Show(args) => commands::show::execute(args, &ctx, cli.json).await,
        Commands::Get(args) => commands::get::execute(args, &ctx, cli.json).await,
        Commands::Rules(args) => commands::rules::execute(args, &ctx, cli.json).await,
        Commands::Watch(args) => commands::watch::execute(args, &ctx, cli.json).await,
    }
}

/// Error body printed in JSON mode.
#[derive(Debug, Serialize)]
struct ErrorReport {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keys: Vec<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    details: serde_json::Value,
}

impl ErrorReport {
    fn new(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ConfigError>() {
            Some(config_err) => Self {
                error: config_err.kind().to_string(),
                message: config_err.to_string(),
                file: Some(config_err.path().display().to_string()),
                keys: config_err.keys(),
                details: match config_err {
                    ConfigError::UnresolvedPlaceholder { keys, .. } => {
                        serde_json::to_value(keys).unwrap_or_default()
                    }
                    ConfigError::TypeMismatch { mismatches, .. } => {
                        serde_json::to_value(mismatches).unwrap_or_default()
                    }
                    ConfigError::InsecureConfiguration { problems, .. } => {
                        serde_json::to_value(problems).unwrap_or_default()
                    }
                    _ => serde_json::Value::Null,
                },
            },
            None => Self {
                error: "Error".to_string(),
                message: format!("{err:#}"),
                file: None,
                keys: vec![],
                details: serde_json::Value::Null,
            },
        }
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!("{} {}", style("error:").red().bold(), self.message)];
        if let Some(ref file) = self.file {
            lines.push(format!("  kind: {}", self.error));
            lines.push(format!("  file: {file}"));
        }
        for key in &self.keys {
            lines.push(format!("  key:  {key}"));
        }
        lines.join("\n")
    }
}

/// Print `err` to stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let report = ErrorReport::new(&err);
    if json_mode {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    } else {
        eprintln!("{}", report.to_human());
    }
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UnresolvedKey;
    use std::path::PathBuf;

    #[test]
    fn test_report_for_config_error() {
        let err = anyhow::Error::from(ConfigError::UnresolvedPlaceholder {
            path: PathBuf::from("config/config.yaml"),
            keys: vec![UnresolvedKey {
                key: "database.password".to_string(),
                missing: vec!["DB_PASSWORD".to_string()],
            }],
        });

        let report = ErrorReport::new(&err);
        assert_eq!(report.error, "UnresolvedPlaceholder");
        assert_eq!(report.file.as_deref(), Some("config/config.yaml"));
        assert_eq!(report.keys, vec!["database.password".to_string()]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["details"][0]["missing"][0], "DB_PASSWORD");
    }

    #[test]
    fn test_report_for_other_error() {
        let report = ErrorReport::new(&anyhow::anyhow!("unknown settings key: app.nope"));
        assert_eq!(report.error, "Error");
        assert!(report.file.is_none());
        assert!(report.to_human().contains("app.nope"));
    }
}
