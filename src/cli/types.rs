//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::get::GetArgs;
use crate::cli::commands::rules::RulesArgs;
use crate::cli::commands::show::ShowArgs;
use crate::cli::commands::watch::WatchArgs;

#[derive(Parser, Debug)]
#[command(name = "yosai")]
#[command(about = "Yosai Intel - resolve, inspect and watch dashboard configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (discovered from YOSAI_ENV when omitted)
    #[arg(short, long, global = true, env = "YOSAI_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Overlay file merged over the configuration, in order (repeatable)
    #[arg(short, long = "overlay", global = true)]
    pub overlays: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and validate the configuration
    Check(CheckArgs),

    /// Print the resolved settings tree
    Show(ShowArgs),

    /// Print a single setting by dotted path
    Get(GetArgs),

    /// List the environment override rules
    Rules(RulesArgs),

    /// Keep resolving the configuration as its files change
    Watch(WatchArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yosai",
            "show",
            "--config",
            "base.yaml",
            "-o",
            "local.yaml",
            "--overlay",
            "ci.yaml",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("base.yaml")));
        assert_eq!(
            cli.overlays,
            vec![PathBuf::from("local.yaml"), PathBuf::from("ci.yaml")]
        );
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Show(ShowArgs { reveal: false, .. })));
    }

    #[test]
    fn test_get_requires_key() {
        assert!(Cli::try_parse_from(["yosai", "get"]).is_err());
        let cli = Cli::try_parse_from(["yosai", "get", "database.host"]).unwrap();
        match cli.command {
            Commands::Get(args) => assert_eq!(args.key, "database.host"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_watch_interval() {
        let cli = Cli::try_parse_from(["yosai", "watch", "--interval-secs", "5"]).unwrap();
        match cli.command {
            Commands::Watch(args) => assert_eq!(args.interval_secs, 5),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
