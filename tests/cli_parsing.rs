use std::path::PathBuf;

use clap::Parser;
use yosai::cli::{Cli, Commands};

#[test]
fn test_parse_check() {
    let cli = Cli::try_parse_from(vec!["yosai", "check"]).unwrap();
    assert!(matches!(cli.command, Commands::Check(_)));
    assert!(!cli.json);
    assert!(cli.overlays.is_empty());
}

#[test]
fn test_parse_show_with_section_and_reveal() {
    let cli = Cli::try_parse_from(vec![
        "yosai", "show", "--section", "database", "--reveal",
    ])
    .unwrap();

    match cli.command {
        Commands::Show(args) => {
            assert_eq!(args.section.as_deref(), Some("database"));
            assert!(args.reveal);
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_global_flags_before_subcommand() {
    let cli = Cli::try_parse_from(vec![
        "yosai",
        "--json",
        "--config",
        "config/production.yaml",
        "get",
        "app.port",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("config/production.yaml")));
    match cli.command {
        Commands::Get(args) => {
            assert_eq!(args.key, "app.port");
            assert!(!args.reveal);
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_config_flag_falls_back_to_env() {
    temp_env::with_var("YOSAI_CONFIG_FILE", Some("/etc/yosai/config.yaml"), || {
        let cli = Cli::try_parse_from(vec!["yosai", "rules"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/yosai/config.yaml")));
    });
}

#[test]
fn test_parse_rules_set_only() {
    let cli = Cli::try_parse_from(vec!["yosai", "rules", "--set-only"]).unwrap();
    match cli.command {
        Commands::Rules(args) => assert!(args.set_only),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_watch_defaults() {
    let cli = Cli::try_parse_from(vec!["yosai", "watch"]).unwrap();
    match cli.command {
        Commands::Watch(args) => assert_eq!(args.interval_secs, 2),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_watch_rejects_zero_interval() {
    assert!(Cli::try_parse_from(vec!["yosai", "watch", "--interval-secs", "0"]).is_err());
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(vec!["yosai", "deploy"]).is_err());
}
