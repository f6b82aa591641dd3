//! CLI tests for argument parsing and orchestration helpers.
//!
//! Tests cover:
//! - Strategy parameter building from INI config (build_momentum_params)
//! - Data dir and snapshot path resolution with command-line overrides
//! - Argument wiring of the clap surface

use clap::Parser;
use papertrader::adapters::file_config_adapter::FileConfigAdapter;
use papertrader::cli::{self, Cli, Command};
use papertrader::domain::error::TraderError;
use std::path::PathBuf;

const VALID_INI: &str = r#"
[data]
dir = quotes

[portfolio]
file = portfolio.csv

[strategy]
lookback = 5
exit_floor = 0.8
exit_ceiling = 1.2
"#;

mod strategy_params {
    use super::*;

    #[test]
    fn builds_from_a_full_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = cli::build_momentum_params(&adapter).unwrap();

        assert_eq!(params.lookback, 5);
        assert!((params.exit_floor - 0.8).abs() < f64::EPSILON);
        assert!((params.exit_ceiling - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nlookback = 4\n").unwrap();
        let params = cli::build_momentum_params(&adapter).unwrap();

        assert_eq!(params.lookback, 4);
        assert!((params.exit_floor - 0.7).abs() < f64::EPSILON);
        assert!((params.exit_ceiling - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn an_absent_section_means_all_defaults() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        let params = cli::build_momentum_params(&adapter).unwrap();

        assert_eq!(params.lookback, 10);
        assert!((params.exit_floor - 0.7).abs() < f64::EPSILON);
        assert!((params.exit_ceiling - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_a_non_positive_lookback() {
        for ini in ["[strategy]\nlookback = 0\n", "[strategy]\nlookback = -3\n"] {
            let adapter = FileConfigAdapter::from_string(ini).unwrap();
            let err = cli::build_momentum_params(&adapter).unwrap_err();
            assert!(matches!(err, TraderError::ConfigInvalid { key, .. } if key == "lookback"));
        }
    }

    #[test]
    fn rejects_a_malformed_exit_band() {
        let bad_bands = [
            "[strategy]\nexit_floor = 1.2\nexit_ceiling = 0.8\n",
            "[strategy]\nexit_floor = 0.0\n",
            "[strategy]\nexit_floor = 1.3\nexit_ceiling = 1.3\n",
        ];
        for ini in bad_bands {
            let adapter = FileConfigAdapter::from_string(ini).unwrap();
            let err = cli::build_momentum_params(&adapter).unwrap_err();
            assert!(matches!(err, TraderError::ConfigInvalid { key, .. } if key == "exit_floor"));
        }
    }
}

mod path_resolution {
    use super::*;

    #[test]
    fn config_supplies_both_paths() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();

        assert_eq!(
            cli::resolve_data_dir(None, &adapter).unwrap(),
            PathBuf::from("quotes")
        );
        assert_eq!(
            cli::resolve_snapshot_path(None, &adapter).unwrap(),
            PathBuf::from("portfolio.csv")
        );
    }

    #[test]
    fn command_line_overrides_beat_the_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let dir_override = PathBuf::from("/srv/quotes");
        let file_override = PathBuf::from("/srv/live.csv");

        assert_eq!(
            cli::resolve_data_dir(Some(&dir_override), &adapter).unwrap(),
            dir_override
        );
        assert_eq!(
            cli::resolve_snapshot_path(Some(&file_override), &adapter).unwrap(),
            file_override
        );
    }

    #[test]
    fn missing_keys_are_config_errors() {
        let adapter = FileConfigAdapter::from_string("").unwrap();

        let err = cli::resolve_data_dir(None, &adapter).unwrap_err();
        assert!(matches!(
            err,
            TraderError::ConfigMissing { ref section, ref key } if section == "data" && key == "dir"
        ));

        let err = cli::resolve_snapshot_path(None, &adapter).unwrap_err();
        assert!(matches!(
            err,
            TraderError::ConfigMissing { ref section, ref key }
                if section == "portfolio" && key == "file"
        ));
    }
}

mod argument_wiring {
    use super::*;

    #[test]
    fn buy_takes_symbol_volume_date_and_save() {
        let cli = Cli::try_parse_from([
            "papertrader",
            "buy",
            "SKY",
            "100",
            "--date",
            "2012-1-18",
            "--save",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("papertrader.ini"));
        match cli.command {
            Command::Buy {
                symbol,
                volume,
                date,
                save,
            } => {
                assert_eq!(symbol, "SKY");
                assert!((volume - 100.0).abs() < f64::EPSILON);
                assert_eq!(date.as_deref(), Some("2012-1-18"));
                assert!(save);
            }
            other => panic!("expected buy, parsed {other:?}"),
        }
    }

    #[test]
    fn global_flags_may_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "papertrader",
            "value",
            "--config",
            "alt.ini",
            "--date",
            "17.1.2012",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("alt.ini"));
        assert!(matches!(
            cli.command,
            Command::Value { date: Some(ref d) } if d == "17.1.2012"
        ));
    }

    #[test]
    fn overrides_parse_into_their_paths() {
        let cli = Cli::try_parse_from([
            "papertrader",
            "info",
            "--data-dir",
            "backfill",
            "--portfolio",
            "other.csv",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("backfill")));
        assert_eq!(cli.portfolio, Some(PathBuf::from("other.csv")));
        assert!(matches!(cli.command, Command::Info));
    }

    #[test]
    fn sell_all_and_run_parse() {
        let cli = Cli::try_parse_from(["papertrader", "sell-all", "--date", "2012-01-18"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::SellAll { date: Some(_), save: false }
        ));

        let cli = Cli::try_parse_from(["papertrader", "run", "--save"]).unwrap();
        assert!(matches!(cli.command, Command::Run { save: true }));
    }

    #[test]
    fn buy_without_a_volume_is_rejected() {
        assert!(Cli::try_parse_from(["papertrader", "buy", "SKY"]).is_err());
        assert!(Cli::try_parse_from(["papertrader", "frobnicate"]).is_err());
    }
}
