// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use clap::Parser;
use tsql2snow::cli::{Cli, Commands, Format};

#[test]
fn test_convert_defaults_to_stdin() {
    let cli = Cli::try_parse_from(["tsql2snow", "convert"]).unwrap();
    match cli.command {
        Commands::Convert {
            inputs,
            format,
            strict,
            ..
        } => {
            assert_eq!(inputs, vec!["-"]);
            assert!(format.is_none());
            assert!(!strict);
        }
        Commands::Rules {
            ..
        } => panic!("expected convert")
    }
}

#[test]
fn test_convert_flags() {
    let cli = Cli::try_parse_from([
        "tsql2snow",
        "-v",
        "convert",
        "a.sql",
        "b.sql",
        "--out-dir",
        "out",
        "-f",
        "json",
        "--disable",
        "FMT001",
        "--disable",
        "ROW001",
        "--validate",
        "--strict",
        "--no-color"
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Convert {
            inputs,
            out_dir,
            format,
            disabled,
            validate,
            strict,
            no_color,
            ..
        } => {
            assert_eq!(inputs, vec!["a.sql", "b.sql"]);
            assert_eq!(out_dir.unwrap().to_str(), Some("out"));
            assert_eq!(format, Some(Format::Json));
            assert_eq!(disabled, vec!["FMT001", "ROW001"]);
            assert!(validate && strict && no_color);
        }
        Commands::Rules {
            ..
        } => panic!("expected convert")
    }
}

#[test]
fn test_output_conflicts_with_out_dir() {
    let result = Cli::try_parse_from([
        "tsql2snow", "convert", "a.sql", "-o", "x.sql", "--out-dir", "out"
    ]);
    assert!(result.is_err());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Cli::try_parse_from(["tsql2snow", "convert", "-f", "sarif"]).is_err());
}

#[test]
fn test_rules_subcommand() {
    let cli = Cli::try_parse_from(["tsql2snow", "rules", "--no-color"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Rules {
            no_color: true
        }
    ));
}

#[test]
fn test_format_variants() {
    let _text = Format::Text;
    let _json = Format::Json;
    let _yaml = Format::Yaml;
    let _diff = Format::Diff;
}
