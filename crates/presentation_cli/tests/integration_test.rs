//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "locationiq-cli")]
#[command(author, version, about = "LocationIQ geocoding CLI", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    api_key: Option<String>,

    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(short, long, global = true)]
    limit: Option<u8>,

    #[arg(long, global = true)]
    language: Option<String>,

    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Geocode {
        query: String,
        #[arg(long)]
        raw: bool,
    },
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        raw: bool,
    },
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_geocode_command() {
    let cli = parse_args(&["locationiq-cli", "geocode", "Lingampally, Hyderabad"]).unwrap();
    if let Commands::Geocode { query, raw } = cli.command {
        assert_eq!(query, "Lingampally, Hyderabad");
        assert!(!raw);
    } else {
        panic!("Expected Geocode command");
    }
}

#[test]
fn cli_parses_geocode_raw_flag() {
    let cli = parse_args(&["locationiq-cli", "geocode", "Berlin", "--raw"]).unwrap();
    assert!(matches!(cli.command, Commands::Geocode { raw: true, .. }));
}

#[test]
fn cli_parses_reverse_with_negative_coordinates() {
    let cli = parse_args(&["locationiq-cli", "reverse", "-33.8688", "-151.2093"]).unwrap();
    if let Commands::Reverse { lat, lon, .. } = cli.command {
        assert!((lat + 33.8688).abs() < f64::EPSILON);
        assert!((lon + 151.2093).abs() < f64::EPSILON);
    } else {
        panic!("Expected Reverse command");
    }
}

#[test]
fn cli_rejects_non_numeric_coordinates() {
    assert!(parse_args(&["locationiq-cli", "reverse", "north", "east"]).is_err());
}

#[test]
fn cli_requires_reverse_longitude() {
    assert!(parse_args(&["locationiq-cli", "reverse", "40.7"]).is_err());
}

#[test]
fn cli_parses_global_options_after_subcommand() {
    let cli = parse_args(&[
        "locationiq-cli",
        "geocode",
        "Berlin",
        "--limit",
        "5",
        "--language",
        "de",
        "--config",
        "/etc/locationiq.toml",
    ])
    .unwrap();

    assert_eq!(cli.limit, Some(5));
    assert_eq!(cli.language.as_deref(), Some("de"));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/locationiq.toml")));
}

#[test]
fn cli_rejects_limit_out_of_range() {
    assert!(parse_args(&["locationiq-cli", "--limit", "300", "geocode", "x"]).is_err());
}

#[test]
fn cli_counts_verbosity() {
    let cli = parse_args(&["locationiq-cli", "-vvv", "geocode", "x"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["locationiq-cli"]).is_err());
}
