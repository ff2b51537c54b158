//! CLI argument parsing tests.

use std::path::PathBuf;

use super::{CheckParams, DumpParams, RunParams, build_cli};

#[test]
fn dump_args() {
    let matches = build_cli()
        .try_get_matches_from(["tilebrain", "dump", "brain.bin", "--json"])
        .unwrap();
    let (_, m) = matches.subcommand().unwrap();
    let params = DumpParams::from_matches(m);
    assert_eq!(params.brain_path, PathBuf::from("brain.bin"));
    assert!(params.json);
    assert!(!params.placeholders);
}

#[test]
fn check_args() {
    let matches = build_cli()
        .try_get_matches_from(["tilebrain", "check", "brain.bin", "--placeholders"])
        .unwrap();
    let (_, m) = matches.subcommand().unwrap();
    let params = CheckParams::from_matches(m);
    assert!(params.placeholders);
}

#[test]
fn run_args_with_defaults() {
    let matches = build_cli()
        .try_get_matches_from(["tilebrain", "run", "brain.bin"])
        .unwrap();
    let (_, m) = matches.subcommand().unwrap();
    let params = RunParams::from_matches(m);
    assert_eq!(params.ticks, 1);
    assert_eq!(params.dt, 16);
    assert!(!params.trace);
}

#[test]
fn run_args_override() {
    let matches = build_cli()
        .try_get_matches_from([
            "tilebrain", "run", "brain.bin", "--ticks", "10", "--dt", "33", "--trace",
        ])
        .unwrap();
    let (_, m) = matches.subcommand().unwrap();
    let params = RunParams::from_matches(m);
    assert_eq!(params.ticks, 10);
    assert_eq!(params.dt, 33);
    assert!(params.trace);
}

#[test]
fn brain_path_is_required() {
    assert!(build_cli().try_get_matches_from(["tilebrain", "dump"]).is_err());
    assert!(build_cli().try_get_matches_from(["tilebrain"]).is_err());
}
