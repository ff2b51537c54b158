//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so the same definition can be reused
//! across commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Serialized brain file (positional).
pub fn brain_path_arg() -> Arg {
    Arg::new("brain_path")
        .value_name("BRAIN")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Serialized brain file")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit JSON instead of text")
}

/// Insert placeholders for unresolved tiles (--placeholders).
pub fn placeholders_arg() -> Arg {
    Arg::new("placeholders")
        .long("placeholders")
        .action(ArgAction::SetTrue)
        .help("Insert placeholder tiles for unresolved tile ids instead of failing")
}

/// Number of ticks to execute (--ticks).
pub fn ticks_arg() -> Arg {
    Arg::new("ticks")
        .long("ticks")
        .value_name("N")
        .default_value("1")
        .value_parser(value_parser!(u32))
        .help("Number of ticks to execute")
}

/// Milliseconds of sim time per tick (--dt).
pub fn dt_arg() -> Arg {
    Arg::new("dt")
        .long("dt")
        .value_name("MS")
        .default_value("16")
        .value_parser(value_parser!(u32))
        .help("Sim-time milliseconds per tick")
}

/// Trace rule evaluation (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Trace rule evaluation while running")
}

/// Output file (positional).
pub fn out_path_arg() -> Arg {
    Arg::new("out_path")
        .value_name("OUT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Output file")
}
