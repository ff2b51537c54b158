//! Command-line surface.

mod args;

#[cfg(test)]
mod dispatch_tests;

use std::path::PathBuf;

use clap::{ArgMatches, Command};

use args::{
    brain_path_arg, dt_arg, json_arg, out_path_arg, placeholders_arg, ticks_arg, trace_arg,
};

pub fn build_cli() -> Command {
    Command::new("tilebrain")
        .about("Inspect, check, and run serialized brain files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("dump")
                .about("Print a brain's catalog and page/rule tree")
                .arg(brain_path_arg())
                .arg(json_arg())
                .arg(placeholders_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Compile every rule and report diagnostics")
                .arg(brain_path_arg())
                .arg(placeholders_arg()),
        )
        .subcommand(
            Command::new("run")
                .about("Execute a brain for a number of ticks")
                .arg(brain_path_arg())
                .arg(ticks_arg())
                .arg(dt_arg())
                .arg(trace_arg()),
        )
        .subcommand(
            Command::new("demo")
                .about("Write a small sample brain file")
                .arg(out_path_arg()),
        )
}

pub struct DumpParams {
    pub brain_path: PathBuf,
    pub json: bool,
    pub placeholders: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            brain_path: m.get_one::<PathBuf>("brain_path").cloned().unwrap_or_default(),
            json: m.get_flag("json"),
            placeholders: m.get_flag("placeholders"),
        }
    }
}

pub struct CheckParams {
    pub brain_path: PathBuf,
    pub placeholders: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            brain_path: m.get_one::<PathBuf>("brain_path").cloned().unwrap_or_default(),
            placeholders: m.get_flag("placeholders"),
        }
    }
}

pub struct RunParams {
    pub brain_path: PathBuf,
    pub ticks: u32,
    pub dt: u32,
    pub trace: bool,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            brain_path: m.get_one::<PathBuf>("brain_path").cloned().unwrap_or_default(),
            ticks: m.get_one::<u32>("ticks").copied().unwrap_or(1),
            dt: m.get_one::<u32>("dt").copied().unwrap_or(16),
            trace: m.get_flag("trace"),
        }
    }
}

pub struct DemoParams {
    pub out_path: PathBuf,
}

impl DemoParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            out_path: m.get_one::<PathBuf>("out_path").cloned().unwrap_or_default(),
        }
    }
}
