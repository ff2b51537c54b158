mod cli;
mod commands;

use cli::{CheckParams, DemoParams, DumpParams, RunParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    let code = match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(&params)
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(&params)
        }
        Some(("run", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(&params)
        }
        Some(("demo", m)) => {
            let params = DemoParams::from_matches(m);
            commands::demo::run(&params)
        }
        _ => unreachable!("clap should have caught this"),
    };

    std::process::exit(code);
}
