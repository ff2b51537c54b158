//! `run`: execute a brain for a number of ticks against a stub actor.

use std::rc::Rc;

use tilebrain_runtime::{Brain, BrainRtEvent, PrintTracer, Program, Verbosity};

use super::util::load_brain;
use crate::cli::RunParams;

pub fn run(params: &RunParams) -> i32 {
    let (def, env) = match load_brain(&params.brain_path, false) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };

    let (program, diagnostics) = Program::compile(&def, &env);
    if diagnostics.has_errors() {
        eprintln!(
            "brain has {} compile errors; run `tilebrain check` for details",
            diagnostics.error_count()
        );
        return 1;
    }

    let mut brain = Brain::new(Rc::new(program), Rc::new(env));
    if params.trace {
        brain = brain.with_tracer(Box::new(PrintTracer::new(Verbosity::Values)));
    }

    // The CLI has no host scene; a unit actor stands in.
    brain.initialize(Box::new(()));

    let _sub = brain.events().on(|event| match event {
        BrainRtEvent::PageActivated { page } => println!("page_activated {page}"),
        BrainRtEvent::PageDeactivated { page } => println!("page_deactivated {page}"),
        BrainRtEvent::User { name, payload } => println!("event {name} {payload}"),
    });

    if let Err(err) = brain.startup() {
        eprintln!("cannot start brain: {err}");
        return 1;
    }

    for tick in 0..params.ticks {
        let sim_time = f64::from(tick) * f64::from(params.dt);
        if let Err(err) = brain.think(sim_time) {
            eprintln!("tick {tick} failed: {err}");
            return 1;
        }
        for line in brain.take_diagnostics() {
            eprintln!("tick {tick}: {line}");
        }
    }

    brain.shutdown();
    0
}
