//! Execution tracing.
//!
//! The tracer is the caller-provided logger: runtime diagnostics and
//! evaluation milestones flow through it. The default is a no-op.

use tilebrain_core::tiles::TileId;

/// How much the print tracer reports.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum Verbosity {
    #[default]
    Rules,
    Values,
}

/// Observer of brain execution.
pub trait Tracer {
    fn on_tick(&mut self, _time: f64) {}
    fn on_rule(&mut self, _rule: u32, _fired: bool) {}
    fn on_actuator(&mut self, _tile: &TileId) {}
    fn on_page_switch(&mut self, _from: usize, _to: usize) {}
    fn on_error(&mut self, _message: &str) {}
}

/// Tracer that ignores everything.
#[derive(Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer that prints to stdout.
pub struct PrintTracer {
    verbosity: Verbosity,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl Tracer for PrintTracer {
    fn on_tick(&mut self, time: f64) {
        if self.verbosity >= Verbosity::Values {
            println!("tick t={time}");
        }
    }

    fn on_rule(&mut self, rule: u32, fired: bool) {
        if self.verbosity >= Verbosity::Values {
            println!("  rule #{rule} {}", if fired { "fired" } else { "held" });
        }
    }

    fn on_actuator(&mut self, tile: &TileId) {
        println!("  actuator {tile}");
    }

    fn on_page_switch(&mut self, from: usize, to: usize) {
        println!("  page {from} -> {to}");
    }

    fn on_error(&mut self, message: &str) {
        println!("  error: {message}");
    }
}
