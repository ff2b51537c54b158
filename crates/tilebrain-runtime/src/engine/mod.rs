//! Runtime engine: program compilation and per-tick evaluation.

mod brain;
mod context;
mod error;
mod eval;
mod program;
mod trace;


pub use brain::{Brain, BrainRtEvent, FuelLimits};
pub use error::RuntimeError;
pub use program::{Program, ProgramPage, ProgramRule};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
