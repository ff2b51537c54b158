//! Runtime for executing compiled tilebrain programs.
//!
//! A `Program` is an immutable compile of a `BrainDef`; a `Brain` binds a
//! program to one host actor and evaluates the active page's rules each
//! tick, cooperatively and single-threaded. Actuator side effects on the
//! actor are opaque to the core.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;
pub mod stdlib;

pub use engine::{
    Brain, BrainRtEvent, FuelLimits, NoopTracer, PrintTracer, Program, ProgramPage, ProgramRule,
    RuntimeError, Tracer, Verbosity,
};
