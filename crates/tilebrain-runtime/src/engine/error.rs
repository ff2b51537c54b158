//! Runtime errors.
//!
//! These cover misuse of the runtime API surface. Failures inside sensor
//! and actuator bodies are never errors: they surface as `Nil` plus a
//! diagnostic on the execution context.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("brain has no actor; call initialize first")]
    NotInitialized,

    #[error("program has no pages")]
    NoPages,

    #[error("no page with id `{0}`")]
    UnknownPage(String),

    #[error("page index {0} out of bounds")]
    PageIndexOutOfBounds(usize),
}
