//! Diagnostic kinds.

/// Stable classification of a compile diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize)]
pub enum DiagnosticKind {
    /// An opening parenthesis is never closed.
    UnclosedParen,
    /// A tile is not legal at this position.
    UnexpectedTile,
    /// The tile sequence ends where an expression was expected.
    UnexpectedEnd,
    /// A node's type does not match what the context expects.
    TypeMismatch,
    /// More than one overload scored the same minimum cost.
    AmbiguousOverload,
    /// No overload accepts the operand types, even with conversions.
    NoOverload,
    /// A tile's required capabilities are not granted here.
    CapabilityMissing,
    /// A variable reference that cannot be resolved.
    UnknownVariable,
    /// A tile id that resolves to no catalog entry.
    MissingTile,
    /// A sensor/actuator tile with no registered function body.
    UnknownFunction,
}

impl DiagnosticKind {
    /// Base message for the kind; diagnostics carry a formatted message on
    /// top of this.
    pub fn base_message(self) -> &'static str {
        match self {
            DiagnosticKind::UnclosedParen => "unclosed parenthesis",
            DiagnosticKind::UnexpectedTile => "unexpected tile",
            DiagnosticKind::UnexpectedEnd => "expected more tiles",
            DiagnosticKind::TypeMismatch => "type mismatch",
            DiagnosticKind::AmbiguousOverload => "ambiguous operator overload",
            DiagnosticKind::NoOverload => "no matching operator overload",
            DiagnosticKind::CapabilityMissing => "required capability not available here",
            DiagnosticKind::UnknownVariable => "unknown variable",
            DiagnosticKind::MissingTile => "tile not found in any catalog",
            DiagnosticKind::UnknownFunction => "no function registered for this tile",
        }
    }
}
