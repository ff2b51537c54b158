//! Diagnostic message types.

use std::fmt;

use super::kind::DiagnosticKind;
use crate::parser::ExprId;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Inclusive span of tile indices `[from, to]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize)]
pub struct TileSpan {
    pub from: u32,
    pub to: u32,
}

impl TileSpan {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    pub fn single(index: u32) -> Self {
        Self {
            from: index,
            to: index,
        }
    }

    /// Smallest span covering both.
    pub fn join(self, other: TileSpan) -> TileSpan {
        TileSpan {
            from: self.from.min(other.from),
            to: self.to.max(other.to),
        }
    }
}

impl fmt::Display for TileSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// A diagnostic message anchored to a tile span and, when produced by the
/// type checker, to an expression node.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub span: TileSpan,
    pub node: Option<ExprId>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, span: TileSpan, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            span,
            node: None,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, span: TileSpan, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            span,
            node: None,
            message: message.into(),
        }
    }

    pub fn with_node(mut self, node: ExprId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.severity, self.span, self.message
        )
    }
}
