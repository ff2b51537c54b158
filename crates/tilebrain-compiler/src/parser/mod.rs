//! Resilient precedence parser over tile sequences.
//!
//! The parser never fails: malformed fragments become `Error` nodes and
//! every diagnostic is anchored to tile indices, so the editor can badge any
//! tile. Recovery rules:
//!
//! 1. Unresolvable tile ids produce a `MissingTile` diagnostic and an
//!    `Error` node, then the tile is consumed.
//! 2. A tile that cannot start an atom produces `UnexpectedTile` and is
//!    consumed.
//! 3. An unclosed parenthesis produces `UnclosedParen` spanning from the
//!    opening tile to the end of the sequence.

mod ast;
mod dump;
mod grammar;

#[cfg(test)]
mod tests;

pub use ast::{CallKind, ExprArena, ExprId, ExprKind, ExprNode, ParseResult};
pub use dump::dump;

use tilebrain_core::catalog::Catalogs;
use tilebrain_core::tiles::{CfKind, TileDef, TileId, TileKind};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, TileSpan};
use crate::env::CompileEnv;

/// Parse a WHEN side: a single boolean expression (empty means always-true).
pub fn parse_when(tiles: &[TileId], catalogs: Catalogs<'_>, env: &CompileEnv) -> ParseResult {
    let mut parser = Parser::new(tiles, catalogs, env);
    parser.parse_when_root();
    parser.finish()
}

/// Parse a DO side: a sequence of statements.
pub fn parse_do(tiles: &[TileId], catalogs: Catalogs<'_>, env: &CompileEnv) -> ParseResult {
    let mut parser = Parser::new(tiles, catalogs, env);
    parser.parse_do_root();
    parser.finish()
}

/// Number of parentheses opened but not closed in `tiles[..upto]`.
///
/// Consumed by the suggestion service to decide statement legality at the
/// cursor.
pub fn count_unclosed_parens(tiles: &[TileId], catalogs: Catalogs<'_>, upto: usize) -> u32 {
    let mut open: u32 = 0;
    for tile in tiles.iter().take(upto) {
        match catalogs.get(tile).map(|def| &def.kind) {
            Some(TileKind::ControlFlow(CfKind::OpenParen)) => open += 1,
            Some(TileKind::ControlFlow(CfKind::CloseParen)) => open = open.saturating_sub(1),
            _ => {}
        }
    }
    open
}

pub(crate) struct Parser<'a> {
    tiles: &'a [TileId],
    catalogs: Catalogs<'a>,
    env: &'a CompileEnv,
    pos: usize,
    arena: ExprArena,
    pub(crate) roots: Vec<ExprId>,
    diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
    fn new(tiles: &'a [TileId], catalogs: Catalogs<'a>, env: &'a CompileEnv) -> Self {
        Self {
            tiles,
            catalogs,
            env,
            pos: 0,
            arena: ExprArena::new(),
            roots: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn finish(self) -> ParseResult {
        ParseResult {
            tiles: self.tiles.to_vec(),
            arena: self.arena,
            roots: self.roots,
            diagnostics: self.diagnostics,
        }
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tiles.len()
    }

    pub(crate) fn current_index(&self) -> u32 {
        self.pos as u32
    }

    /// Definition of the current tile, or `None` at end of input or for an
    /// unresolvable id.
    pub(crate) fn current_def(&self) -> Option<&'a TileDef> {
        self.tiles.get(self.pos).and_then(|t| self.catalogs.get(t))
    }

    pub(crate) fn def_at(&self, index: usize) -> Option<&'a TileDef> {
        self.tiles.get(index).and_then(|t| self.catalogs.get(t))
    }

    pub(crate) fn current_tile(&self) -> Option<&'a TileId> {
        self.tiles.get(self.pos)
    }

    pub(crate) fn tiles_len(&self) -> usize {
        self.tiles.len()
    }

    pub(crate) fn tile_at(&self, index: u32) -> &'a TileId {
        &self.tiles[index as usize]
    }

    pub(crate) fn bump(&mut self) -> u32 {
        let index = self.pos as u32;
        self.pos += 1;
        index
    }

    pub(crate) fn env(&self) -> &'a CompileEnv {
        self.env
    }

    /// Span covering the rest of the input (or the last tile when already at
    /// the end).
    pub(crate) fn span_to_end(&self, from: u32) -> TileSpan {
        let last = self.tiles.len().saturating_sub(1) as u32;
        TileSpan::new(from, last.max(from))
    }

    // ------------------------------------------------------------------
    // Node + diagnostic helpers
    // ------------------------------------------------------------------

    pub(crate) fn alloc(&mut self, kind: ExprKind, span: TileSpan) -> ExprId {
        self.arena.alloc(kind, span)
    }

    pub(crate) fn node_span(&self, id: ExprId) -> TileSpan {
        self.arena.get(id).span
    }

    pub(crate) fn error(&mut self, kind: DiagnosticKind, span: TileSpan, message: String) {
        self.diagnostics.push(Diagnostic::error(kind, span, message));
    }

    pub(crate) fn warning(&mut self, kind: DiagnosticKind, span: TileSpan, message: String) {
        self.diagnostics
            .push(Diagnostic::warning(kind, span, message));
    }

    pub(crate) fn kind_of(&self, id: ExprId) -> &ExprKind {
        &self.arena.get(id).kind
    }

    /// Emit a diagnostic, consume the current tile, and cover it with an
    /// `Error` node.
    pub(crate) fn error_and_bump(&mut self, kind: DiagnosticKind, message: String) -> ExprId {
        let span = TileSpan::single(self.current_index());
        self.error(kind, span, message);
        self.bump();
        self.alloc(ExprKind::Error, span)
    }
}
