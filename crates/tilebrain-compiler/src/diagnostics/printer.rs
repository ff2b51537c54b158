//! Builder-pattern printer for rendering diagnostics against a tile row.

use std::fmt::Write;

use tilebrain_core::catalog::Catalogs;
use tilebrain_core::tiles::TileId;

use super::Diagnostics;

/// Renders diagnostics as plain text, with the tile row and a caret line
/// under each diagnostic's span.
pub struct DiagnosticsPrinter<'d, 't> {
    diagnostics: &'d Diagnostics,
    tiles: Option<&'t [TileId]>,
    catalogs: Option<Catalogs<'t>>,
}

impl<'d, 't> DiagnosticsPrinter<'d, 't> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            tiles: None,
            catalogs: None,
        }
    }

    pub fn tiles(mut self, tiles: &'t [TileId]) -> Self {
        self.tiles = Some(tiles);
        self
    }

    pub fn catalogs(mut self, catalogs: Catalogs<'t>) -> Self {
        self.catalogs = Some(catalogs);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(tiles) = self.tiles else {
            for diag in self.diagnostics.iter() {
                writeln!(w, "{diag}")?;
            }
            return Ok(());
        };

        let labels: Vec<String> = tiles.iter().map(|t| self.label_of(t)).collect();

        for diag in self.diagnostics.iter() {
            writeln!(w, "{}: {}", diag.severity, diag.message)?;
            write!(w, "  tiles: ")?;
            for (i, label) in labels.iter().enumerate() {
                if i > 0 {
                    write!(w, " ")?;
                }
                write!(w, "[{label}]")?;
            }
            writeln!(w)?;

            // Caret line under the span.
            write!(w, "         ")?;
            let mut col = 0usize;
            let mut caret_start = 0usize;
            let mut caret_end = 0usize;
            for (i, label) in labels.iter().enumerate() {
                let width = label.chars().count() + 2;
                if i as u32 == diag.span.from {
                    caret_start = col;
                }
                if i as u32 == diag.span.to {
                    caret_end = col + width;
                }
                col += width + 1;
            }
            if caret_end <= caret_start {
                caret_end = caret_start + 1;
            }
            for _ in 0..caret_start {
                write!(w, " ")?;
            }
            for _ in caret_start..caret_end {
                write!(w, "^")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    fn label_of(&self, tile: &TileId) -> String {
        if let Some(catalogs) = &self.catalogs {
            if let Some(def) = catalogs.get(tile) {
                return def.visual.label.clone();
            }
        }
        tile.as_str().to_owned()
    }
}
