//! Tile suggestions for the visual editor.
//!
//! Given an insertion context, returns two ranked buckets: tiles whose
//! produced type matches the expected type exactly, and tiles reachable via
//! a single registered conversion (sorted by ascending cost, then catalog
//! order).

use tilebrain_core::caps::Capabilities;
use tilebrain_core::catalog::Catalogs;
use tilebrain_core::tiles::{Placement, Side, TileDef, TileId, TileKind};
use tilebrain_core::types::TypeId;

use crate::env::CompileEnv;

/// Insertion context at the editor cursor.
#[derive(Clone)]
pub struct SuggestQuery<'a> {
    pub side: Side,
    /// Expected type at the cursor, when known (operand position).
    pub expected: Option<TypeId>,
    /// Capabilities granted by enclosing rules and preceding tiles.
    pub available_caps: Capabilities,
    /// Parens opened but not closed before the cursor
    /// (`count_unclosed_parens`).
    pub unclosed_parens: u32,
    /// Index of the tile being replaced, if any.
    pub replacing: Option<usize>,
    pub catalogs: Catalogs<'a>,
}

/// A suggestion reachable through one conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggested {
    pub tile: TileId,
    pub cost: u32,
}

/// Ranked suggestion buckets.
#[derive(Clone, Debug, Default)]
pub struct Suggestions {
    pub exact: Vec<TileId>,
    pub with_conversion: Vec<Suggested>,
}

/// Compute suggestions for an insertion context.
pub fn suggest(env: &CompileEnv, query: &SuggestQuery<'_>) -> Suggestions {
    let mut out = Suggestions::default();

    let mut visit = |def: &TileDef| {
        if def.hidden || matches!(def.kind, TileKind::Missing { .. }) {
            return;
        }
        if !placement_fits(def, query) {
            return;
        }
        if !query.available_caps.satisfies(def.requires) {
            return;
        }

        match &query.expected {
            None => out.exact.push(def.id.clone()),
            Some(expected) => {
                let Some(produced) = def.produced_type() else {
                    return;
                };
                if &produced == expected {
                    out.exact.push(def.id.clone());
                } else if let Some(conv) = env.conversions.find(&produced, expected) {
                    out.with_conversion.push(Suggested {
                        tile: def.id.clone(),
                        cost: conv.cost,
                    });
                }
            }
        }
    };

    if let Some(brain) = query.catalogs.brain {
        for def in brain.iter() {
            visit(def);
        }
    }
    for def in query.catalogs.global.iter() {
        // The brain catalog shadows global entries with the same id.
        if query
            .catalogs
            .brain
            .is_some_and(|brain| brain.has(&def.id))
        {
            continue;
        }
        visit(def);
    }

    // Ascending by cost; the stable sort keeps catalog order within a cost.
    out.with_conversion.sort_by_key(|s| s.cost);
    out
}

fn placement_fits(def: &TileDef, query: &SuggestQuery<'_>) -> bool {
    if !def.placement.allows_side(query.side) {
        return false;
    }
    // Inside parens or in operand position only inline-capable tiles fit;
    // statement-only tiles (actuators, statement sensors) are excluded.
    let needs_inline = query.unclosed_parens > 0 || query.expected.is_some();
    if needs_inline && !def.placement.contains(Placement::INLINE) {
        return false;
    }
    true
}
