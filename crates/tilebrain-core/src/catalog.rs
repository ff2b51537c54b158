//! Tile catalogs.
//!
//! An identity map `tileId → definition`. Two catalogs coexist at lookup
//! time: the process-global catalog of built-in tiles and the per-brain
//! catalog of user-created literals, variables, and page tiles.

use indexmap::IndexMap;

use crate::tiles::{TileDef, TileId};

/// Identity map of tile definitions.
#[derive(Clone, Default, Debug)]
pub struct TileCatalog {
    tiles: IndexMap<TileId, TileDef>,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &TileId) -> bool {
        self.tiles.contains_key(id)
    }

    /// Add a definition. First-write-wins: returns `false` and leaves the
    /// catalog untouched if the id is already present.
    pub fn add(&mut self, def: TileDef) -> bool {
        if self.tiles.contains_key(&def.id) {
            return false;
        }
        self.tiles.insert(def.id.clone(), def);
        true
    }

    pub fn get(&self, id: &TileId) -> Option<&TileDef> {
        self.tiles.get(id)
    }

    pub fn get_mut(&mut self, id: &TileId) -> Option<&mut TileDef> {
        self.tiles.get_mut(id)
    }

    pub fn remove(&mut self, id: &TileId) -> Option<TileDef> {
        self.tiles.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDef> {
        self.tiles.values()
    }

    pub fn find(&self, pred: impl Fn(&TileDef) -> bool) -> Option<&TileDef> {
        self.tiles.values().find(|def| pred(def))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Lookup view over the per-brain catalog and the global catalog.
///
/// Resolution tries the brain catalog first, then the global one.
#[derive(Clone, Copy)]
pub struct Catalogs<'a> {
    pub brain: Option<&'a TileCatalog>,
    pub global: &'a TileCatalog,
}

impl<'a> Catalogs<'a> {
    pub fn global_only(global: &'a TileCatalog) -> Self {
        Self {
            brain: None,
            global,
        }
    }

    pub fn with_brain(brain: &'a TileCatalog, global: &'a TileCatalog) -> Self {
        Self {
            brain: Some(brain),
            global,
        }
    }

    pub fn get(&self, id: &TileId) -> Option<&'a TileDef> {
        if let Some(brain) = self.brain {
            if let Some(def) = brain.get(id) {
                return Some(def);
            }
        }
        self.global.get(id)
    }

    pub fn has(&self, id: &TileId) -> bool {
        self.get(id).is_some()
    }
}
