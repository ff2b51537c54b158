//! Ordered tile sequence of one rule side.

use tilebrain_core::limits::MAX_TILESET_TILES;
use tilebrain_core::tiles::{Side, TileId};

use crate::error::ModelError;

/// One side (WHEN or DO) of a rule: an ordered sequence of tile references,
/// capped at [`MAX_TILESET_TILES`]. Tiles are referenced by id and resolved
/// through the catalogs on demand; the tileset owns no definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSet {
    side: Side,
    tiles: Vec<TileId>,
}

impl TileSet {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            tiles: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, tile: &TileId) -> bool {
        self.tiles.contains(tile)
    }

    pub(crate) fn insert(&mut self, index: usize, tile: TileId) -> Result<(), ModelError> {
        if self.tiles.len() >= MAX_TILESET_TILES {
            return Err(ModelError::TileSetCapacityExceeded(MAX_TILESET_TILES));
        }
        if index > self.tiles.len() {
            return Err(ModelError::TileIndexOutOfBounds(index));
        }
        self.tiles.insert(index, tile);
        Ok(())
    }

    pub(crate) fn push(&mut self, tile: TileId) -> Result<(), ModelError> {
        self.insert(self.tiles.len(), tile)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<TileId, ModelError> {
        if index >= self.tiles.len() {
            return Err(ModelError::TileIndexOutOfBounds(index));
        }
        Ok(self.tiles.remove(index))
    }

    pub(crate) fn replace(&mut self, index: usize, tile: TileId) -> Result<TileId, ModelError> {
        if index >= self.tiles.len() {
            return Err(ModelError::TileIndexOutOfBounds(index));
        }
        Ok(std::mem::replace(&mut self.tiles[index], tile))
    }
}
