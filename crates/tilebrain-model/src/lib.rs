//! Brain model for tilebrain.
//!
//! A `BrainDef` owns everything downward: pages own root rules, rules own
//! their children and their two tilesets, and the per-brain catalog owns
//! user-created tile definitions. Parent and page references are ids used
//! only for navigation. The binary brain format lives in `ser`.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod brain;
mod dirty;
mod error;
mod events;
mod ids;
mod rule;
mod tileset;

pub mod ser;

#[cfg(test)]
mod rule_ops_tests;
#[cfg(test)]
mod ser_tests;
#[cfg(test)]
mod test_utils;

pub use brain::{BrainDef, page_tile_id};
pub use dirty::DIRTY_DEBOUNCE;
pub use error::ModelError;
pub use events::{
    BrainChange, BrainEvent, ModelEvents, PageChange, PageEvent, RuleEvent, TileSetEvent,
};
pub use ids::{PageId, RuleId};
pub use ser::MissingTilePolicy;
pub use tileset::TileSet;
