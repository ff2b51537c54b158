//! Model change events.
//!
//! All emissions are synchronous with the mutation that triggered them,
//! except `RuleEvent::DirtyChanged` which is debounced (see `dirty`).

use tilebrain_core::events::EventEmitter;
use tilebrain_core::tiles::Side;

use crate::ids::{PageId, RuleId};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BrainChange {
    PageAdded,
    PageRemoved,
    CatalogChanged,
}

#[derive(Clone, Debug)]
pub enum BrainEvent {
    NameChanged { old: String, new: String },
    Changed { what: BrainChange },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PageChange {
    RuleAdded,
    RuleRemoved,
    RuleMoved,
}

#[derive(Clone, Debug)]
pub enum PageEvent {
    NameChanged {
        page: PageId,
        old: String,
        new: String,
    },
    Changed {
        page: PageId,
        what: PageChange,
    },
}

#[derive(Clone, Debug)]
pub enum RuleEvent {
    Deleted { rule: RuleId },
    /// Debounced: delivered from `BrainDef::flush_events`.
    DirtyChanged { rule: RuleId, is_dirty: bool },
}

#[derive(Clone, Debug)]
pub enum TileSetEvent {
    DirtyChanged {
        rule: RuleId,
        side: Side,
        is_dirty: bool,
    },
    Typechecked {
        rule: RuleId,
        side: Side,
    },
}

/// Event surface of a brain.
#[derive(Debug)]
pub struct ModelEvents {
    pub brain: EventEmitter<BrainEvent>,
    pub page: EventEmitter<PageEvent>,
    pub rule: EventEmitter<RuleEvent>,
    pub tile_set: EventEmitter<TileSetEvent>,
}

impl ModelEvents {
    pub(crate) fn new() -> Self {
        Self {
            brain: EventEmitter::new(),
            page: EventEmitter::new(),
            rule: EventEmitter::new(),
            tile_set: EventEmitter::new(),
        }
    }
}

impl Default for ModelEvents {
    fn default() -> Self {
        Self::new()
    }
}
