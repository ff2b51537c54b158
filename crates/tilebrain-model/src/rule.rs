//! Rule and page arena nodes.

use tilebrain_compiler::RuleCheck;
use tilebrain_core::tiles::Side;

use crate::ids::{PageId, RuleId};
use crate::tileset::TileSet;

/// Slab node of one rule.
///
/// Ownership invariant: a live rule is owned by exactly one place, its
/// parent's `children` list (then `parent` is set) or its page's root list
/// (then `page` is set). A freshly cloned rule has neither until attached.
#[derive(Clone, Debug)]
pub(crate) struct RuleNode {
    pub(crate) parent: Option<RuleId>,
    pub(crate) page: Option<PageId>,
    pub(crate) children: Vec<RuleId>,
    pub(crate) when: TileSet,
    pub(crate) do_: TileSet,
    pub(crate) dirty: bool,
    /// Cached compile result; cleared when the rule goes dirty.
    pub(crate) check: Option<RuleCheck>,
    pub(crate) alive: bool,
}

impl RuleNode {
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            page: None,
            children: Vec::new(),
            when: TileSet::new(Side::When),
            do_: TileSet::new(Side::Do),
            dirty: true,
            check: None,
            alive: true,
        }
    }

    pub(crate) fn side(&self, side: Side) -> &TileSet {
        match side {
            Side::When => &self.when,
            Side::Do => &self.do_,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut TileSet {
        match side {
            Side::When => &mut self.when,
            Side::Do => &mut self.do_,
        }
    }
}

/// Slab node of one page.
#[derive(Clone, Debug)]
pub(crate) struct PageData {
    /// Stable UUID-like identity; survives serialization.
    pub(crate) uid: String,
    pub(crate) name: String,
    pub(crate) rules: Vec<RuleId>,
    pub(crate) alive: bool,
}
