//! The brain definition.

use std::time::Instant;

use tilebrain_compiler::{CompileEnv, RuleCheck, compile_rule};
use tilebrain_core::caps::Capabilities;
use tilebrain_core::catalog::{Catalogs, TileCatalog};
use tilebrain_core::limits::{MAX_NAME_LEN, MAX_PAGES, MAX_RULE_DEPTH};
use tilebrain_core::tiles::{Side, TileDef, TileId, TileKind};
use tilebrain_core::uid;

use crate::dirty::Debouncer;
use crate::error::ModelError;
use crate::events::{
    BrainChange, BrainEvent, ModelEvents, PageChange, PageEvent, RuleEvent, TileSetEvent,
};
use crate::ids::{PageId, RuleId};
use crate::rule::{PageData, RuleNode};
use crate::ser::{self, MissingTilePolicy};

/// A named container of pages, rules, and the per-brain tile catalog.
///
/// Ownership is strictly downward; parents and pages are id back-references
/// used only for navigation. Deleted entries stay in the slabs with their
/// `alive` flag cleared, so ids are never reused within one brain.
#[derive(Debug)]
pub struct BrainDef {
    pub(crate) name: String,
    pub(crate) page_order: Vec<PageId>,
    pub(crate) pages: Vec<PageData>,
    pub(crate) rules: Vec<RuleNode>,
    pub(crate) catalog: TileCatalog,
    pub(crate) events: ModelEvents,
    pub(crate) debounce: Debouncer,
}

fn check_name(name: &str) -> Result<(), ModelError> {
    if name.len() > MAX_NAME_LEN {
        return Err(ModelError::NameTooLong(MAX_NAME_LEN));
    }
    Ok(())
}

impl BrainDef {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self {
            name,
            page_order: Vec::new(),
            pages: Vec::new(),
            rules: Vec::new(),
            catalog: TileCatalog::new(),
            events: ModelEvents::new(),
            debounce: Debouncer::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ModelError> {
        let new = name.into();
        check_name(&new)?;
        let old = std::mem::replace(&mut self.name, new.clone());
        self.events.brain.emit(&BrainEvent::NameChanged { old, new });
        Ok(())
    }

    pub fn events(&self) -> &ModelEvents {
        &self.events
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    #[cfg(test)]
    pub(crate) fn catalog_remove_for_test(&mut self, tile: &TileId) {
        self.catalog.remove(tile);
    }

    /// Add a user-created tile (literal, variable) to the brain catalog.
    /// First-write-wins like the catalog itself.
    pub fn add_tile(&mut self, def: TileDef) -> bool {
        let added = self.catalog.add(def);
        if added {
            self.events.brain.emit(&BrainEvent::Changed {
                what: BrainChange::CatalogChanged,
            });
        }
        added
    }

    // ------------------------------------------------------------------
    // Node access
    // ------------------------------------------------------------------

    fn node(&self, rule: RuleId) -> Result<&RuleNode, ModelError> {
        self.rules
            .get(rule.index())
            .filter(|n| n.alive)
            .ok_or(ModelError::UnknownRule)
    }

    fn node_mut(&mut self, rule: RuleId) -> Result<&mut RuleNode, ModelError> {
        self.rules
            .get_mut(rule.index())
            .filter(|n| n.alive)
            .ok_or(ModelError::UnknownRule)
    }

    fn page_data(&self, page: PageId) -> Result<&PageData, ModelError> {
        self.pages
            .get(page.index())
            .filter(|p| p.alive)
            .ok_or(ModelError::UnknownPage)
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    pub fn add_page(&mut self, name: impl Into<String>) -> Result<PageId, ModelError> {
        self.add_page_with_uid(name, uid::mint("page"))
    }

    pub(crate) fn add_page_with_uid(
        &mut self,
        name: impl Into<String>,
        uid: String,
    ) -> Result<PageId, ModelError> {
        let name = name.into();
        check_name(&name)?;
        if self.page_order.len() >= MAX_PAGES {
            return Err(ModelError::MaxPagesExceeded(MAX_PAGES));
        }
        let page = PageId(self.pages.len() as u32);
        self.pages.push(PageData {
            uid,
            name,
            rules: Vec::new(),
            alive: true,
        });
        self.page_order.push(page);
        self.events.brain.emit(&BrainEvent::Changed {
            what: BrainChange::PageAdded,
        });
        self.sync_page_tiles();
        Ok(page)
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    pub fn pages(&self) -> &[PageId] {
        &self.page_order
    }

    pub fn page_at(&self, index: usize) -> Result<PageId, ModelError> {
        self.page_order
            .get(index)
            .copied()
            .ok_or(ModelError::PageIndexOutOfBounds(index))
    }

    pub fn page_name(&self, page: PageId) -> Result<&str, ModelError> {
        Ok(&self.page_data(page)?.name)
    }

    pub fn page_uid(&self, page: PageId) -> Result<&str, ModelError> {
        Ok(&self.page_data(page)?.uid)
    }

    pub fn rename_page(
        &mut self,
        page: PageId,
        name: impl Into<String>,
    ) -> Result<(), ModelError> {
        let new = name.into();
        check_name(&new)?;
        let data = self
            .pages
            .get_mut(page.index())
            .filter(|p| p.alive)
            .ok_or(ModelError::UnknownPage)?;
        let old = std::mem::replace(&mut data.name, new.clone());
        self.events
            .page
            .emit(&PageEvent::NameChanged { page, old, new });
        self.sync_page_tiles();
        Ok(())
    }

    pub fn remove_page(&mut self, page: PageId) -> Result<(), ModelError> {
        self.page_data(page)?;
        let roots = self.pages[page.index()].rules.clone();
        for rule in roots {
            self.delete_rule(rule)?;
        }
        self.pages[page.index()].alive = false;
        self.page_order.retain(|&p| p != page);
        self.events.brain.emit(&BrainEvent::Changed {
            what: BrainChange::PageRemoved,
        });
        self.sync_page_tiles();
        Ok(())
    }

    pub fn root_rules(&self, page: PageId) -> Result<&[RuleId], ModelError> {
        Ok(&self.page_data(page)?.rules)
    }

    // ------------------------------------------------------------------
    // Rule structure
    // ------------------------------------------------------------------

    /// Append a fresh root rule to a page.
    pub fn add_rule(&mut self, page: PageId) -> Result<RuleId, ModelError> {
        self.page_data(page)?;
        let rule = self.new_rule();
        self.rules[rule.index()].page = Some(page);
        self.pages[page.index()].rules.push(rule);
        self.events.page.emit(&PageEvent::Changed {
            page,
            what: PageChange::RuleAdded,
        });
        self.schedule_dirty(rule);
        Ok(rule)
    }

    /// Append a fresh child rule under a parent.
    pub fn add_child_rule(&mut self, parent: RuleId) -> Result<RuleId, ModelError> {
        self.node(parent)?;
        if self.rule_depth(parent)? + 1 > MAX_RULE_DEPTH {
            return Err(ModelError::RuleDepthExceeded(MAX_RULE_DEPTH));
        }
        let rule = self.new_rule();
        self.rules[rule.index()].parent = Some(parent);
        self.rules[parent.index()].children.push(rule);
        if let Some(page) = self.rule_page(parent)? {
            self.events.page.emit(&PageEvent::Changed {
                page,
                what: PageChange::RuleAdded,
            });
        }
        self.mark_structure_dirty(parent);
        Ok(rule)
    }

    pub(crate) fn new_rule(&mut self) -> RuleId {
        let rule = RuleId(self.rules.len() as u32);
        self.rules.push(RuleNode::new());
        rule
    }

    pub fn children(&self, rule: RuleId) -> Result<&[RuleId], ModelError> {
        Ok(&self.node(rule)?.children)
    }

    pub fn parent(&self, rule: RuleId) -> Result<Option<RuleId>, ModelError> {
        Ok(self.node(rule)?.parent)
    }

    /// The page owning this rule, found by walking the ancestor chain.
    pub fn rule_page(&self, rule: RuleId) -> Result<Option<PageId>, ModelError> {
        let mut current = rule;
        loop {
            let node = self.node(current)?;
            match (node.page, node.parent) {
                (Some(page), _) => return Ok(Some(page)),
                (None, Some(parent)) => current = parent,
                (None, None) => return Ok(None),
            }
        }
    }

    /// Depth of a rule: 1 for page-level roots.
    pub fn rule_depth(&self, rule: RuleId) -> Result<usize, ModelError> {
        let mut depth = 1;
        let mut current = self.node(rule)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent)?.parent;
        }
        Ok(depth)
    }

    /// Height of the subtree below a rule (0 for a leaf).
    pub fn subtree_height(&self, rule: RuleId) -> Result<usize, ModelError> {
        let mut height = 0;
        for &child in &self.node(rule)?.children {
            height = height.max(1 + self.subtree_height(child)?);
        }
        Ok(height)
    }

    pub fn is_dirty(&self, rule: RuleId) -> Result<bool, ModelError> {
        Ok(self.node(rule)?.dirty)
    }

    /// The sibling list owning this rule and the rule's index in it.
    fn owner_index(&self, rule: RuleId) -> Result<(Owner, usize), ModelError> {
        let node = self.node(rule)?;
        if let Some(parent) = node.parent {
            let index = self.rules[parent.index()]
                .children
                .iter()
                .position(|&r| r == rule)
                .ok_or(ModelError::UnknownRule)?;
            return Ok((Owner::Parent(parent), index));
        }
        if let Some(page) = node.page {
            let index = self.pages[page.index()]
                .rules
                .iter()
                .position(|&r| r == rule)
                .ok_or(ModelError::UnknownRule)?;
            return Ok((Owner::Page(page), index));
        }
        Err(ModelError::IllegalMove)
    }

    fn owner_list_mut(&mut self, owner: Owner) -> &mut Vec<RuleId> {
        match owner {
            Owner::Parent(parent) => &mut self.rules[parent.index()].children,
            Owner::Page(page) => &mut self.pages[page.index()].rules,
        }
    }

    pub fn can_move_up(&self, rule: RuleId) -> bool {
        matches!(self.owner_index(rule), Ok((_, index)) if index > 0)
    }

    pub fn move_up(&mut self, rule: RuleId) -> Result<(), ModelError> {
        let (owner, index) = self.owner_index(rule)?;
        if index == 0 {
            return Err(ModelError::IllegalMove);
        }
        self.owner_list_mut(owner).swap(index - 1, index);
        self.after_structure_change(rule)?;
        Ok(())
    }

    pub fn can_move_down(&self, rule: RuleId) -> bool {
        match self.owner_index(rule) {
            Ok((owner, index)) => index + 1 < self.owner_len(owner),
            Err(_) => false,
        }
    }

    fn owner_len(&self, owner: Owner) -> usize {
        match owner {
            Owner::Parent(parent) => self.rules[parent.index()].children.len(),
            Owner::Page(page) => self.pages[page.index()].rules.len(),
        }
    }

    pub fn move_down(&mut self, rule: RuleId) -> Result<(), ModelError> {
        let (owner, index) = self.owner_index(rule)?;
        if index + 1 >= self.owner_len(owner) {
            return Err(ModelError::IllegalMove);
        }
        self.owner_list_mut(owner).swap(index, index + 1);
        self.after_structure_change(rule)?;
        Ok(())
    }

    /// A rule can be indented under its previous sibling when it is not the
    /// first sibling and the resulting subtree stays within the depth cap.
    pub fn can_indent(&self, rule: RuleId) -> bool {
        let Ok((_, index)) = self.owner_index(rule) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        let (Ok(depth), Ok(height)) = (self.rule_depth(rule), self.subtree_height(rule)) else {
            return false;
        };
        depth + 1 + height <= MAX_RULE_DEPTH
    }

    pub fn indent(&mut self, rule: RuleId) -> Result<(), ModelError> {
        let (owner, index) = self.owner_index(rule)?;
        if index == 0 {
            return Err(ModelError::IllegalMove);
        }
        if self.rule_depth(rule)? + 1 + self.subtree_height(rule)? > MAX_RULE_DEPTH {
            return Err(ModelError::RuleDepthExceeded(MAX_RULE_DEPTH));
        }
        let list = self.owner_list_mut(owner);
        let new_parent = list[index - 1];
        list.remove(index);
        self.rules[new_parent.index()].children.push(rule);
        let node = &mut self.rules[rule.index()];
        node.parent = Some(new_parent);
        node.page = None;
        self.after_structure_change(rule)?;
        Ok(())
    }

    pub fn can_outdent(&self, rule: RuleId) -> bool {
        matches!(self.node(rule), Ok(node) if node.parent.is_some())
    }

    /// Re-inserts the rule immediately after its old parent in the
    /// grandparent (or page) list.
    pub fn outdent(&mut self, rule: RuleId) -> Result<(), ModelError> {
        let parent = self.node(rule)?.parent.ok_or(ModelError::IllegalMove)?;
        let (grand_owner, parent_index) = self.owner_index(parent)?;

        let children = &mut self.rules[parent.index()].children;
        let index = children
            .iter()
            .position(|&r| r == rule)
            .ok_or(ModelError::UnknownRule)?;
        children.remove(index);

        self.owner_list_mut(grand_owner).insert(parent_index + 1, rule);
        let node = &mut self.rules[rule.index()];
        match grand_owner {
            Owner::Parent(grandparent) => {
                node.parent = Some(grandparent);
                node.page = None;
            }
            Owner::Page(page) => {
                node.parent = None;
                node.page = Some(page);
            }
        }
        self.after_structure_change(rule)?;
        Ok(())
    }

    /// Detach a rule, emit `rule_deleted`, cancel its pending dirty timer,
    /// then delete children recursively.
    pub fn delete_rule(&mut self, rule: RuleId) -> Result<(), ModelError> {
        let parent = self.node(rule)?.parent;
        if let Ok((owner, index)) = self.owner_index(rule) {
            self.owner_list_mut(owner).remove(index);
            if let Owner::Page(page) = owner {
                self.events.page.emit(&PageEvent::Changed {
                    page,
                    what: PageChange::RuleRemoved,
                });
            }
        }
        self.delete_recursive(rule);
        if let Some(parent) = parent {
            if self.rules[parent.index()].alive {
                self.mark_structure_dirty(parent);
            }
        }
        Ok(())
    }

    fn delete_recursive(&mut self, rule: RuleId) {
        self.debounce.cancel(rule);
        self.events.rule.emit(&RuleEvent::Deleted { rule });
        let node = &mut self.rules[rule.index()];
        node.alive = false;
        node.parent = None;
        node.page = None;
        node.check = None;
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.delete_recursive(child);
        }
    }

    /// Clone a rule by serializing it and deserializing through the brain's
    /// catalog. The clone is unparented; attach it with `attach_root` or
    /// `attach_child`.
    pub fn clone_rule(
        &mut self,
        rule: RuleId,
        global: &TileCatalog,
    ) -> Result<RuleId, ModelError> {
        let bytes = ser::rule_to_bytes(self, rule)?;
        ser::rule_from_bytes(self, &bytes, global, MissingTilePolicy::Placeholder)
    }

    /// Attach an unparented rule as a page root at `index`.
    pub fn attach_root(
        &mut self,
        rule: RuleId,
        page: PageId,
        index: usize,
    ) -> Result<(), ModelError> {
        let node = self.node(rule)?;
        if node.parent.is_some() || node.page.is_some() {
            return Err(ModelError::AlreadyAttached);
        }
        self.page_data(page)?;
        if index > self.pages[page.index()].rules.len() {
            return Err(ModelError::IllegalMove);
        }
        self.pages[page.index()].rules.insert(index, rule);
        self.rules[rule.index()].page = Some(page);
        self.events.page.emit(&PageEvent::Changed {
            page,
            what: PageChange::RuleAdded,
        });
        self.mark_structure_dirty(rule);
        Ok(())
    }

    /// Attach an unparented rule under a parent at `index`.
    pub fn attach_child(
        &mut self,
        rule: RuleId,
        parent: RuleId,
        index: usize,
    ) -> Result<(), ModelError> {
        let node = self.node(rule)?;
        if node.parent.is_some() || node.page.is_some() {
            return Err(ModelError::AlreadyAttached);
        }
        self.node(parent)?;
        if self.rule_depth(parent)? + 1 + self.subtree_height(rule)? > MAX_RULE_DEPTH {
            return Err(ModelError::RuleDepthExceeded(MAX_RULE_DEPTH));
        }
        if index > self.rules[parent.index()].children.len() {
            return Err(ModelError::IllegalMove);
        }
        self.rules[parent.index()].children.insert(index, rule);
        self.rules[rule.index()].parent = Some(parent);
        self.mark_structure_dirty(rule);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tilesets
    // ------------------------------------------------------------------

    pub fn tiles(&self, rule: RuleId, side: Side) -> Result<&[TileId], ModelError> {
        Ok(self.node(rule)?.side(side).tiles())
    }

    pub fn insert_tile(
        &mut self,
        rule: RuleId,
        side: Side,
        index: usize,
        tile: TileId,
    ) -> Result<(), ModelError> {
        self.node_mut(rule)?.side_mut(side).insert(index, tile)?;
        self.after_tileset_change(rule, side);
        Ok(())
    }

    pub fn push_tile(&mut self, rule: RuleId, side: Side, tile: TileId) -> Result<(), ModelError> {
        self.node_mut(rule)?.side_mut(side).push(tile)?;
        self.after_tileset_change(rule, side);
        Ok(())
    }

    pub fn remove_tile(
        &mut self,
        rule: RuleId,
        side: Side,
        index: usize,
    ) -> Result<TileId, ModelError> {
        let removed = self.node_mut(rule)?.side_mut(side).remove(index)?;
        self.after_tileset_change(rule, side);
        Ok(removed)
    }

    pub fn replace_tile(
        &mut self,
        rule: RuleId,
        side: Side,
        index: usize,
        tile: TileId,
    ) -> Result<TileId, ModelError> {
        let replaced = self.node_mut(rule)?.side_mut(side).replace(index, tile)?;
        self.after_tileset_change(rule, side);
        Ok(replaced)
    }

    // ------------------------------------------------------------------
    // Dirty propagation
    // ------------------------------------------------------------------

    /// A tileset edit dirties its rule and ancestors; a WHEN-side edit also
    /// dirties the DO sibling and every descendant.
    fn after_tileset_change(&mut self, rule: RuleId, side: Side) {
        self.events.tile_set.emit(&TileSetEvent::DirtyChanged {
            rule,
            side,
            is_dirty: true,
        });
        if side == Side::When {
            self.events.tile_set.emit(&TileSetEvent::DirtyChanged {
                rule,
                side: Side::Do,
                is_dirty: true,
            });
        }
        self.mark_dirty(rule, side == Side::When);
    }

    fn after_structure_change(&mut self, rule: RuleId) -> Result<(), ModelError> {
        if let Some(page) = self.rule_page(rule)? {
            self.events.page.emit(&PageEvent::Changed {
                page,
                what: PageChange::RuleMoved,
            });
        }
        self.mark_structure_dirty(rule);
        Ok(())
    }

    fn mark_structure_dirty(&mut self, rule: RuleId) {
        self.mark_dirty(rule, true);
    }

    fn mark_dirty(&mut self, rule: RuleId, include_descendants: bool) {
        let now = Instant::now();
        let mut affected = vec![rule];

        if include_descendants {
            let mut stack = self.rules[rule.index()].children.clone();
            while let Some(next) = stack.pop() {
                affected.push(next);
                stack.extend(self.rules[next.index()].children.iter().copied());
            }
        }

        let mut current = self.rules[rule.index()].parent;
        while let Some(parent) = current {
            affected.push(parent);
            current = self.rules[parent.index()].parent;
        }

        for r in affected {
            let node = &mut self.rules[r.index()];
            node.dirty = true;
            node.check = None;
            self.debounce.schedule(r, true, now);
        }
    }

    fn schedule_dirty(&mut self, rule: RuleId) {
        self.rules[rule.index()].dirty = true;
        self.debounce.schedule(rule, true, Instant::now());
    }

    /// Deliver due debounced dirty notifications.
    pub fn flush_events(&mut self, now: Instant) {
        for (rule, is_dirty) in self.debounce.take_due(now) {
            self.events
                .rule
                .emit(&RuleEvent::DirtyChanged { rule, is_dirty });
        }
    }

    /// Deliver every pending dirty notification regardless of deadline.
    pub fn flush_all_events(&mut self) {
        for (rule, is_dirty) in self.debounce.take_all() {
            self.events
                .rule
                .emit(&RuleEvent::DirtyChanged { rule, is_dirty });
        }
    }

    pub fn has_pending_events(&self) -> bool {
        self.debounce.has_pending()
    }

    // ------------------------------------------------------------------
    // Rule compilation
    // ------------------------------------------------------------------

    /// Capabilities OR'd from all enclosing rules' WHEN-side tiles.
    pub fn inherited_caps(&self, rule: RuleId, global: &TileCatalog) -> Capabilities {
        let catalogs = Catalogs::with_brain(&self.catalog, global);
        let mut caps = Capabilities::empty();
        let mut current = self
            .rules
            .get(rule.index())
            .and_then(|node| node.parent);
        while let Some(parent) = current {
            let node = &self.rules[parent.index()];
            for tile in node.when.tiles() {
                if let Some(def) = catalogs.get(tile) {
                    caps |= def.caps;
                }
            }
            current = node.parent;
        }
        caps
    }

    /// Compile the rule (both sides), cache the result, and clear dirty.
    pub fn typecheck_rule(
        &mut self,
        rule: RuleId,
        env: &CompileEnv,
    ) -> Result<&RuleCheck, ModelError> {
        self.node(rule)?;
        let caps = self.inherited_caps(rule, &env.global_catalog);
        let check = {
            let node = &self.rules[rule.index()];
            let catalogs = Catalogs::with_brain(&self.catalog, &env.global_catalog);
            compile_rule(node.when.tiles(), node.do_.tiles(), catalogs, env, caps)
        };

        let node = &mut self.rules[rule.index()];
        node.check = Some(check);
        node.dirty = false;
        self.debounce.schedule(rule, false, Instant::now());
        self.events.tile_set.emit(&TileSetEvent::Typechecked {
            rule,
            side: Side::When,
        });
        self.events.tile_set.emit(&TileSetEvent::Typechecked {
            rule,
            side: Side::Do,
        });

        Ok(self.rules[rule.index()]
            .check
            .as_ref()
            .expect("check cached above"))
    }

    pub fn rule_check(&self, rule: RuleId) -> Option<&RuleCheck> {
        self.rules.get(rule.index()).and_then(|n| n.check.as_ref())
    }

    // ------------------------------------------------------------------
    // Catalog reconciliation
    // ------------------------------------------------------------------

    /// Whether any rule references the tile id on either side.
    pub fn contains_tile_id(&self, tile: &TileId) -> bool {
        self.rules.iter().any(|node| {
            node.alive && (node.when.contains(tile) || node.do_.contains(tile))
        })
    }

    /// Remove catalog entries no rule references. Page tiles are exempt;
    /// `sync_page_tiles` reconciles those.
    pub fn purge_unused_tiles(&mut self) {
        let unused: Vec<TileId> = self
            .catalog
            .iter()
            .filter(|def| !matches!(def.kind, TileKind::Page { .. }))
            .filter(|def| !self.contains_tile_id(&def.id))
            .map(|def| def.id.clone())
            .collect();
        if unused.is_empty() {
            return;
        }
        for tile in &unused {
            self.catalog.remove(tile);
        }
        self.events.brain.emit(&BrainEvent::Changed {
            what: BrainChange::CatalogChanged,
        });
    }

    /// Reconcile page tiles: every living page has a visible catalog entry
    /// whose label is the page name; entries for dead pages are hidden.
    pub fn sync_page_tiles(&mut self) {
        let live: Vec<(String, String)> = self
            .page_order
            .iter()
            .map(|&p| {
                let data = &self.pages[p.index()];
                (data.uid.clone(), data.name.clone())
            })
            .collect();

        for (uid, name) in &live {
            let tile_id = page_tile_id(uid);
            match self.catalog.get_mut(&tile_id) {
                Some(def) => {
                    def.visual.label = name.clone();
                    def.hidden = false;
                }
                None => {
                    self.catalog.add(TileDef::page(tile_id, uid.clone(), name.clone()));
                }
            }
        }

        let orphaned: Vec<TileId> = self
            .catalog
            .iter()
            .filter_map(|def| match &def.kind {
                TileKind::Page { page_id } if !live.iter().any(|(uid, _)| uid == page_id) => {
                    Some(def.id.clone())
                }
                _ => None,
            })
            .collect();
        for tile in orphaned {
            if let Some(def) = self.catalog.get_mut(&tile) {
                def.hidden = true;
            }
        }
    }

    // ------------------------------------------------------------------
    // Serialization facade
    // ------------------------------------------------------------------

    pub fn serialize(&self) -> Result<Vec<u8>, ModelError> {
        ser::brain_to_bytes(self)
    }

    pub fn deserialize(
        bytes: &[u8],
        global: &TileCatalog,
        policy: MissingTilePolicy,
    ) -> Result<BrainDef, ModelError> {
        ser::brain_from_bytes(bytes, global, policy)
    }
}

/// The catalog tile id for a page uid.
pub fn page_tile_id(uid: &str) -> TileId {
    TileId::new(format!("page.{uid}"))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Owner {
    Parent(RuleId),
    Page(PageId),
}

impl Clone for BrainDef {
    /// Structural deep clone: same pages, rules, tiles; fresh event hub and
    /// no pending debounce. The clone shares no mutable state with the
    /// original.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            page_order: self.page_order.clone(),
            pages: self.pages.clone(),
            rules: self.rules.clone(),
            catalog: self.catalog.clone(),
            events: ModelEvents::new(),
            debounce: Debouncer::new(),
        }
    }
}
