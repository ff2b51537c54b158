//! Brain and rule decoders.

use tilebrain_core::catalog::{Catalogs, TileCatalog};
use tilebrain_core::limits::MAX_TILESET_TILES;
use tilebrain_core::stream::{TagStream, check_version};
use tilebrain_core::tiles::{TileDef, TileId};
use tilebrain_core::uid;

use super::read_catalog;
use super::{
    BRAN, BRAN_VERSION, CRCT, MissingTilePolicy, NAME, PAGE, PAGE_VERSION, PGCT, PGID, RLCT,
    RUL1, RUL1_VERSION, RUL2, RUL2_VERSION, TCNT, TSET, TSET_VERSION,
};
use crate::brain::BrainDef;
use crate::error::ModelError;
use crate::ids::RuleId;

pub(crate) fn brain_from_bytes(
    bytes: &[u8],
    global: &TileCatalog,
    policy: MissingTilePolicy,
) -> Result<BrainDef, ModelError> {
    let mut stream = TagStream::from_bytes(bytes.to_vec());

    let version = stream.enter_chunk(BRAN)?;
    check_version(BRAN, version, BRAN_VERSION)?;

    let name = stream.read_tagged_str(NAME)?;
    let mut brain = BrainDef::new(name)?;

    read_catalog(&mut stream, &mut brain.catalog)?;

    let page_count = stream.read_tagged_u32(PGCT)?;
    for _ in 0..page_count {
        let page_version = stream.enter_chunk(PAGE)?;
        check_version(PAGE, page_version, PAGE_VERSION)?;

        let page_name = stream.read_tagged_str(NAME)?;
        // v1 pages predate stable page ids; mint one on load.
        let page_uid = if page_version >= 2 {
            stream.read_tagged_str(PGID)?
        } else {
            uid::mint("page")
        };
        let page = brain.add_page_with_uid(page_name, page_uid)?;

        let rule_count = stream.read_tagged_u32(RLCT)?;
        for _ in 0..rule_count {
            let rule = read_rule(&mut stream, &mut brain, global, policy)?;
            let index = brain.root_rules(page)?.len();
            brain.attach_root(rule, page, index)?;
        }

        stream.leave_chunk()?;
    }

    stream.leave_chunk()?;
    brain.sync_page_tiles();
    Ok(brain)
}

/// Decode one rule subtree into `brain` (the clone primitive). The returned
/// rule is unparented.
pub(crate) fn rule_from_bytes(
    brain: &mut BrainDef,
    bytes: &[u8],
    global: &TileCatalog,
    policy: MissingTilePolicy,
) -> Result<RuleId, ModelError> {
    let mut stream = TagStream::from_bytes(bytes.to_vec());
    read_rule(&mut stream, brain, global, policy)
}

fn read_rule(
    stream: &mut TagStream,
    brain: &mut BrainDef,
    global: &TileCatalog,
    policy: MissingTilePolicy,
) -> Result<RuleId, ModelError> {
    let version = stream.enter_chunk(RUL1)?;
    check_version(RUL1, version, RUL1_VERSION)?;

    let inner_version = stream.enter_chunk(RUL2)?;
    check_version(RUL2, inner_version, RUL2_VERSION)?;
    let when = read_tileset(stream, brain, global, policy)?;
    let do_ = read_tileset(stream, brain, global, policy)?;
    stream.leave_chunk()?;

    let rule = brain.new_rule();
    for tile in when {
        brain.rules[rule.index()].when.push(tile)?;
    }
    for tile in do_ {
        brain.rules[rule.index()].do_.push(tile)?;
    }

    let child_count = stream.read_tagged_u32(CRCT)?;
    for _ in 0..child_count {
        let child = read_rule(stream, brain, global, policy)?;
        brain.rules[child.index()].parent = Some(rule);
        brain.rules[rule.index()].children.push(child);
    }

    stream.leave_chunk()?;
    Ok(rule)
}

fn read_tileset(
    stream: &mut TagStream,
    brain: &mut BrainDef,
    global: &TileCatalog,
    policy: MissingTilePolicy,
) -> Result<Vec<TileId>, ModelError> {
    let version = stream.enter_chunk(TSET)?;
    check_version(TSET, version, TSET_VERSION)?;

    let count = stream.read_tagged_u32(TCNT)? as usize;
    if count > MAX_TILESET_TILES {
        return Err(ModelError::TileSetCapacityExceeded(MAX_TILESET_TILES));
    }

    let mut tiles = Vec::with_capacity(count);
    for _ in 0..count {
        let tile = TileId::new(stream.read_str()?);
        let resolved = Catalogs::with_brain(&brain.catalog, global).has(&tile);
        if !resolved {
            match policy {
                MissingTilePolicy::Fail => return Err(ModelError::MissingTile(tile)),
                MissingTilePolicy::Placeholder => {
                    brain.catalog.add(TileDef::missing(
                        tile.clone(),
                        "unknown",
                        tile.as_str().to_owned(),
                    ));
                }
            }
        }
        tiles.push(tile);
    }

    stream.leave_chunk()?;
    Ok(tiles)
}
