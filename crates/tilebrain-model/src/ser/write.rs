//! Brain and rule encoders.

use tilebrain_core::stream::TagStream;
use tilebrain_core::tiles::{Side, TileId};

use super::write_catalog;
use super::{
    BRAN, BRAN_VERSION, CRCT, NAME, PAGE, PAGE_VERSION, PGCT, PGID, RLCT, RUL1, RUL1_VERSION,
    RUL2, RUL2_VERSION, TCNT, TSET, TSET_VERSION,
};
use crate::brain::BrainDef;
use crate::error::ModelError;
use crate::ids::RuleId;

pub(crate) fn brain_to_bytes(brain: &BrainDef) -> Result<Vec<u8>, ModelError> {
    let mut stream = TagStream::new();
    stream.push_chunk(BRAN, BRAN_VERSION);

    stream.write_tagged_str(NAME, brain.name())?;
    write_catalog(&mut stream, brain.catalog())?;

    stream.write_tagged_u32(PGCT, brain.pages().len() as u32);
    for &page in brain.pages() {
        stream.push_chunk(PAGE, PAGE_VERSION);
        stream.write_tagged_str(NAME, brain.page_name(page)?)?;
        stream.write_tagged_str(PGID, brain.page_uid(page)?)?;

        let roots = brain.root_rules(page)?;
        stream.write_tagged_u32(RLCT, roots.len() as u32);
        for &rule in roots {
            write_rule(&mut stream, brain, rule)?;
        }
        stream.pop_chunk()?;
    }

    stream.pop_chunk()?;
    Ok(stream.into_bytes())
}

/// Serialize one rule subtree (the clone primitive).
pub(crate) fn rule_to_bytes(brain: &BrainDef, rule: RuleId) -> Result<Vec<u8>, ModelError> {
    let mut stream = TagStream::new();
    write_rule(&mut stream, brain, rule)?;
    Ok(stream.into_bytes())
}

fn write_rule(stream: &mut TagStream, brain: &BrainDef, rule: RuleId) -> Result<(), ModelError> {
    stream.push_chunk(RUL1, RUL1_VERSION);

    stream.push_chunk(RUL2, RUL2_VERSION);
    write_tileset(stream, brain.tiles(rule, Side::When)?)?;
    write_tileset(stream, brain.tiles(rule, Side::Do)?)?;
    stream.pop_chunk()?;

    let children = brain.children(rule)?.to_vec();
    stream.write_tagged_u32(CRCT, children.len() as u32);
    for child in children {
        write_rule(stream, brain, child)?;
    }

    stream.pop_chunk()?;
    Ok(())
}

fn write_tileset(stream: &mut TagStream, tiles: &[TileId]) -> Result<(), ModelError> {
    stream.push_chunk(TSET, TSET_VERSION);
    stream.write_tagged_u32(TCNT, tiles.len() as u32);
    for tile in tiles {
        stream.write_str(tile.as_str())?;
    }
    stream.pop_chunk()?;
    Ok(())
}
