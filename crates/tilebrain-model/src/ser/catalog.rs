//! Catalog serialization: persist-marked tiles only.

use tilebrain_core::catalog::TileCatalog;
use tilebrain_core::stream::{TagStream, check_version};
use tilebrain_core::tiles::{TileDef, TileId, TileKind};

use super::value::{read_type_id, read_value, write_type_id, write_value};
use super::{
    BLIT, BMIS, BPAG, BVAR, PAYLOAD_VERSION, TCAT, TCAT_VERSION, TCNT, TDHD, TDHD_VERSION, TIID,
    TKND,
};
use crate::error::ModelError;

fn is_serializable(def: &TileDef) -> bool {
    def.persist
        && matches!(
            def.kind,
            TileKind::Literal { .. }
                | TileKind::Variable { .. }
                | TileKind::Page { .. }
                | TileKind::Missing { .. }
        )
}

pub(crate) fn write_catalog(
    stream: &mut TagStream,
    catalog: &TileCatalog,
) -> Result<(), ModelError> {
    stream.push_chunk(TCAT, TCAT_VERSION);

    let persisted: Vec<&TileDef> = catalog.iter().filter(|def| is_serializable(def)).collect();
    stream.write_tagged_u32(TCNT, persisted.len() as u32);

    for def in persisted {
        stream.push_chunk(TDHD, TDHD_VERSION);
        stream.write_tagged_str(TKND, def.kind.name())?;
        stream.write_tagged_str(TIID, def.id.as_str())?;
        stream.pop_chunk()?;

        match &def.kind {
            TileKind::Literal {
                value_type,
                value,
                label,
            } => {
                stream.push_chunk(BLIT, PAYLOAD_VERSION);
                write_type_id(stream, value_type)?;
                stream.write_str(label)?;
                write_value(stream, value)?;
                stream.pop_chunk()?;
            }
            TileKind::Variable {
                name,
                var_type,
                unique_id,
            } => {
                stream.push_chunk(BVAR, PAYLOAD_VERSION);
                stream.write_str(name)?;
                write_type_id(stream, var_type)?;
                stream.write_str(unique_id)?;
                stream.pop_chunk()?;
            }
            TileKind::Page { page_id } => {
                stream.push_chunk(BPAG, PAYLOAD_VERSION);
                stream.write_str(page_id)?;
                stream.pop_chunk()?;
            }
            TileKind::Missing {
                original_kind,
                label,
            } => {
                stream.push_chunk(BMIS, PAYLOAD_VERSION);
                stream.write_str(original_kind)?;
                stream.write_str(label)?;
                stream.pop_chunk()?;
            }
            _ => unreachable!("filtered to serializable kinds"),
        }
    }

    stream.pop_chunk()?;
    Ok(())
}

/// Read a catalog chunk into `target`. Already-present tile ids are left
/// untouched (first-write-wins); records of unknown kind are skipped.
pub(crate) fn read_catalog(
    stream: &mut TagStream,
    target: &mut TileCatalog,
) -> Result<(), ModelError> {
    let version = stream.enter_chunk(TCAT)?;
    check_version(TCAT, version, TCAT_VERSION)?;

    let count = stream.read_tagged_u32(TCNT)?;
    for _ in 0..count {
        let header_version = stream.enter_chunk(TDHD)?;
        check_version(TDHD, header_version, TDHD_VERSION)?;
        let kind = stream.read_tagged_str(TKND)?;
        let tile_id = TileId::new(stream.read_tagged_str(TIID)?);
        stream.leave_chunk()?;

        let def = match kind.as_str() {
            "literal" => {
                let version = stream.enter_chunk(BLIT)?;
                check_version(BLIT, version, PAYLOAD_VERSION)?;
                let value_type = read_type_id(stream)?;
                let label = stream.read_str()?;
                let value = read_value(stream)?;
                stream.leave_chunk()?;
                Some(TileDef::literal(tile_id, value_type, value, label))
            }
            "variable" => {
                let version = stream.enter_chunk(BVAR)?;
                check_version(BVAR, version, PAYLOAD_VERSION)?;
                let name = stream.read_str()?;
                let var_type = read_type_id(stream)?;
                let unique_id = stream.read_str()?;
                stream.leave_chunk()?;
                Some(TileDef::variable(tile_id, name, var_type, unique_id))
            }
            "page" => {
                let version = stream.enter_chunk(BPAG)?;
                check_version(BPAG, version, PAYLOAD_VERSION)?;
                let page_id = stream.read_str()?;
                stream.leave_chunk()?;
                // The label is reconciled from the live page by
                // sync_page_tiles after load.
                Some(TileDef::page(tile_id, page_id.clone(), page_id))
            }
            "missing" => {
                let version = stream.enter_chunk(BMIS)?;
                check_version(BMIS, version, PAYLOAD_VERSION)?;
                let original_kind = stream.read_str()?;
                let label = stream.read_str()?;
                stream.leave_chunk()?;
                Some(TileDef::missing(tile_id, original_kind, label))
            }
            _ => {
                // A kind written by a newer encoder: skip its payload chunk.
                stream.enter_any_chunk()?;
                stream.leave_chunk()?;
                None
            }
        };

        if let Some(def) = def {
            target.add(def);
        }
    }

    stream.leave_chunk()?;
    Ok(())
}
