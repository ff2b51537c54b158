//! Tests for the tile catalog.

use crate::catalog::{Catalogs, TileCatalog};
use crate::tiles::{TileDef, TileId};
use crate::types::TypeId;
use crate::value::Value;

fn lit(id: &str, n: f64) -> TileDef {
    TileDef::literal(id, TypeId::number(), Value::Number(n), n.to_string())
}

#[test]
fn add_is_first_write_wins() {
    let mut catalog = TileCatalog::new();
    assert!(catalog.add(lit("n.1", 1.0)));
    assert!(!catalog.add(lit("n.1", 99.0)));

    let def = catalog.get(&TileId::from("n.1")).unwrap();
    match &def.kind {
        crate::tiles::TileKind::Literal { value, .. } => {
            assert_eq!(value, &Value::Number(1.0));
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn remove_and_find() {
    let mut catalog = TileCatalog::new();
    catalog.add(lit("n.1", 1.0));
    catalog.add(lit("n.2", 2.0));

    let found = catalog.find(|def| def.visual.label == "2");
    assert_eq!(found.unwrap().id, TileId::from("n.2"));

    assert!(catalog.remove(&TileId::from("n.1")).is_some());
    assert!(!catalog.has(&TileId::from("n.1")));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn layered_lookup_prefers_brain_catalog() {
    let mut global = TileCatalog::new();
    global.add(lit("n.shared", 1.0));
    global.add(lit("n.global", 10.0));

    let mut brain = TileCatalog::new();
    brain.add(lit("n.shared", 2.0));
    brain.add(lit("n.local", 20.0));

    let layered = Catalogs::with_brain(&brain, &global);
    let shared = layered.get(&TileId::from("n.shared")).unwrap();
    match &shared.kind {
        crate::tiles::TileKind::Literal { value, .. } => assert_eq!(value, &Value::Number(2.0)),
        other => panic!("unexpected kind {other:?}"),
    }
    assert!(layered.has(&TileId::from("n.global")));
    assert!(layered.has(&TileId::from("n.local")));
    assert!(!layered.has(&TileId::from("n.absent")));

    let global_only = Catalogs::global_only(&global);
    assert!(!global_only.has(&TileId::from("n.local")));
}
