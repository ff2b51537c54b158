//! `demo`: write a small sample brain file.

use tilebrain_core::tiles::{Side, TileDef, TileId};
use tilebrain_core::types::TypeId;
use tilebrain_core::value::Value;
use tilebrain_model::{BrainDef, ModelError, page_tile_id};
use tilebrain_runtime::stdlib;

use crate::cli::DemoParams;

pub fn run(params: &DemoParams) -> i32 {
    let bytes = match build_demo() {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("cannot build demo brain: {err}");
            return 1;
        }
    };
    if let Err(err) = std::fs::write(&params.out_path, bytes) {
        eprintln!("cannot write {}: {err}", params.out_path.display());
        return 1;
    }
    println!("wrote {}", params.out_path.display());
    0
}

/// Two pages: the first greets and switches to the second, which counts.
fn build_demo() -> Result<Vec<u8>, ModelError> {
    let mut brain = BrainDef::new("demo")?;
    let intro = brain.add_page("intro")?;
    let counting = brain.add_page("counting")?;
    let counting_uid = brain.page_uid(counting)?.to_owned();

    brain.add_tile(TileDef::literal(
        "demo.hello",
        TypeId::string(),
        Value::Str("hello from the demo brain".to_owned()),
        "\"hello from the demo brain\"",
    ));
    brain.add_tile(TileDef::literal(
        "demo.one",
        TypeId::number(),
        Value::Number(1.0),
        "1",
    ));
    brain.add_tile(TileDef::variable(
        "demo.count",
        "count",
        TypeId::number(),
        "demo-count",
    ));

    // intro: WHEN true DO say("hello...") switchPage(counting)
    let greet = brain.add_rule(intro)?;
    brain.push_tile(greet, Side::When, TileId::from("lit.true"))?;
    brain.push_tile(greet, Side::Do, TileId::from(stdlib::SAY))?;
    brain.push_tile(greet, Side::Do, TileId::from("demo.hello"))?;
    brain.push_tile(greet, Side::Do, TileId::from(stdlib::SWITCH_PAGE))?;
    brain.push_tile(greet, Side::Do, page_tile_id(&counting_uid))?;

    // counting: WHEN true DO count = 1 + 1 say(count)
    let count = brain.add_rule(counting)?;
    brain.push_tile(count, Side::When, TileId::from("lit.true"))?;
    brain.push_tile(count, Side::Do, TileId::from("demo.count"))?;
    brain.push_tile(count, Side::Do, TileId::from("op.assign"))?;
    brain.push_tile(count, Side::Do, TileId::from("demo.one"))?;
    brain.push_tile(count, Side::Do, TileId::from("op.add"))?;
    brain.push_tile(count, Side::Do, TileId::from("demo.one"))?;
    brain.push_tile(count, Side::Do, TileId::from(stdlib::SAY))?;
    brain.push_tile(count, Side::Do, TileId::from("demo.count"))?;

    brain.serialize()
}
