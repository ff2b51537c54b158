//! `dump`: print a brain's catalog and page/rule tree.

use serde_json::json;

use tilebrain_core::catalog::Catalogs;
use tilebrain_core::tiles::{Side, TileId};
use tilebrain_model::{BrainDef, RuleId};

use super::util::load_brain;
use crate::cli::DumpParams;

pub fn run(params: &DumpParams) -> i32 {
    let (brain, env) = match load_brain(&params.brain_path, params.placeholders) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };

    if params.json {
        match to_json(&brain) {
            Ok(rendered) => println!("{rendered}"),
            Err(message) => {
                eprintln!("{message}");
                return 1;
            }
        }
        return 0;
    }

    let catalogs = Catalogs::with_brain(brain.catalog(), &env.global_catalog);
    println!("brain {:?}", brain.name());

    println!("catalog ({} tiles):", brain.catalog().len());
    for def in brain.catalog().iter() {
        let hidden = if def.hidden { " (hidden)" } else { "" };
        println!("  {} [{}] {:?}{hidden}", def.id, def.kind.name(), def.visual.label);
    }

    for (index, &page) in brain.pages().iter().enumerate() {
        let name = brain.page_name(page).unwrap_or("?");
        let uid = brain.page_uid(page).unwrap_or("?");
        println!("page {index} {name:?} ({uid})");
        if let Ok(roots) = brain.root_rules(page) {
            for &rule in roots {
                print_rule(&brain, catalogs, rule, 1);
            }
        }
    }
    0
}

fn print_rule(brain: &BrainDef, catalogs: Catalogs<'_>, rule: RuleId, indent: usize) {
    let pad = "  ".repeat(indent);
    println!(
        "{pad}when {} do {}",
        render_tiles(brain, catalogs, rule, Side::When),
        render_tiles(brain, catalogs, rule, Side::Do),
    );
    if let Ok(children) = brain.children(rule) {
        for &child in children {
            print_rule(brain, catalogs, child, indent + 1);
        }
    }
}

fn render_tiles(brain: &BrainDef, catalogs: Catalogs<'_>, rule: RuleId, side: Side) -> String {
    let Ok(tiles) = brain.tiles(rule, side) else {
        return "?".to_owned();
    };
    if tiles.is_empty() {
        return "[]".to_owned();
    }
    let labels: Vec<String> = tiles.iter().map(|t| label_of(catalogs, t)).collect();
    format!("[{}]", labels.join(" "))
}

fn label_of(catalogs: Catalogs<'_>, tile: &TileId) -> String {
    catalogs
        .get(tile)
        .map(|def| def.visual.label.clone())
        .unwrap_or_else(|| tile.as_str().to_owned())
}

fn to_json(brain: &BrainDef) -> Result<String, String> {
    let catalog: Vec<serde_json::Value> = brain
        .catalog()
        .iter()
        .map(|def| {
            json!({
                "id": def.id.as_str(),
                "kind": def.kind.name(),
                "label": def.visual.label,
                "persist": def.persist,
                "hidden": def.hidden,
            })
        })
        .collect();

    let pages: Vec<serde_json::Value> = brain
        .pages()
        .iter()
        .map(|&page| {
            let rules: Vec<serde_json::Value> = brain
                .root_rules(page)
                .map(|roots| roots.iter().map(|&r| rule_json(brain, r)).collect())
                .unwrap_or_default();
            json!({
                "name": brain.page_name(page).unwrap_or("?"),
                "pageId": brain.page_uid(page).unwrap_or("?"),
                "rules": rules,
            })
        })
        .collect();

    let doc = json!({
        "name": brain.name(),
        "catalog": catalog,
        "pages": pages,
    });
    serde_json::to_string_pretty(&doc).map_err(|e| format!("cannot render JSON: {e}"))
}

fn rule_json(brain: &BrainDef, rule: RuleId) -> serde_json::Value {
    let tile_ids = |side: Side| -> Vec<String> {
        brain
            .tiles(rule, side)
            .map(|tiles| tiles.iter().map(|t| t.as_str().to_owned()).collect())
            .unwrap_or_default()
    };
    let children: Vec<serde_json::Value> = brain
        .children(rule)
        .map(|kids| kids.iter().map(|&c| rule_json(brain, c)).collect())
        .unwrap_or_default();
    json!({
        "when": tile_ids(Side::When),
        "do": tile_ids(Side::Do),
        "children": children,
    })
}
