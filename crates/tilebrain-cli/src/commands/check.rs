//! `check`: compile every rule and report diagnostics.

use tilebrain_compiler::DiagnosticsPrinter;
use tilebrain_core::catalog::Catalogs;
use tilebrain_core::tiles::Side;
use tilebrain_model::{BrainDef, RuleId};

use super::util::load_brain;
use crate::cli::CheckParams;

pub fn run(params: &CheckParams) -> i32 {
    let (mut brain, env) = match load_brain(&params.brain_path, params.placeholders) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };

    let mut rule_count = 0usize;
    let mut error_count = 0usize;

    let pages: Vec<_> = brain.pages().to_vec();
    for &page in &pages {
        let roots = match brain.root_rules(page) {
            Ok(roots) => roots.to_vec(),
            Err(_) => continue,
        };
        for rule in roots {
            check_rule_tree(&mut brain, &env, rule, &mut rule_count, &mut error_count);
        }
    }

    if error_count == 0 {
        println!("{rule_count} rules, no errors");
        0
    } else {
        println!("{rule_count} rules, {error_count} with errors");
        1
    }
}

fn check_rule_tree(
    brain: &mut BrainDef,
    env: &tilebrain_compiler::CompileEnv,
    rule: RuleId,
    rule_count: &mut usize,
    error_count: &mut usize,
) {
    *rule_count += 1;

    let check = match brain.typecheck_rule(rule, env) {
        Ok(check) => check.clone(),
        Err(err) => {
            eprintln!("rule could not be compiled: {err}");
            *error_count += 1;
            return;
        }
    };

    if check.has_errors() {
        *error_count += 1;
        let catalogs = Catalogs::with_brain(brain.catalog(), &env.global_catalog);
        for (side, checked) in [(Side::When, &check.when), (Side::Do, &check.do_)] {
            if checked.has_errors() {
                println!("{side} side:");
                let mut merged = checked.parse.diagnostics.clone();
                merged.extend(checked.info.diagnostics.iter().cloned());
                let rendered = DiagnosticsPrinter::new(&merged)
                    .tiles(&checked.parse.tiles)
                    .catalogs(catalogs)
                    .render();
                print!("{rendered}");
            }
        }
    }

    let children = brain.children(rule).map(|c| c.to_vec()).unwrap_or_default();
    for child in children {
        check_rule_tree(brain, env, child, rule_count, error_count);
    }
}
