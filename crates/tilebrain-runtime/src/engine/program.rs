//! Immutable compiled form of a brain.

use std::collections::{HashMap, HashSet};

use tilebrain_compiler::{CompileEnv, Diagnostics, RuleCheck, compile_rule};
use tilebrain_core::catalog::{Catalogs, TileCatalog};
use tilebrain_core::tiles::{Side, TileId, TileKind};
use tilebrain_model::{BrainDef, RuleId};

/// A compiled rule: both checked sides, children in source order, and the
/// sensor tiles the rule references (hosts use these to phase sensors on
/// and off per page).
pub struct ProgramRule {
    /// Preorder index across the whole program; reported to sensors as the
    /// current rule.
    pub index: u32,
    pub check: RuleCheck,
    pub children: Vec<ProgramRule>,
    pub sensors: Vec<TileId>,
}

/// A compiled page: rules in source order.
pub struct ProgramPage {
    pub uid: String,
    pub name: String,
    pub rules: Vec<ProgramRule>,
}

impl ProgramPage {
    /// All sensor tiles referenced anywhere on this page.
    pub fn sensor_tiles(&self) -> HashSet<TileId> {
        fn collect(rule: &ProgramRule, out: &mut HashSet<TileId>) {
            out.extend(rule.sensors.iter().cloned());
            for child in &rule.children {
                collect(child, out);
            }
        }
        let mut out = HashSet::new();
        for rule in &self.rules {
            collect(rule, &mut out);
        }
        out
    }
}

/// Immutable program: pages indexed 0..N-1 in source order, plus a snapshot
/// of the brain catalog so tile references resolve without the model.
pub struct Program {
    pages: Vec<ProgramPage>,
    page_by_uid: HashMap<String, usize>,
    catalog: TileCatalog,
}

impl Program {
    /// Compile a brain. Diagnostics from all rules are merged; a program is
    /// produced even when rules have errors (erroneous rules evaluate to
    /// their recovery forms).
    pub fn compile(brain: &BrainDef, env: &CompileEnv) -> (Program, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut pages = Vec::with_capacity(brain.page_count());
        let mut page_by_uid = HashMap::new();
        let mut next_index = 0u32;

        for &page in brain.pages() {
            let uid = brain
                .page_uid(page)
                .expect("live page listed by brain")
                .to_owned();
            let name = brain
                .page_name(page)
                .expect("live page listed by brain")
                .to_owned();
            let roots = brain
                .root_rules(page)
                .expect("live page listed by brain")
                .to_vec();

            let rules = roots
                .iter()
                .map(|&rule| {
                    compile_rule_tree(brain, env, rule, &mut next_index, &mut diagnostics)
                })
                .collect();

            page_by_uid.insert(uid.clone(), pages.len());
            pages.push(ProgramPage { uid, name, rules });
        }

        let program = Program {
            pages,
            page_by_uid,
            catalog: brain.catalog().clone(),
        };
        (program, diagnostics)
    }

    pub fn pages(&self) -> &[ProgramPage] {
        &self.pages
    }

    pub fn page_index(&self, uid: &str) -> Option<usize> {
        self.page_by_uid.get(uid).copied()
    }

    /// Lookup view over the compiled brain catalog and the global catalog.
    pub fn catalogs<'a>(&'a self, env: &'a CompileEnv) -> Catalogs<'a> {
        Catalogs::with_brain(&self.catalog, &env.global_catalog)
    }
}

fn compile_rule_tree(
    brain: &BrainDef,
    env: &CompileEnv,
    rule: RuleId,
    next_index: &mut u32,
    diagnostics: &mut Diagnostics,
) -> ProgramRule {
    let index = *next_index;
    *next_index += 1;

    let when = brain
        .tiles(rule, Side::When)
        .expect("rule listed by its owner")
        .to_vec();
    let do_ = brain
        .tiles(rule, Side::Do)
        .expect("rule listed by its owner")
        .to_vec();

    let catalogs = Catalogs::with_brain(brain.catalog(), &env.global_catalog);
    let caps = brain.inherited_caps(rule, &env.global_catalog);
    let check: RuleCheck = compile_rule(&when, &do_, catalogs, env, caps);
    diagnostics.extend(check.diagnostics().cloned());

    let sensors = when
        .iter()
        .chain(do_.iter())
        .filter(|tile| {
            matches!(
                catalogs.get(tile).map(|def| &def.kind),
                Some(TileKind::Sensor { .. })
            )
        })
        .cloned()
        .collect();

    let children = brain
        .children(rule)
        .expect("rule listed by its owner")
        .to_vec()
        .into_iter()
        .map(|child| compile_rule_tree(brain, env, child, next_index, diagnostics))
        .collect();

    ProgramRule {
        index,
        check,
        children,
        sensors,
    }
}
