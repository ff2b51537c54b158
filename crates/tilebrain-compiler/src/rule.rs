//! Combined WHEN+DO rule compilation.

use tilebrain_core::caps::Capabilities;
use tilebrain_core::catalog::Catalogs;
use tilebrain_core::tiles::TileId;

use crate::diagnostics::Diagnostic;
use crate::env::CompileEnv;
use crate::parser::{ParseResult, parse_do, parse_when};
use crate::typecheck::{CheckHints, TypeInfo, typecheck};

/// One side's parse plus its type information.
#[derive(Clone, Debug)]
pub struct CheckedTiles {
    pub parse: ParseResult,
    pub info: TypeInfo,
}

impl CheckedTiles {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.parse.diagnostics.iter().chain(self.info.diagnostics.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.parse.diagnostics.has_errors() || self.info.diagnostics.has_errors()
    }
}

/// Cached compile result of one rule: both sides plus merged diagnostics.
#[derive(Clone, Debug)]
pub struct RuleCheck {
    pub when: CheckedTiles,
    pub do_: CheckedTiles,
}

impl RuleCheck {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.when.diagnostics().chain(self.do_.diagnostics())
    }

    pub fn has_errors(&self) -> bool {
        self.when.has_errors() || self.do_.has_errors()
    }
}

/// Compile a rule: parse and typecheck both sides.
///
/// `inherited_caps` are the capabilities OR'd from all enclosing rules'
/// WHEN-side tiles. The WHEN root is expected to be Boolean; the DO side
/// additionally sees the capabilities granted by this rule's own WHEN tiles.
pub fn compile_rule(
    when_tiles: &[TileId],
    do_tiles: &[TileId],
    catalogs: Catalogs<'_>,
    env: &CompileEnv,
    inherited_caps: Capabilities,
) -> RuleCheck {
    let when_parse = parse_when(when_tiles, catalogs, env);
    let when_info = typecheck(
        &when_parse,
        catalogs,
        env,
        &CheckHints::when_boolean(inherited_caps),
    );

    let do_caps = inherited_caps | when_granted_caps(when_tiles, catalogs);
    let do_parse = parse_do(do_tiles, catalogs, env);
    let do_info = typecheck(&do_parse, catalogs, env, &CheckHints::do_side(do_caps));

    RuleCheck {
        when: CheckedTiles {
            parse: when_parse,
            info: when_info,
        },
        do_: CheckedTiles {
            parse: do_parse,
            info: do_info,
        },
    }
}

/// Capabilities a rule's WHEN tiles grant to its own DO side and to
/// descendant rules.
pub fn when_granted_caps(when_tiles: &[TileId], catalogs: Catalogs<'_>) -> Capabilities {
    let mut caps = Capabilities::empty();
    for tile in when_tiles {
        if let Some(def) = catalogs.get(tile) {
            caps |= def.caps;
        }
    }
    caps
}
