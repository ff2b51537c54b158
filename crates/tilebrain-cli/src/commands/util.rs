//! Shared command plumbing.

use std::path::Path;

use tilebrain_compiler::CompileEnv;
use tilebrain_model::{BrainDef, MissingTilePolicy};
use tilebrain_runtime::stdlib;

/// Load a brain file against the standard environment.
pub fn load_brain(path: &Path, placeholders: bool) -> Result<(BrainDef, CompileEnv), String> {
    let env = stdlib::standard_env();
    let bytes =
        std::fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let policy = if placeholders {
        MissingTilePolicy::Placeholder
    } else {
        MissingTilePolicy::Fail
    };
    let brain = BrainDef::deserialize(&bytes, &env.global_catalog, policy)
        .map_err(|e| format!("cannot load {}: {e}", path.display()))?;
    Ok((brain, env))
}
