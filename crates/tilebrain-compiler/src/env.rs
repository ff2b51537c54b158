//! Shared compilation environment.
//!
//! Built once at startup and treated as effectively immutable thereafter:
//! the process-global tile catalog plus the type, operator, overload,
//! conversion, and function registries. Per-brain catalogs layer on top via
//! `Catalogs`.

use tilebrain_core::catalog::{Catalogs, TileCatalog};
use tilebrain_core::funcs::FnRegistry;
use tilebrain_core::ops::{ConversionTable, OperatorDefs, OverloadTable};
use tilebrain_core::types::TypeRegistry;

pub struct CompileEnv {
    pub types: TypeRegistry,
    pub ops: OperatorDefs,
    pub overloads: OverloadTable,
    pub conversions: ConversionTable,
    pub functions: FnRegistry,
    pub global_catalog: TileCatalog,
}

impl CompileEnv {
    /// Empty environment with the standard operator precedence table.
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            ops: OperatorDefs::standard(),
            overloads: OverloadTable::new(),
            conversions: ConversionTable::new(),
            functions: FnRegistry::new(),
            global_catalog: TileCatalog::new(),
        }
    }

    /// Lookup view over the global catalog alone.
    pub fn catalogs(&self) -> Catalogs<'_> {
        Catalogs::global_only(&self.global_catalog)
    }

    /// Lookup view layering a brain catalog over the global one.
    pub fn catalogs_with<'a>(&'a self, brain: &'a TileCatalog) -> Catalogs<'a> {
        Catalogs::with_brain(brain, &self.global_catalog)
    }
}

impl Default for CompileEnv {
    fn default() -> Self {
        Self::new()
    }
}
