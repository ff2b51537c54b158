//! Core data structures for tilebrain.
//!
//! This crate contains:
//! - Stream primitives (FourCC ids, the tagged chunked binary stream)
//! - The type system (native type tags, named types, struct schemas)
//! - The runtime value model
//! - Operator-overload, conversion, and sensor/actuator function registries
//! - Tile definitions, capability bitsets, and the tile catalog
//! - The single-threaded event emitter

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod caps;
pub mod catalog;
pub mod events;
pub mod fourcc;
pub mod funcs;
pub mod limits;
pub mod ops;
pub mod stream;
pub mod tiles;
pub mod types;
pub mod uid;
pub mod value;

#[cfg(test)]
mod catalog_tests;
#[cfg(test)]
mod events_tests;
#[cfg(test)]
mod value_tests;

// Re-export commonly used items at crate root
pub use caps::Capabilities;
pub use catalog::{Catalogs, TileCatalog};
pub use events::{EventEmitter, Subscription};
pub use fourcc::FourCc;
pub use funcs::{Args, ExecFn, ExecScope, FnEntry, FnRegistry};
pub use ops::{
    BinaryOverload, Conversion, ConversionTable, Fixity, OpDef, OpId, OperatorDefs,
    OverloadError, OverloadTable, UnaryOverload,
};
pub use stream::{DataTag, StreamError, TagStream};
pub use tiles::{CfKind, Placement, SensorPlacement, Side, TileDef, TileId, TileKind, Visual};
pub use types::{FieldGetter, NativeType, SnapshotFn, StructSchema, TypeError, TypeId, TypeRegistry};
pub use value::{NativeHandle, StructValue, Value};
