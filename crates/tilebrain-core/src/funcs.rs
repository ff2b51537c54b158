//! Sensor/actuator function registry and the scope those functions run in.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::tiles::TileId;
use crate::types::TypeId;
use crate::value::Value;

/// Positional argument list passed to sensors and actuators.
pub type Args = IndexMap<u32, Value>;

/// View of the execution context handed to sensor/actuator bodies and to
/// struct field getters.
///
/// The scope is owned by the runtime; this trait keeps core below the runtime
/// crate while letting leaf functions reach the actor, sim time, variables,
/// and the per-tick diagnostic sink.
pub trait ExecScope {
    /// The opaque host actor the brain is bound to.
    fn actor(&mut self) -> &mut dyn Any;

    /// Simulation time in milliseconds.
    fn sim_time(&self) -> f64;

    /// Tick delta in milliseconds.
    fn dt(&self) -> f64;

    /// Program index of the rule currently being evaluated. Sensors use this
    /// to tag bindings (e.g. a target actor) to the rule that made them.
    fn current_rule(&self) -> u32;

    fn get_var(&mut self, name: &str) -> Option<Value>;

    fn set_var(&mut self, name: &str, value: Value);

    /// Emit a user event through the brain's event surface.
    fn emit_user_event(&mut self, name: &str, payload: Value);

    /// Record a runtime diagnostic. Never aborts the tick.
    fn report(&mut self, message: String);
}

/// A registered sensor or actuator body.
pub type ExecFn = Rc<dyn Fn(&mut dyn ExecScope, &Args) -> Value>;

/// Entry in the function registry.
#[derive(Clone)]
pub struct FnEntry {
    pub tile_id: TileId,
    pub exec: ExecFn,
    pub return_type: TypeId,
}

impl FnEntry {
    pub fn new(
        tile_id: TileId,
        return_type: TypeId,
        exec: impl Fn(&mut dyn ExecScope, &Args) -> Value + 'static,
    ) -> Self {
        Self {
            tile_id,
            exec: Rc::new(exec),
            return_type,
        }
    }
}

impl fmt::Debug for FnEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEntry")
            .field("tile_id", &self.tile_id)
            .field("return_type", &self.return_type)
            .finish()
    }
}

/// Map of `tileId → function entry` for sensors and actuators.
#[derive(Default)]
pub struct FnRegistry {
    entries: IndexMap<TileId, FnEntry>,
}

impl FnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry. Returns `false` and leaves the table untouched if
    /// the tile id is already registered.
    pub fn register(&mut self, entry: FnEntry) -> bool {
        if self.entries.contains_key(&entry.tile_id) {
            return false;
        }
        self.entries.insert(entry.tile_id.clone(), entry);
        true
    }

    pub fn get(&self, tile_id: &TileId) -> Option<&FnEntry> {
        self.entries.get(tile_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
