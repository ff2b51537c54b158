//! Execution context: the scope sensor/actuator bodies and field getters
//! see during a tick.

use std::any::Any;
use std::collections::HashMap;

use tilebrain_core::events::EventEmitter;
use tilebrain_core::funcs::ExecScope;
use tilebrain_core::value::Value;

use super::brain::BrainRtEvent;

/// Variable storage for one tick.
///
/// Rule scopes form a chain: each rule pushes a scope before its WHEN is
/// evaluated and pops it after its subtree finishes, so WHEN-side bindings
/// are visible to the rule's own DO side and to all descendants, nothing
/// higher. The page store persists across ticks.
pub(crate) struct ExecCtx<'b> {
    pub(crate) actor: &'b mut dyn Any,
    pub(crate) time: f64,
    pub(crate) dt: f64,
    pub(crate) current_rule: u32,
    pub(crate) scopes: Vec<HashMap<String, Value>>,
    pub(crate) page_vars: &'b mut HashMap<String, Value>,
    pub(crate) diagnostics: &'b mut Vec<String>,
    pub(crate) events: EventEmitter<BrainRtEvent>,
}

impl ExecCtx<'_> {
    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }
}

impl ExecScope for ExecCtx<'_> {
    fn actor(&mut self) -> &mut dyn Any {
        self.actor
    }

    fn sim_time(&self) -> f64 {
        self.time
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn current_rule(&self) -> u32 {
        self.current_rule
    }

    fn get_var(&mut self, name: &str) -> Option<Value> {
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.get(name) {
                return Some(value.clone());
            }
        }
        self.page_vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: Value) {
        // Reassign where the name is already bound, innermost first.
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(name) {
                *slot = value;
                return;
            }
        }
        if let Some(slot) = self.page_vars.get_mut(name) {
            *slot = value;
            return;
        }
        // Fresh binding: rule-scoped inside a tick, page-scoped outside.
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.insert(name.to_owned(), value);
            }
            None => {
                self.page_vars.insert(name.to_owned(), value);
            }
        }
    }

    fn emit_user_event(&mut self, name: &str, payload: Value) {
        self.events.emit(&BrainRtEvent::User {
            name: name.to_owned(),
            payload,
        });
    }

    fn report(&mut self, message: String) {
        self.diagnostics.push(message);
    }
}
