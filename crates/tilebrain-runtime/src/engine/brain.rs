//! The mutable runtime bound to one host actor.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use tilebrain_compiler::CompileEnv;
use tilebrain_core::events::EventEmitter;
use tilebrain_core::tiles::TileId;
use tilebrain_core::value::Value;

use super::context::ExecCtx;
use super::error::RuntimeError;
use super::eval::{Evaluator, Flow};
use super::program::{Program, ProgramRule};
use super::trace::{NoopTracer, Tracer};
use crate::stdlib;

/// Events the runtime emits while executing.
#[derive(Clone, Debug, serde::Serialize)]
pub enum BrainRtEvent {
    PageActivated { page: usize },
    PageDeactivated { page: usize },
    User { name: String, payload: Value },
}

/// Per-tick evaluation limits.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum expression nodes evaluated per tick (default: 100,000).
    pub(crate) eval_fuel: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self { eval_fuel: 100_000 }
    }
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eval_fuel(mut self, fuel: u32) -> Self {
        self.eval_fuel = fuel;
        self
    }
}

/// A brain executing against one actor.
///
/// Single-threaded and cooperative: a tick runs to completion before
/// `think` returns, and the host alone decides when to tick. Stopping a
/// brain is simply not calling `think` anymore, then `shutdown`.
pub struct Brain {
    program: Rc<Program>,
    env: Rc<CompileEnv>,
    actor: Option<Box<dyn Any>>,
    active: Option<usize>,
    last_time: f64,
    /// Page-level variables persist across ticks, one store per page.
    page_vars: Vec<HashMap<String, Value>>,
    diagnostics: Vec<String>,
    events: EventEmitter<BrainRtEvent>,
    tracer: Box<dyn Tracer>,
    limits: FuelLimits,
    switch_tile: TileId,
}

impl Brain {
    pub fn new(program: Rc<Program>, env: Rc<CompileEnv>) -> Self {
        let page_count = program.pages().len();
        Self {
            program,
            env,
            actor: None,
            active: None,
            last_time: 0.0,
            page_vars: vec![HashMap::new(); page_count],
            diagnostics: Vec::new(),
            events: EventEmitter::new(),
            tracer: Box::new(NoopTracer),
            limits: FuelLimits::default(),
            switch_tile: TileId::from(stdlib::SWITCH_PAGE),
        }
    }

    pub fn with_tracer(mut self, tracer: Box<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn with_limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Capture the host actor as the execution context's data.
    pub fn initialize(&mut self, actor: Box<dyn Any>) {
        self.actor = Some(actor);
    }

    /// Borrow the actor back, typed.
    pub fn actor_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.actor.as_mut()?.downcast_mut()
    }

    /// Enter page 0 and emit `page_activated`.
    pub fn startup(&mut self) -> Result<(), RuntimeError> {
        if self.actor.is_none() {
            return Err(RuntimeError::NotInitialized);
        }
        if self.program.pages().is_empty() {
            return Err(RuntimeError::NoPages);
        }
        self.active = Some(0);
        self.events.emit(&BrainRtEvent::PageActivated { page: 0 });
        Ok(())
    }

    /// Deactivate the current page.
    pub fn shutdown(&mut self) {
        if let Some(page) = self.active.take() {
            self.events.emit(&BrainRtEvent::PageDeactivated { page });
        }
    }

    pub fn active_page(&self) -> Option<usize> {
        self.active
    }

    pub fn events(&self) -> &EventEmitter<BrainRtEvent> {
        &self.events
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Drain runtime diagnostics accumulated by leaf functions and the
    /// evaluator.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn page_var(&self, page: usize, name: &str) -> Option<&Value> {
        self.page_vars.get(page)?.get(name)
    }

    pub fn set_page_var(
        &mut self,
        page: usize,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let store = self
            .page_vars
            .get_mut(page)
            .ok_or(RuntimeError::PageIndexOutOfBounds(page))?;
        store.insert(name.into(), value);
        Ok(())
    }

    /// One cooperative tick: evaluate the active page's rules in source
    /// order; nested children run only while their parent's WHEN holds.
    /// The first `switchPage` actuator call deactivates the current page,
    /// activates the target, and ends the tick.
    pub fn think(&mut self, sim_time: f64) -> Result<(), RuntimeError> {
        let Some(page_index) = self.active else {
            return Ok(());
        };
        let actor = self.actor.as_mut().ok_or(RuntimeError::NotInitialized)?;

        let dt = (sim_time - self.last_time).max(0.0);
        self.last_time = sim_time;
        self.tracer.on_tick(sim_time);

        let program = Rc::clone(&self.program);
        let env = Rc::clone(&self.env);
        let env_ref: &CompileEnv = &env;
        let mut evaluator = Evaluator {
            env: env_ref,
            catalogs: program.catalogs(env_ref),
            fuel: self.limits.eval_fuel,
            switch_tile: self.switch_tile.clone(),
        };
        let mut ctx = ExecCtx {
            actor: actor.as_mut(),
            time: sim_time,
            dt,
            current_rule: 0,
            scopes: Vec::new(),
            page_vars: &mut self.page_vars[page_index],
            diagnostics: &mut self.diagnostics,
            events: self.events.clone(),
        };

        let flow = run_rules(
            &program.pages()[page_index].rules,
            &mut evaluator,
            &mut ctx,
            self.tracer.as_mut(),
        );
        drop(ctx);

        match flow {
            Flow::Continue => {}
            Flow::Switch(uid) => {
                let target = program
                    .page_index(&uid)
                    .ok_or(RuntimeError::UnknownPage(uid))?;
                self.tracer.on_page_switch(page_index, target);
                self.events
                    .emit(&BrainRtEvent::PageDeactivated { page: page_index });
                self.events.emit(&BrainRtEvent::PageActivated { page: target });
                self.active = Some(target);
            }
            Flow::Halt => {
                let message = "evaluation fuel exhausted; tick ended early".to_owned();
                self.tracer.on_error(&message);
                self.diagnostics.push(message);
            }
        }
        Ok(())
    }
}

fn run_rules(
    rules: &[ProgramRule],
    evaluator: &mut Evaluator<'_>,
    ctx: &mut ExecCtx<'_>,
    tracer: &mut dyn Tracer,
) -> Flow {
    for rule in rules {
        ctx.current_rule = rule.index;
        ctx.push_scope();

        let fired = evaluator.eval_when(&rule.check.when, ctx);
        tracer.on_rule(rule.index, fired);

        if fired {
            match evaluator.run_do(&rule.check.do_, ctx, tracer) {
                Flow::Continue => {}
                other => {
                    ctx.pop_scope();
                    return other;
                }
            }
            match run_rules(&rule.children, evaluator, ctx, tracer) {
                Flow::Continue => {}
                other => {
                    ctx.pop_scope();
                    return other;
                }
            }
        }

        ctx.pop_scope();
        if evaluator.out_of_fuel() {
            return Flow::Halt;
        }
    }
    Flow::Continue
}
