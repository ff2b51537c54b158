//! Single-threaded event emitter.
//!
//! Dispatch iterates a snapshot of the listener list, so a listener may
//! unsubscribe (itself or others) during emission without affecting the
//! current pass. `once` listeners are removed before their first delivery so
//! reentrant emits cannot double-fire them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct Listener<E> {
    id: u64,
    once: bool,
    callback: Rc<dyn Fn(&E)>,
}

struct Inner<E> {
    next_id: u64,
    listeners: Vec<Listener<E>>,
}

/// A handle that unsubscribes a listener. Idempotent; dropping the handle
/// does not unsubscribe.
pub struct Subscription {
    cancel: Rc<dyn Fn()>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        (self.cancel)()
    }
}

/// Event emitter over listeners of one event type.
pub struct EventEmitter<E> {
    inner: Rc<RefCell<Inner<E>>>,
}

impl<E: 'static> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventEmitter<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter").finish_non_exhaustive()
    }
}

impl<E: 'static> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    fn subscribe(&self, callback: Rc<dyn Fn(&E)>, once: bool) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push(Listener { id, once, callback });
            id
        };
        let weak: Weak<RefCell<Inner<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|l| l.id != id);
                }
            }),
        }
    }

    /// Subscribe; the returned handle unsubscribes.
    pub fn on(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        self.subscribe(Rc::new(callback), false)
    }

    /// Subscribe for a single delivery.
    pub fn once(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        self.subscribe(Rc::new(callback), true)
    }

    /// Emit to a snapshot of the current listeners.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(u64, bool, Rc<dyn Fn(&E)>)> = {
            let inner = self.inner.borrow();
            inner
                .listeners
                .iter()
                .map(|l| (l.id, l.once, Rc::clone(&l.callback)))
                .collect()
        };
        {
            // Drop `once` listeners that are about to fire; listeners added
            // during dispatch are untouched.
            let fired_once: Vec<u64> = snapshot
                .iter()
                .filter(|(_, once, _)| *once)
                .map(|(id, _, _)| *id)
                .collect();
            if !fired_once.is_empty() {
                self.inner
                    .borrow_mut()
                    .listeners
                    .retain(|l| !fired_once.contains(&l.id));
            }
        }
        for (_, _, callback) in &snapshot {
            callback(event);
        }
    }

    /// Remove every listener. Safe to call during emission.
    pub fn remove_all(&self) {
        self.inner.borrow_mut().listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}
