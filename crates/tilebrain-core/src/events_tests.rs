//! Tests for the event emitter.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::EventEmitter;

#[test]
fn emit_reaches_all_listeners() {
    let emitter: EventEmitter<u32> = EventEmitter::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let a = seen.clone();
    let _sub_a = emitter.on(move |e| a.borrow_mut().push(("a", *e)));
    let b = seen.clone();
    let _sub_b = emitter.on(move |e| b.borrow_mut().push(("b", *e)));

    emitter.emit(&1);
    emitter.emit(&2);

    assert_eq!(
        *seen.borrow(),
        vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]
    );
}

#[test]
fn unsubscribe_stops_delivery() {
    let emitter: EventEmitter<u32> = EventEmitter::new();
    let count = Rc::new(RefCell::new(0));

    let c = count.clone();
    let sub = emitter.on(move |_| *c.borrow_mut() += 1);
    emitter.emit(&1);
    sub.unsubscribe();
    sub.unsubscribe(); // idempotent
    emitter.emit(&2);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn once_fires_a_single_time() {
    let emitter: EventEmitter<u32> = EventEmitter::new();
    let count = Rc::new(RefCell::new(0));

    let c = count.clone();
    let _sub = emitter.once(move |_| *c.borrow_mut() += 1);
    emitter.emit(&1);
    emitter.emit(&2);

    assert_eq!(*count.borrow(), 1);
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn unsubscribing_during_emit_does_not_skip_later_listeners() {
    let emitter: EventEmitter<u32> = EventEmitter::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    // First listener unsubscribes the second during the pass; the second
    // still receives the current event.
    let sub_b: Rc<RefCell<Option<crate::events::Subscription>>> =
        Rc::new(RefCell::new(None));

    let trigger = sub_b.clone();
    let a = seen.clone();
    let _sub_a = emitter.on(move |e| {
        a.borrow_mut().push(("a", *e));
        if let Some(sub) = trigger.borrow().as_ref() {
            sub.unsubscribe();
        }
    });

    let b = seen.clone();
    *sub_b.borrow_mut() = Some(emitter.on(move |e| b.borrow_mut().push(("b", *e))));

    emitter.emit(&1);
    emitter.emit(&2);

    // "b" saw event 1 (same pass as its unsubscription) but not event 2.
    assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1), ("a", 2)]);
}

#[test]
fn remove_all_during_emit_is_safe() {
    let emitter: EventEmitter<u32> = EventEmitter::new();
    let seen = Rc::new(RefCell::new(0));

    let clearer = emitter.clone();
    let _sub_a = emitter.on(move |_| clearer.remove_all());
    let s = seen.clone();
    let _sub_b = emitter.on(move |_| *s.borrow_mut() += 1);

    emitter.emit(&1);
    assert_eq!(*seen.borrow(), 1);
    assert_eq!(emitter.listener_count(), 0);
}

#[test]
fn listener_added_during_emit_sees_next_event_only() {
    let emitter: EventEmitter<u32> = EventEmitter::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let nested = emitter.clone();
    let s = seen.clone();
    let subs: Rc<RefCell<Vec<crate::events::Subscription>>> = Rc::new(RefCell::new(Vec::new()));
    let store = subs.clone();
    let _sub = emitter.on(move |e| {
        s.borrow_mut().push(("outer", *e));
        let inner_seen = s.clone();
        store
            .borrow_mut()
            .push(nested.on(move |e| inner_seen.borrow_mut().push(("inner", *e))));
    });

    emitter.emit(&1);
    assert_eq!(*seen.borrow(), vec![("outer", 1)]);
}
