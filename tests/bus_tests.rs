//! Event bus tests - registration handles, FIFO delivery, reentrant drain

use std::cell::RefCell;
use std::rc::Rc;

use tetra_core::core::{EventBus, Listener, ListenerId, Message};
use tetra_core::types::MoveDirection;

/// Records every delivered message.
struct Recorder {
    seen: Vec<Message>,
}

impl Recorder {
    fn attach(bus: &mut EventBus) -> Rc<RefCell<Recorder>> {
        let recorder = Rc::new(RefCell::new(Recorder { seen: Vec::new() }));
        bus.register(recorder.clone());
        recorder
    }
}

impl Listener for Recorder {
    fn receive(&mut self, message: &Message, _bus: &mut EventBus) {
        self.seen.push(message.clone());
    }
}

/// Posts one follow-up message the first time it sees a Tick.
struct Relay {
    armed: bool,
}

impl Listener for Relay {
    fn receive(&mut self, message: &Message, bus: &mut EventBus) {
        if self.armed && matches!(message, Message::Tick) {
            self.armed = false;
            bus.post(Message::SonicDropRequest);
        }
    }
}

/// Unregisters a target listener when it sees a Tick.
struct Dropper {
    target: Option<ListenerId>,
}

impl Listener for Dropper {
    fn receive(&mut self, message: &Message, bus: &mut EventBus) {
        if let (Message::Tick, Some(target)) = (message, self.target.take()) {
            bus.unregister(target);
        }
    }
}

#[test]
fn test_non_tick_messages_queue_without_delivery() {
    let mut bus = EventBus::new();
    let recorder = Recorder::attach(&mut bus);

    bus.post(Message::TetradMoveRequest(MoveDirection::Left));
    bus.post(Message::TetradMoveRequest(MoveDirection::Right));

    assert!(recorder.borrow().seen.is_empty());
    assert_eq!(
        bus.pending(),
        &[
            Message::TetradMoveRequest(MoveDirection::Left),
            Message::TetradMoveRequest(MoveDirection::Right),
        ]
    );
}

#[test]
fn test_tick_delivers_queued_messages_in_fifo_order() {
    let mut bus = EventBus::new();
    let recorder = Recorder::attach(&mut bus);

    bus.post(Message::TetradMoveRequest(MoveDirection::Left));
    bus.post(Message::SonicDropRequest);
    bus.post(Message::Tick);

    assert_eq!(
        recorder.borrow().seen,
        vec![
            Message::TetradMoveRequest(MoveDirection::Left),
            Message::SonicDropRequest,
            Message::Tick,
        ]
    );
    assert!(bus.pending().is_empty());
}

#[test]
fn test_follow_up_reaches_every_subscriber_within_same_tick() {
    let mut bus = EventBus::new();

    // One recorder registered before the relay, one after: both must see
    // the cascade message before post() returns.
    let early = Recorder::attach(&mut bus);
    let relay = Rc::new(RefCell::new(Relay { armed: true }));
    bus.register(relay);
    let late = Recorder::attach(&mut bus);

    bus.post(Message::Tick);

    let expected = vec![Message::Tick, Message::SonicDropRequest];
    assert_eq!(early.borrow().seen, expected);
    assert_eq!(late.borrow().seen, expected);
    assert!(bus.pending().is_empty());
}

#[test]
fn test_unregister_mid_drain_stops_delivery_without_crashing() {
    let mut bus = EventBus::new();

    let dropper = Rc::new(RefCell::new(Dropper { target: None }));
    bus.register(dropper.clone());

    let victim = Rc::new(RefCell::new(Recorder { seen: Vec::new() }));
    let victim_id: ListenerId = bus.register(victim.clone());
    dropper.borrow_mut().target = Some(victim_id);

    // The dropper runs first in registration order and removes the victim
    // before the Tick reaches it.
    bus.post(Message::Tick);
    assert!(victim.borrow().seen.is_empty());
    assert!(!bus.is_registered(victim_id));

    // Later ticks still skip it.
    bus.post(Message::Tick);
    assert!(victim.borrow().seen.is_empty());
}

#[test]
fn test_handles_are_distinct_and_removable() {
    let mut bus = EventBus::new();
    let a = Recorder::attach(&mut bus);
    let b = Recorder::attach(&mut bus);

    bus.post(Message::Tick);
    assert_eq!(a.borrow().seen.len(), 1);
    assert_eq!(b.borrow().seen.len(), 1);
}
