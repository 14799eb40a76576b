//! Bus module - single-threaded, reentrant publish/subscribe router
//!
//! The bus owns an explicit FIFO queue and an explicit subscriber list keyed
//! by [`ListenerId`]. Posting a non-Tick message only appends it; posting a
//! Tick appends it and then drains the queue in place. Handlers may post
//! further messages mid-drain; those land at the tail and are delivered
//! before the drain returns, which is how one Tick cascades into a drop, a
//! lock, a line clear and a fresh spawn in a single call.
//!
//! Drain loop invariant: the position index is compared against the live
//! queue length on every step, never against a snapshot taken before the
//! loop, so cascade messages are never dropped. The walk starts at position
//! 0 so that requests queued between ticks are delivered ahead of the Tick
//! itself, preserving strict FIFO order. After the walk the queue is cleared
//! unconditionally.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::messages::Message;

/// Stable handle identifying one registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// A subscriber: receives every drained message and dispatches on its kind.
pub trait Listener {
    fn receive(&mut self, message: &Message, bus: &mut EventBus);
}

/// The message router.
pub struct EventBus {
    listeners: Vec<(ListenerId, Rc<RefCell<dyn Listener>>)>,
    queue: Vec<Message>,
    next_id: u32,
    draining: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            queue: Vec::new(),
            next_id: 0,
            draining: false,
        }
    }

    /// Add a subscriber. The returned handle is the only way to remove it.
    pub fn register(&mut self, listener: Rc<RefCell<dyn Listener>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a subscriber. Safe to call from inside a handler: the
    /// subscriber simply stops receiving, mid-drain included. Unknown ids
    /// are ignored.
    pub fn unregister(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }

    /// Messages appended since the last drain, in FIFO order.
    pub fn pending(&self) -> &[Message] {
        &self.queue
    }

    /// Append a message; if it is a Tick, drain the queue before returning.
    /// A Tick posted from inside a drain only appends (it is still delivered
    /// within the ongoing pass).
    pub fn post(&mut self, message: Message) {
        let is_tick = matches!(message, Message::Tick);
        self.queue.push(message);
        if is_tick && !self.draining {
            self.drain();
        }
    }

    fn drain(&mut self) {
        self.draining = true;

        let mut pos = 0;
        while pos < self.queue.len() {
            let message = self.queue[pos].clone();
            // Snapshot so handlers may register/unregister without
            // invalidating the iteration; deliveries still honour
            // unregistration via the is_registered check.
            let listeners = self.listeners.clone();
            for (id, listener) in listeners {
                if !self.is_registered(id) {
                    continue;
                }
                listener.borrow_mut().receive(&message, self);
            }
            pos += 1;
        }

        self.queue.clear();
        self.draining = false;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
