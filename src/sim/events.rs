//! Synchronous subject/observer event bus
//!
//! `publish` fans an event out to every observer in subscription order and
//! returns only once every follow-up event raised by those observers has
//! been delivered too. There is no queue: a follow-up is delivered to all
//! observers right after the handler that raised it returns, before the
//! original event reaches the next observer.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::fishery::Fishery;
use super::state::FishKind;
use crate::error::SimError;

/// Follow-up chains deeper than this indicate a publish cycle
pub const MAX_DISPATCH_DEPTH: usize = 8;

/// Components allowed to publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Fishery,
    CollisionDetector,
    ScoreTracker,
    GameRules,
}

/// Event data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// A fish overlapped the net
    Catch(FishKind),
    /// A benign fish left the screen uncaught
    Missed,
    /// The score changed to this value
    ScoreUpdated(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub sender: ComponentId,
    pub payload: Payload,
}

/// Mutable context handed to observers while an event is delivered
pub struct Dispatch<'a> {
    /// Difficulty policy reaches the fishery through here
    pub fishery: &'a mut Fishery,
    outbox: Vec<Event>,
}

impl Dispatch<'_> {
    /// Raise a follow-up event, delivered as soon as the current handler returns
    pub fn publish(&mut self, sender: ComponentId, payload: Payload) {
        self.outbox.push(Event { sender, payload });
    }
}

/// Notification handler capability
pub trait NotificationReceiver {
    fn on_notify(&mut self, event: &Event, ctx: &mut Dispatch<'_>) -> Result<(), SimError>;
}

/// Shared handle to an observer; the owner keeps a clone to read its state
pub type Observer = Rc<RefCell<dyn NotificationReceiver>>;

/// Subject holding registered senders and observers
#[derive(Default)]
pub struct EventBus {
    senders: HashSet<ComponentId>,
    observers: Vec<Observer>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a component to publish
    pub fn register_sender(&mut self, sender: ComponentId) {
        self.senders.insert(sender);
    }

    /// Append an observer; delivery follows subscription order
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Deliver an event to every observer. The first observer error aborts
    /// delivery and is returned.
    pub fn publish(
        &self,
        sender: ComponentId,
        payload: Payload,
        fishery: &mut Fishery,
    ) -> Result<(), SimError> {
        self.deliver(Event { sender, payload }, fishery, 0)
    }

    fn deliver(&self, event: Event, fishery: &mut Fishery, depth: usize) -> Result<(), SimError> {
        if depth >= MAX_DISPATCH_DEPTH {
            return Err(SimError::DispatchTooDeep(MAX_DISPATCH_DEPTH));
        }
        if !self.senders.contains(&event.sender) {
            return Err(SimError::UnregisteredSender(event.sender));
        }

        for observer in &self.observers {
            let follow_ups = {
                let mut ctx = Dispatch {
                    fishery: &mut *fishery,
                    outbox: Vec::new(),
                };
                observer.borrow_mut().on_notify(&event, &mut ctx)?;
                ctx.outbox
            };
            for follow_up in follow_ups {
                self.deliver(follow_up, fishery, depth + 1)?;
            }
        }
        Ok(())
    }
}
