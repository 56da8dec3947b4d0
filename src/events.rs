//! Notifications the manager raises for the UI collaborator.
//!
//! Listeners subscribe with a closure and get a [`SubscriptionId`] back for
//! unsubscribing. While a batch is open, events queue up and are delivered
//! in order when the outermost batch closes. The manager opens a batch
//! around every multi-step transition, so observers never see a half-done
//! switch.

use crate::store::ViewHandle;

/// Something observers of the manager may care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A controller type was appended to the type registry.
    TypeRegistered {
        /// Identifier accepted by the factory.
        class_name: String,
        /// Human-readable name.
        display_name: String,
    },
    /// A different view became current.
    CurrentChanged {
        /// The new current view.
        handle: ViewHandle,
    },
    /// Anything user-visible about the view configuration changed.
    ConfigChanged,
}

/// Token returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ViewEvent)>;

/// Synchronous fan-out of [`ViewEvent`]s.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    batch_depth: u32,
    pending: Vec<ViewEvent>,
}

impl EventBus {
    /// Bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives every event emitted from now on.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ViewEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` now, or queue it if a batch is open.
    pub fn emit(&mut self, event: ViewEvent) {
        if self.batch_depth > 0 {
            self.pending.push(event);
        } else {
            self.dispatch(&event);
        }
    }

    /// Start holding events back. Batches nest.
    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Close a batch; the outermost close flushes everything queued.
    pub fn end_batch(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            for event in std::mem::take(&mut self.pending) {
                self.dispatch(&event);
            }
        }
    }

    fn dispatch(&mut self, event: &ViewEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("batch_depth", &self.batch_depth)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder(bus: &mut EventBus) -> (SubscriptionId, Rc<RefCell<Vec<ViewEvent>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = bus.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        (id, seen)
    }

    #[test]
    fn every_listener_sees_every_event() {
        let mut bus = EventBus::new();
        let (_, first) = recorder(&mut bus);
        let (_, second) = recorder(&mut bus);
        bus.emit(ViewEvent::ConfigChanged);
        assert_eq!(*first.borrow(), [ViewEvent::ConfigChanged]);
        assert_eq!(*second.borrow(), [ViewEvent::ConfigChanged]);
    }

    #[test]
    fn unsubscribed_listener_goes_quiet() {
        let mut bus = EventBus::new();
        let (id, seen) = recorder(&mut bus);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(ViewEvent::ConfigChanged);
        assert!(seen.borrow().is_empty());
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn nested_batches_flush_once_in_order() {
        let mut bus = EventBus::new();
        let (_, seen) = recorder(&mut bus);
        bus.begin_batch();
        bus.emit(ViewEvent::TypeRegistered {
            class_name: "a::A".into(),
            display_name: "A".into(),
        });
        bus.begin_batch();
        bus.emit(ViewEvent::ConfigChanged);
        bus.end_batch();
        assert!(seen.borrow().is_empty());
        bus.end_batch();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], ViewEvent::ConfigChanged);
    }
}
