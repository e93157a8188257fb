//! Synchronous change-notification channels.
//!
//! A [`Channel`] broadcasts a payload to every subscribed [`Listener`] in
//! registration order before `emit` returns. There is no queue: a listener
//! sees each emission exactly once, while it is happening.
//!
//! The listener list is snapshotted at the start of an emission, so a
//! listener may subscribe or unsubscribe from inside `notify`. Changes take
//! effect from the next emission.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives payloads from a [`Channel`].
pub trait Listener<T> {
    fn notify(&self, payload: &T);
}

impl<T, F: Fn(&T)> Listener<T> for F {
    fn notify(&self, payload: &T) {
        self(payload)
    }
}

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn Listener<T>>)>,
}

/// A single-threaded broadcast topic.
pub struct Channel<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener for all subsequent emissions.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`detach`](Subscription::detach)ed.
    pub fn subscribe(&self, listener: impl Listener<T> + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Deliver `payload` to every listener, in registration order.
    pub fn emit(&self, payload: &T) {
        let snapshot: Vec<Rc<dyn Listener<T>>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener.notify(payload);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the listener registered for the lifetime of the channel.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
