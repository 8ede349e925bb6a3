// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topic-keyed synchronous publish/subscribe.
//!
//! Handlers run in subscription order on the publishing call stack. A handler
//! that returns an error (or, with the `std` feature, panics) is logged and
//! skipped; later handlers still see the event.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use log::error;

use crate::error::{BoxError, HandlerFailure};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler<E> = Box<dyn FnMut(&E) -> Result<(), BoxError>>;

struct Listener<E> {
    id: ListenerId,
    handler: Handler<E>,
}

/// Ordered handler lists keyed by topic.
///
/// ```
/// use understory_drag_drop::EventBus;
///
/// let mut bus: EventBus<&str, u32> = EventBus::new();
/// let id = bus.subscribe("tick", |n| {
///     assert_eq!(*n, 5);
///     Ok(())
/// });
/// assert_eq!(bus.publish("tick", &5), 1);
/// assert_eq!(bus.publish("tock", &5), 0);
/// assert!(bus.unsubscribe("tick", id));
/// assert_eq!(bus.listener_count("tick"), 0);
/// ```
pub struct EventBus<T, E> {
    topics: HashMap<T, Vec<Listener<E>>>,
    next_id: u64,
    failures: u64,
}

impl<T, E> fmt::Debug for EventBus<T, E>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (topic, listeners) in &self.topics {
            map.entry(topic, &listeners.len());
        }
        map.finish()
    }
}

impl<T, E> Default for EventBus<T, E>
where
    T: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> EventBus<T, E>
where
    T: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            next_id: 0,
            failures: 0,
        }
    }

    /// Append `handler` to `topic`'s list.
    pub fn subscribe<F>(&mut self, topic: T, handler: F) -> ListenerId
    where
        F: FnMut(&E) -> Result<(), BoxError> + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.topics.entry(topic).or_default().push(Listener {
            id,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed to `topic`.
    pub fn unsubscribe(&mut self, topic: T, id: ListenerId) -> bool {
        let Some(listeners) = self.topics.get_mut(&topic) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        let removed = listeners.len() != before;
        if listeners.is_empty() {
            self.topics.remove(&topic);
        }
        removed
    }

    /// Deliver `event` to every handler of `topic`.
    ///
    /// Returns the number of handlers that completed successfully.
    pub fn publish(&mut self, topic: T, event: &E) -> usize {
        let Some(listeners) = self.topics.get_mut(&topic) else {
            return 0;
        };
        let mut delivered = 0;
        for listener in listeners.iter_mut() {
            match invoke(&mut listener.handler, event) {
                Ok(()) => delivered += 1,
                Err(failure) => {
                    self.failures += 1;
                    error!("{topic:?} handler {:?} failed: {failure}", listener.id);
                }
            }
        }
        delivered
    }

    /// Number of handlers subscribed to `topic`.
    pub fn listener_count(&self, topic: T) -> usize {
        self.topics.get(&topic).map_or(0, Vec::len)
    }

    /// Total handler failures observed since creation.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

#[cfg(feature = "std")]
fn invoke<E>(handler: &mut Handler<E>, event: &E) -> Result<(), HandlerFailure> {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    match catch_unwind(AssertUnwindSafe(|| handler(event))) {
        Ok(result) => result.map_err(HandlerFailure::Error),
        Err(_) => Err(HandlerFailure::Panicked),
    }
}

#[cfg(not(feature = "std"))]
fn invoke<E>(handler: &mut Handler<E>, event: &E) -> Result<(), HandlerFailure> {
    handler(event).map_err(HandlerFailure::Error)
}
