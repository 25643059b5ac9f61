//! Testing utilities for hashact.
//!
//! # Features
//!
//! - [`RecordingListener`]: records every event it receives, usable as a
//!   listener or as a sink
//! - [`CountingListener`]: counts deliveries
//!
//! Clones share their record, so keep one clone for assertions and hand the
//! other to the dispatcher.

use hashact_core::{EventSink, HashEvent, HashEventKind, HashListener};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all events it receives.
///
/// # Example
///
/// ```rust
/// use hashact_std::{HashDispatcher, MemoryHost, testing::RecordingListener};
///
/// let recorder = RecordingListener::new();
/// let mut dispatcher = HashDispatcher::new(MemoryHost::new("/#a"));
/// dispatcher.on_hash_exit("#a", recorder.clone());
///
/// dispatcher.handle_hash_change("#b").unwrap();
/// assert_eq!(recorder.names(), vec!["hashactions:exit:#a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<HashEvent>>>,
}

impl RecordingListener {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<HashEvent> {
        self.events.borrow().clone()
    }

    /// The names of the recorded events, in delivery order.
    pub fn names(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|event| event.name().to_string())
            .collect()
    }

    /// Number of recorded events of `kind`.
    pub fn count_of(&self, kind: HashEventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl HashListener for RecordingListener {
    fn on_hash_event(&mut self, event: &HashEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

impl EventSink for RecordingListener {
    fn publish(&self, event: &HashEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations.
#[derive(Debug, Clone, Default)]
pub struct CountingListener {
    count: Rc<Cell<usize>>,
}

impl CountingListener {
    /// Create a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

impl HashListener for CountingListener {
    fn on_hash_event(&mut self, _event: &HashEvent) {
        self.count.set(self.count.get() + 1);
    }
}
