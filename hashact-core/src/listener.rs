//! # Listeners and Sinks
//!
//! A [`HashListener`] receives the events of the single key it was subscribed
//! to. An [`EventSink`] receives every event the dispatcher broadcasts,
//! regardless of key.
//!
//! Everything runs on the host's single UI thread, so neither trait requires
//! `Send` or `Sync`. Listeners get `&mut self` and may keep state.

use crate::event::HashEvent;
use std::fmt;

/// Receiver of enter/exit events for one key.
///
/// Closures taking `&HashEvent` implement this trait automatically:
///
/// ```rust
/// use hashact_core::{EventKey, HashEvent, HashListener};
///
/// let mut seen = Vec::new();
/// let mut listener = |event: &HashEvent| seen.push(event.hash().to_string());
/// listener.on_hash_event(&HashEvent::new("hashactions", EventKey::enter("#a")));
/// drop(listener);
/// assert_eq!(seen, ["#a"]);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `HashListener`",
    label = "missing `HashListener` implementation",
    note = "Use a closure `|event: &HashEvent| ...` or implement `on_hash_event`."
)]
pub trait HashListener {
    /// Called once per delivered event.
    fn on_hash_event(&mut self, event: &HashEvent);
}

impl<F> HashListener for F
where
    F: FnMut(&HashEvent),
{
    fn on_hash_event(&mut self, event: &HashEvent) {
        self(event)
    }
}

/// A type-erased listener as stored by registries.
pub type BoxListener = Box<dyn HashListener>;

/// Handle identifying one subscription.
///
/// Handles are unique per registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// A secondary output that mirrors every broadcast event.
///
/// Sinks observe; they cannot fail the emission. Implementations that talk to
/// an external system log their own failures.
pub trait EventSink {
    /// Publish one event.
    fn publish(&self, event: &HashEvent);
}
