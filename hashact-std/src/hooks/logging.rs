//! Logging listener for event observation.

use hashact_core::{EventSink, HashEvent, HashListener};

/// Logs every event it receives.
///
/// Usable both as a per-key listener and as a dispatcher-wide sink. Without
/// the `tracing` feature it does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl LoggingListener {
    fn log(event: &HashEvent) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(name = %event.name(), hash = %event.hash(), "hash event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
    }
}

impl HashListener for LoggingListener {
    fn on_hash_event(&mut self, event: &HashEvent) {
        Self::log(event);
    }
}

impl EventSink for LoggingListener {
    fn publish(&self, event: &HashEvent) {
        Self::log(event);
    }
}
