//! # Navigation Host
//!
//! The [`Host`] trait abstracts the navigation context a dispatcher drives.
//!
//! # Timing Contract
//!
//! Writing the fragment through [`Host::set_hash`] updates the live value
//! immediately, but the host's own change notification is delivered later, in
//! a later turn of its event loop. [`Host::replace_url`] never produces a
//! notification.
//!
//! # Capabilities
//!
//! Some hosts lack parts of the API. A host reports what it has through
//! [`Host::capabilities`]; consumers probe once and pick a strategy instead of
//! re-checking on every call.

use crate::error::HostError;
use bitflags::bitflags;

bitflags! {
    /// Optional host features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The URL can be replaced without navigating or adding history.
        const HISTORY_REPLACE = 1 << 0;
        /// Custom events can be built with the modern constructor form.
        const CUSTOM_EVENT_CONSTRUCTOR = 1 << 1;
    }
}

/// A scroll position in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl ScrollOffset {
    /// Create an offset.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A navigation context: fragment, URL and scroll position.
///
/// Reads are infallible; backends that can fail on reads report the empty
/// value and log. Writes return [`HostError`].
pub trait Host {
    /// The live fragment including its `#`, or `""` when there is none.
    ///
    /// A bare trailing `#` also reads as `""`.
    fn hash(&self) -> String;

    /// Navigate to `hash`. The leading `#` is optional.
    ///
    /// Writing `""` leaves a bare `#` in the visible URL.
    fn set_hash(&mut self, hash: &str) -> Result<(), HostError>;

    /// The current path.
    fn pathname(&self) -> String;

    /// The current query string including its `?`, or `""`.
    fn search(&self) -> String;

    /// Replace the visible URL without navigating, reloading or adding a
    /// history entry.
    ///
    /// Only called when [`Capabilities::HISTORY_REPLACE`] is reported.
    fn replace_url(&mut self, url: &str) -> Result<(), HostError>;

    /// The current scroll position.
    fn scroll_offset(&self) -> ScrollOffset;

    /// Scroll to `offset`.
    fn set_scroll_offset(&mut self, offset: ScrollOffset) -> Result<(), HostError>;

    /// Which optional features this host has.
    fn capabilities(&self) -> Capabilities;
}
