//! # hashact-core
//!
//! Core types and traits for treating URL fragments as named application states.
//!
//! This crate has minimal dependencies and is meant to be imported by host
//! backends and listener libraries that don't need the full `hashact-std`
//! dispatcher.
//!
//! # Building Blocks
//!
//! ## Events ([`HashEvent`])
//!
//! An enter or exit notification for one hash. Events are keyed by
//! [`EventKey`], a tagged `(kind, hash)` pair, and carry a display name of the
//! form `<namespace>:<enter|exit>:<hash>`.
//!
//! ## Listeners ([`HashListener`])
//!
//! Receivers of events. Any `FnMut(&HashEvent)` closure is a listener.
//! Subscriptions are identified by a [`ListenerId`] handle.
//!
//! ## Hosts ([`Host`])
//!
//! The navigation context the dispatcher drives: fragment read/write,
//! non-navigating URL replacement, and scroll position. A host advertises
//! optional features through [`Capabilities`].
//!
//! ## Sinks ([`EventSink`])
//!
//! Secondary outputs that mirror every emitted event, e.g. onto the DOM.
//!
//! # Error Types
//!
//! - [`HashActionsError`] - Top-level error type
//! - [`HostError`] - Navigation backend failures
//! - [`ConfigError`] - Invalid dispatcher configuration

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod error;
mod event;
mod host;
mod listener;
mod url;

// Re-exports
pub use config::{DEFAULT_NAMESPACE, DispatcherConfig};
pub use error::{ConfigError, HashActionsError, HostError};
pub use event::{EventKey, HashEvent, HashEventKind};
pub use host::{Capabilities, Host, ScrollOffset};
pub use listener::{BoxListener, EventSink, HashListener, ListenerId};
pub use url::{path_with_query, remove_hash_symbol};
