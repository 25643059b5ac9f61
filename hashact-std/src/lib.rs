//! # hashact-std
//!
//! Standard implementations for hashact.
//!
//! This crate provides:
//! - **Dispatcher**: [`HashDispatcher`], the registered-hash state machine
//! - **Commands**: [`HashCommands`], calls queued from inside listeners
//! - **Registry**: [`ListenerRegistry`], FIFO listeners keyed by [`EventKey`]
//! - **Hosts**: [`MemoryHost`], an in-memory navigation context
//! - **Standard hooks**: Logging
//! - **Testing utilities**: recording and counting listeners
//!
//! [`EventKey`]: hashact_core::EventKey

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

// Re-export core traits
pub use hashact_core;

// Modules
pub mod commands;
pub mod dispatcher;
pub mod hooks;
pub mod memory;
pub mod registry;
pub mod testing;

pub use commands::HashCommands;
pub use dispatcher::{
    HashDispatcher, HashDispatcherBuilder, HashHandlers, Phase, Subscription, UrlCleanup,
};
pub use memory::MemoryHost;
pub use registry::ListenerRegistry;
