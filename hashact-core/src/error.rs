//! Error types for hashact.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HashActionsError`] - Top-level error type for all dispatcher operations
//! - [`HostError`] - Errors raised by a navigation backend
//! - [`ConfigError`] - Errors from validating a [`DispatcherConfig`]
//!
//! Registration mistakes (duplicate hashes, unknown handles) are never errors.
//!
//! [`DispatcherConfig`]: crate::DispatcherConfig

use thiserror::Error;

/// Top-level error type for all hashact operations.
#[derive(Error, Debug)]
pub enum HashActionsError {
    /// The navigation backend failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The dispatcher configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that a [`Host`](crate::Host) can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host lacks a capability the operation needs.
    #[error("host does not support {0}")]
    Unsupported(&'static str),

    /// A required global object (window, document, ...) is missing.
    #[error("missing global `{0}`")]
    MissingGlobal(&'static str),

    /// The underlying JavaScript call threw.
    #[error("javascript error: {0}")]
    Js(String),
}

/// Errors that can occur while validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The event namespace is empty.
    #[error("event namespace must not be empty")]
    EmptyNamespace,

    /// The event namespace contains the `:` separator.
    #[error("event namespace `{0}` must not contain ':'")]
    InvalidNamespace(String),
}
