//! # hashact - URL fragments as application states
//!
//! Register a hash such as `#settings` and `hashact` emits an enter event when
//! the address bar moves to it and an exit event when it moves away. Helpers
//! set or clear the fragment without scrolling the page and without leaving a
//! bare `#` behind.
//!
//! ## Quick Start
//!
//! ```rust
//! use hashact::prelude::*;
//!
//! let mut dispatcher = HashDispatcher::new(MemoryHost::new("/"));
//! dispatcher.on(
//!     "#settings",
//!     HashHandlers::new()
//!         .on_enter(|_: &HashEvent| println!("open settings"))
//!         .on_exit(|_: &HashEvent| println!("close settings")),
//!     false,
//! );
//!
//! dispatcher.set_hash("#settings")?;
//! dispatcher.flush_notifications()?;
//! dispatcher.set_hash("")?;
//! assert!(!dispatcher.host().has_hash_symbol());
//! # Ok::<(), HashActionsError>(())
//! ```
//!
//! In the browser (feature `web`), [`web::install`] wires a dispatcher to
//! `window`, mirrors events onto `document` as `CustomEvent`s and listens for
//! `hashchange`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hashact_core::{
    // Host
    Capabilities,
    // Errors
    ConfigError,
    // Config
    DEFAULT_NAMESPACE,
    DispatcherConfig,
    // Events
    EventKey,
    // Listener
    EventSink,
    HashActionsError,
    HashEvent,
    HashEventKind,
    HashListener,
    Host,
    HostError,
    ListenerId,
    ScrollOffset,
    // URL helpers
    remove_hash_symbol,
};

pub use hashact_std::{
    HashCommands, HashDispatcher, HashDispatcherBuilder, HashHandlers, ListenerRegistry,
    MemoryHost, Phase, Subscription, UrlCleanup,
};

#[cfg(feature = "web")]
pub mod web;

/// Standard listener implementations.
pub mod hooks {
    pub use hashact_std::hooks::LoggingListener;
}

/// Testing utilities.
pub mod testing {
    pub use hashact_std::testing::{CountingListener, RecordingListener};
}

/// Prelude module - common imports for hashact.
///
/// # Usage
///
/// ```rust,ignore
/// use hashact::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        HashActionsError, HashCommands, HashDispatcher, HashEvent, HashEventKind, HashHandlers,
        HashListener, Host, ListenerId, MemoryHost, Subscription, remove_hash_symbol,
    };
}
