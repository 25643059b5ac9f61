//! # Hash Dispatcher
//!
//! Turns raw fragment changes into enter/exit events for registered hashes.
//!
//! The dispatcher owns three pieces of state:
//!
//! - the set of registered hashes
//! - a snapshot of the last processed fragment, used to find the hash being
//!   exited (hosts do not reliably report the previous value)
//! - the listener registry
//!
//! Transitions are level-triggered. Each notification is compared against the
//! snapshot; nothing is counted.
//!
//! Listeners cannot borrow the dispatcher that is calling them. They queue
//! calls on a [`HashCommands`] handle instead, and the dispatcher applies the
//! queue whenever it returns to [`Phase::Idle`].
//!
//! # Example
//!
//! ```rust
//! use hashact_core::HashEvent;
//! use hashact_std::{HashDispatcher, MemoryHost};
//!
//! let mut dispatcher = HashDispatcher::new(MemoryHost::new("/"));
//! dispatcher.on_hash_enter(
//!     "#help",
//!     |event: &HashEvent| assert_eq!(event.name(), "hashactions:enter:#help"),
//!     false,
//! );
//!
//! dispatcher.set_hash("#help")?;
//! assert!(dispatcher.is_current_hash("#help"));
//! dispatcher.flush_notifications()?;
//! # Ok::<(), hashact_core::HashActionsError>(())
//! ```

use crate::{
    commands::{HashCommand, HashCommands},
    memory::MemoryHost,
    registry::ListenerRegistry,
};
use hashact_core::{
    BoxListener, Capabilities, DispatcherConfig, EventKey, EventSink, HashActionsError, HashEvent,
    HashEventKind, HashListener, Host, ListenerId, path_with_query,
};
use std::collections::HashSet;

/// How the bare `#` is removed from the visible URL.
///
/// Chosen once from the host's [`Capabilities`] when the dispatcher is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlCleanup {
    /// Rewrite the URL to `path + query` without navigating. Exit events for
    /// the cleared hash are synthesized, since no host notification follows.
    HistoryReplace,
    /// Assign the empty fragment while preserving scroll. The bare `#`
    /// stays; the host's own notification drives the events.
    ScrollSafeAssign,
}

impl UrlCleanup {
    /// Pick the best strategy the host supports.
    pub fn probe(capabilities: Capabilities) -> Self {
        if capabilities.contains(Capabilities::HISTORY_REPLACE) {
            UrlCleanup::HistoryReplace
        } else {
            UrlCleanup::ScrollSafeAssign
        }
    }
}

/// What the dispatcher is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not inside change processing.
    #[default]
    Idle,
    /// Inside [`HashDispatcher::handle_hash_change`]. URL cleanup performed in
    /// this phase must not start another round of change processing.
    ProcessingChange,
}

/// Optional enter/exit callbacks for [`HashDispatcher::on`].
#[derive(Default)]
pub struct HashHandlers {
    enter: Option<BoxListener>,
    exit: Option<BoxListener>,
}

impl HashHandlers {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enter callback.
    pub fn on_enter<L: HashListener + 'static>(mut self, listener: L) -> Self {
        self.enter = Some(Box::new(listener));
        self
    }

    /// Set the exit callback.
    pub fn on_exit<L: HashListener + 'static>(mut self, listener: L) -> Self {
        self.exit = Some(Box::new(listener));
        self
    }
}

/// Handles returned by [`HashDispatcher::on`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subscription {
    /// The enter listener, if one was given.
    pub enter: Option<ListenerId>,
    /// The exit listener, if one was given.
    pub exit: Option<ListenerId>,
}

/// Dispatches enter/exit events as the host's fragment changes.
pub struct HashDispatcher<H: Host> {
    host: H,
    config: DispatcherConfig,
    registered: HashSet<String>,
    snapshot: String,
    phase: Phase,
    cleanup: UrlCleanup,
    listeners: ListenerRegistry,
    sinks: Vec<Box<dyn EventSink>>,
    commands: HashCommands,
    applying: bool,
}

impl<H: Host> HashDispatcher<H> {
    /// Create a dispatcher with the default configuration.
    pub fn new(host: H) -> Self {
        Self::from_parts(host, DispatcherConfig::default(), Vec::new())
    }

    /// Start building a dispatcher.
    pub fn builder(host: H) -> HashDispatcherBuilder<H> {
        HashDispatcherBuilder::new(host)
    }

    fn from_parts(host: H, config: DispatcherConfig, sinks: Vec<Box<dyn EventSink>>) -> Self {
        let cleanup = UrlCleanup::probe(host.capabilities());
        let snapshot = host.hash();
        log_debug!(?cleanup, snapshot = %snapshot, "hash dispatcher created");
        Self {
            host,
            config,
            registered: HashSet::new(),
            snapshot,
            phase: Phase::Idle,
            cleanup,
            listeners: ListenerRegistry::new(),
            sinks,
            commands: HashCommands::default(),
            applying: false,
        }
    }

    // ------------------------------------------------------------------
    // Fragment mutation
    // ------------------------------------------------------------------

    /// Navigate to `hash`. The empty hash removes the fragment entirely
    /// instead of leaving a bare `#`.
    ///
    /// Events for the change arrive with the host's later notification.
    pub fn set_hash(&mut self, hash: &str) -> Result<(), HashActionsError> {
        if hash.is_empty() {
            return self.remove_hash_without_reload();
        }
        self.host.set_hash(hash)?;
        self.apply_commands()?;
        Ok(())
    }

    /// Navigate to `hash` and put the scroll position back where it was.
    ///
    /// Hosts that jump to the anchor synchronously may flash briefly.
    pub fn set_hash_without_scrolling(&mut self, hash: &str) -> Result<(), HashActionsError> {
        let offset = self.host.scroll_offset();
        self.host.set_hash(hash)?;
        self.host.set_scroll_offset(offset)?;
        self.apply_commands()?;
        Ok(())
    }

    /// Remove the fragment, `#` included, from the visible URL.
    ///
    /// With [`UrlCleanup::HistoryReplace`] the host sends no notification, so
    /// when a non-empty fragment was active and no change is being processed,
    /// change processing runs here with `""`.
    pub fn remove_hash_without_reload(&mut self) -> Result<(), HashActionsError> {
        match self.cleanup {
            UrlCleanup::HistoryReplace => {
                let url = path_with_query(&self.host.pathname(), &self.host.search());
                self.host.replace_url(&url)?;
                log_debug!(url = %url, "fragment removed from url");

                if !self.snapshot.is_empty() && self.phase == Phase::Idle {
                    self.handle_hash_change("")?;
                }
                self.apply_commands()?;
                Ok(())
            }
            UrlCleanup::ScrollSafeAssign => {
                if self.host.hash().is_empty() {
                    return Ok(());
                }
                self.set_hash_without_scrolling("")
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether the live fragment is exactly `hash`.
    pub fn is_current_hash(&self, hash: &str) -> bool {
        self.host.hash() == hash
    }

    /// Whether `hash` is registered.
    pub fn is_registered_hash(&self, hash: &str) -> bool {
        self.registered.contains(hash)
    }

    /// Whether the live fragment is registered.
    pub fn is_current_registered_hash(&self) -> bool {
        self.is_registered_hash(&self.host.hash())
    }

    /// The fragment as of the last processed change.
    pub fn current_snapshot(&self) -> &str {
        &self.snapshot
    }

    /// Iterate over registered hashes in no particular order.
    pub fn registered_hashes(&self) -> impl Iterator<Item = &str> {
        self.registered.iter().map(String::as_str)
    }

    /// Number of listeners on `(kind, hash)`.
    pub fn listener_count(&self, kind: HashEventKind, hash: &str) -> usize {
        self.listeners.listener_count(&EventKey::new(kind, hash))
    }

    /// The URL cleanup strategy selected at construction.
    pub fn url_cleanup(&self) -> UrlCleanup {
        self.cleanup
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register `hash`. Returns `false` if it already was.
    ///
    /// On first registration with `trigger_on_current`, an enter event is
    /// emitted right away if `hash` is live.
    pub fn register_hash(&mut self, hash: &str, trigger_on_current: bool) -> bool {
        if !self.registered.insert(hash.to_string()) {
            return false;
        }
        log_debug!(hash, "hash registered");

        if trigger_on_current && self.is_current_hash(hash) {
            self.trigger_hash_enter(hash);
        }
        true
    }

    /// Unregister `hash`. No exit event is emitted.
    pub fn unregister_hash(&mut self, hash: &str) -> bool {
        let removed = self.registered.remove(hash);
        if removed {
            log_debug!(hash, "hash unregistered");
        }
        removed
    }

    /// Unregister every hash. Listeners stay subscribed.
    pub fn clear_registered_hashes(&mut self) {
        self.registered.clear();
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Emit the enter event for `hash`, registered or not.
    pub fn trigger_hash_enter(&mut self, hash: &str) {
        self.emit(EventKey::enter(hash));
    }

    /// Emit the exit event for `hash`, registered or not.
    pub fn trigger_hash_exit(&mut self, hash: &str) {
        self.emit(EventKey::exit(hash));
    }

    fn emit(&mut self, key: EventKey) {
        let event = HashEvent::new(&self.config.namespace, key);
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let delivered = self.listeners.emit(&event);
        for sink in &self.sinks {
            sink.publish(&event);
        }
        log_trace!(event = %event, delivered, "hash event emitted");
    }

    // ------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------

    /// Register `hash` and subscribe `listener` to its enter event.
    ///
    /// With `trigger_on_current`, if `hash` is live, `listener` alone is
    /// called immediately. Other listeners and sinks do not see that call.
    ///
    /// A listener that needs to drive the dispatcher, for example to redirect
    /// to another hash, captures [`HashDispatcher::commands`]. It must not
    /// borrow a shared dispatcher, which is already borrowed while it runs.
    pub fn on_hash_enter<L>(
        &mut self,
        hash: &str,
        listener: L,
        trigger_on_current: bool,
    ) -> ListenerId
    where
        L: HashListener + 'static,
    {
        self.on_hash_enter_boxed(hash, Box::new(listener), trigger_on_current)
    }

    fn on_hash_enter_boxed(
        &mut self,
        hash: &str,
        listener: BoxListener,
        trigger_on_current: bool,
    ) -> ListenerId {
        self.register_hash(hash, false);
        let key = EventKey::enter(hash);
        let id = self.listeners.subscribe_boxed(key.clone(), listener);

        if trigger_on_current && self.is_current_hash(hash) {
            let event = HashEvent::new(&self.config.namespace, key);
            self.listeners.notify(id, &event);
        }
        id
    }

    /// Register `hash` and subscribe `listener` to its exit event.
    pub fn on_hash_exit<L>(&mut self, hash: &str, listener: L) -> ListenerId
    where
        L: HashListener + 'static,
    {
        self.on_hash_exit_boxed(hash, Box::new(listener))
    }

    fn on_hash_exit_boxed(&mut self, hash: &str, listener: BoxListener) -> ListenerId {
        self.register_hash(hash, false);
        self.listeners.subscribe_boxed(EventKey::exit(hash), listener)
    }

    /// Subscribe both callbacks of `handlers`; exit is subscribed first.
    pub fn on(
        &mut self,
        hash: &str,
        handlers: HashHandlers,
        trigger_enter_on_current: bool,
    ) -> Subscription {
        let HashHandlers { enter, exit } = handlers;
        let exit = exit.map(|listener| self.on_hash_exit_boxed(hash, listener));
        let enter =
            enter.map(|listener| self.on_hash_enter_boxed(hash, listener, trigger_enter_on_current));
        Subscription { enter, exit }
    }

    /// Remove one listener. Returns `false` if `id` is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Mirror every broadcast event to `sink`.
    pub fn add_sink<S: EventSink + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    // ------------------------------------------------------------------
    // Change processing
    // ------------------------------------------------------------------

    /// Process one host change notification. Call this exactly once per
    /// notification with the live fragment.
    ///
    /// Exit fires for the previous snapshot if it differs and is registered;
    /// enter fires for `new_hash` if registered. When the fragment became
    /// empty and `hide_empty_hash_from_url` is on, the bare `#` is removed
    /// without re-entering this method.
    pub fn handle_hash_change(&mut self, new_hash: &str) -> Result<(), HashActionsError> {
        let previous_phase = self.phase;
        self.phase = Phase::ProcessingChange;
        log_debug!(from = %self.snapshot, to = new_hash, "processing hash change");

        if new_hash != self.snapshot && self.is_registered_hash(&self.snapshot) {
            let exited = std::mem::take(&mut self.snapshot);
            self.trigger_hash_exit(&exited);
        }
        if self.is_registered_hash(new_hash) {
            self.trigger_hash_enter(new_hash);
        }
        self.snapshot = new_hash.to_string();

        let result = if new_hash.is_empty() && self.config.hide_empty_hash_from_url {
            self.remove_hash_without_reload()
        } else {
            Ok(())
        };
        self.phase = previous_phase;
        result?;
        self.apply_commands()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Deferred commands
    // ------------------------------------------------------------------

    /// A handle for queueing calls from inside listeners.
    ///
    /// Every clone feeds the same queue. Queued calls run in issue order the
    /// next time the dispatcher is idle at the end of a fragment write or a
    /// change, or on an explicit [`HashDispatcher::apply_commands`].
    pub fn commands(&self) -> HashCommands {
        self.commands.clone()
    }

    /// Apply queued commands until the queue is empty.
    ///
    /// Does nothing while a change is being processed. Commands queued by the
    /// applied calls themselves are applied in the same pass. On error the
    /// failing command is dropped and the rest stay queued.
    ///
    /// Returns the number of commands applied.
    pub fn apply_commands(&mut self) -> Result<usize, HashActionsError> {
        if self.phase != Phase::Idle || self.applying {
            return Ok(0);
        }
        self.applying = true;
        let mut applied = 0;
        let result = loop {
            let Some(command) = self.commands.pop() else {
                break Ok(applied);
            };
            log_trace!(?command, "applying queued command");
            if let Err(error) = self.apply(command) {
                break Err(error);
            }
            applied += 1;
        };
        self.applying = false;
        result
    }

    fn apply(&mut self, command: HashCommand) -> Result<(), HashActionsError> {
        match command {
            HashCommand::SetHash(hash) => self.set_hash(&hash),
            HashCommand::SetHashWithoutScrolling(hash) => self.set_hash_without_scrolling(&hash),
            HashCommand::RemoveHashWithoutReload => self.remove_hash_without_reload(),
            HashCommand::RegisterHash {
                hash,
                trigger_on_current,
            } => {
                self.register_hash(&hash, trigger_on_current);
                Ok(())
            }
            HashCommand::UnregisterHash(hash) => {
                self.unregister_hash(&hash);
                Ok(())
            }
            HashCommand::TriggerEnter(hash) => {
                self.trigger_hash_enter(&hash);
                Ok(())
            }
            HashCommand::TriggerExit(hash) => {
                self.trigger_hash_exit(&hash);
                Ok(())
            }
            HashCommand::ProcessHashChange => {
                let hash = self.host.hash();
                self.handle_hash_change(&hash)
            }
        }
    }

    // ------------------------------------------------------------------
    // Configuration and host access
    // ------------------------------------------------------------------

    /// Whether the bare `#` is hidden on transitions to the empty fragment.
    pub fn hide_empty_hash_from_url(&self) -> bool {
        self.config.hide_empty_hash_from_url
    }

    /// Toggle hiding of the bare `#`.
    pub fn set_hide_empty_hash_from_url(&mut self, hide: bool) {
        self.config.hide_empty_hash_from_url = hide;
    }

    /// The active configuration.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The navigation host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the navigation host.
    ///
    /// Writes made here bypass the dispatcher; their events still arrive
    /// through the host's notifications.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl HashDispatcher<MemoryHost> {
    /// Deliver every queued host notification, in order, reading the live
    /// fragment at delivery time as a browser handler would.
    ///
    /// Commands left queued by direct emissions are applied first.
    ///
    /// Returns the number of notifications processed.
    pub fn flush_notifications(&mut self) -> Result<usize, HashActionsError> {
        self.apply_commands()?;
        let mut delivered = 0;
        while self.host.take_notification().is_some() {
            let hash = self.host.hash();
            self.handle_hash_change(&hash)?;
            delivered += 1;
        }
        Ok(delivered)
    }
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for HashDispatcher<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashDispatcher")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("registered", &self.registered)
            .field("snapshot", &self.snapshot)
            .field("phase", &self.phase)
            .field("cleanup", &self.cleanup)
            .field("listeners", &self.listeners.len())
            .field("sinks", &self.sinks.len())
            .field("queued_commands", &self.commands.len())
            .finish()
    }
}

/// Builder for [`HashDispatcher`].
pub struct HashDispatcherBuilder<H: Host> {
    host: H,
    config: DispatcherConfig,
    sinks: Vec<Box<dyn EventSink>>,
}

impl<H: Host> HashDispatcherBuilder<H> {
    /// Start from the default configuration.
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: DispatcherConfig::default(),
            sinks: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Hide the bare `#` whenever the fragment becomes empty.
    pub fn hide_empty_hash_from_url(mut self, hide: bool) -> Self {
        self.config.hide_empty_hash_from_url = hide;
        self
    }

    /// Use a custom event namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Mirror broadcast events to `sink`.
    pub fn sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Validate the configuration and build the dispatcher.
    pub fn build(self) -> Result<HashDispatcher<H>, HashActionsError> {
        self.config.validate()?;
        Ok(HashDispatcher::from_parts(self.host, self.config, self.sinks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingListener;
    use hashact_core::ConfigError;

    #[test]
    fn test_probe_prefers_history_replace() {
        assert_eq!(UrlCleanup::probe(Capabilities::all()), UrlCleanup::HistoryReplace);
        assert_eq!(
            UrlCleanup::probe(Capabilities::CUSTOM_EVENT_CONSTRUCTOR),
            UrlCleanup::ScrollSafeAssign
        );
    }

    #[test]
    fn test_snapshot_taken_at_construction() {
        let dispatcher = HashDispatcher::new(MemoryHost::new("/#start"));
        assert_eq!(dispatcher.current_snapshot(), "#start");
        assert_eq!(dispatcher.phase(), Phase::Idle);
    }

    #[test]
    fn test_builder_rejects_invalid_namespace() {
        let result = HashDispatcher::builder(MemoryHost::default())
            .namespace("bad:ns")
            .build();
        assert!(matches!(
            result,
            Err(HashActionsError::Config(ConfigError::InvalidNamespace(_)))
        ));
    }

    #[test]
    fn test_custom_namespace_in_event_names() {
        let recorder = RecordingListener::new();
        let mut dispatcher = HashDispatcher::builder(MemoryHost::default())
            .namespace("app")
            .build()
            .unwrap();
        dispatcher.on_hash_enter("#x", recorder.clone(), false);
        dispatcher.trigger_hash_enter("#x");
        assert_eq!(recorder.names(), vec!["app:enter:#x"]);
    }

    #[test]
    fn test_phase_restored_after_processing() {
        let mut dispatcher = HashDispatcher::builder(MemoryHost::new("/#a"))
            .hide_empty_hash_from_url(true)
            .build()
            .unwrap();
        dispatcher.register_hash("#a", false);
        dispatcher.handle_hash_change("").unwrap();
        assert_eq!(dispatcher.phase(), Phase::Idle);
        assert_eq!(dispatcher.current_snapshot(), "");
    }

    #[test]
    fn test_commands_wait_for_idle() {
        let mut dispatcher = HashDispatcher::new(MemoryHost::new("/#a"));
        let commands = dispatcher.commands();
        dispatcher.on_hash_exit("#a", move |_: &HashEvent| commands.register_hash("#late", false));

        dispatcher.handle_hash_change("#b").unwrap();
        assert!(dispatcher.is_registered_hash("#late"));
        assert!(dispatcher.commands().is_empty());
    }

    #[test]
    fn test_apply_commands_counts_applied() {
        let recorder = RecordingListener::new();
        let mut dispatcher = HashDispatcher::new(MemoryHost::default());
        dispatcher.on_hash_enter("#x", recorder.clone(), false);

        let commands = dispatcher.commands();
        commands.trigger_hash_enter("#x");
        commands.unregister_hash("#x");
        assert_eq!(dispatcher.apply_commands().unwrap(), 2);
        assert_eq!(recorder.names(), vec!["hashactions:enter:#x"]);
        assert!(!dispatcher.is_registered_hash("#x"));
        assert_eq!(dispatcher.apply_commands().unwrap(), 0);
    }

    #[test]
    fn test_exit_before_enter() {
        let recorder = RecordingListener::new();
        let mut dispatcher = HashDispatcher::new(MemoryHost::new("/#a"));
        dispatcher.on_hash_exit("#a", recorder.clone());
        dispatcher.on_hash_enter("#b", recorder.clone(), false);

        dispatcher.handle_hash_change("#b").unwrap();
        assert_eq!(
            recorder.names(),
            vec!["hashactions:exit:#a", "hashactions:enter:#b"]
        );
    }
}
