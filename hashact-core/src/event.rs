//! Enter/exit events.
//!
//! Events are routed by [`EventKey`], never by their string name. The name is
//! kept for observers that only understand strings (logs, DOM custom events).

use std::fmt;

/// Which side of a transition an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashEventKind {
    /// The live fragment became the hash.
    Enter,
    /// The live fragment stopped being the hash.
    Exit,
}

impl HashEventKind {
    /// The lowercase tag used in event names.
    pub const fn as_str(self) -> &'static str {
        match self {
            HashEventKind::Enter => "enter",
            HashEventKind::Exit => "exit",
        }
    }
}

impl fmt::Display for HashEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing key for listeners: the event kind paired with the literal hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    /// Enter or exit.
    pub kind: HashEventKind,
    /// The hash including its `#`, or `""` for no fragment.
    pub hash: String,
}

impl EventKey {
    /// Create a key.
    pub fn new(kind: HashEventKind, hash: impl Into<String>) -> Self {
        Self {
            kind,
            hash: hash.into(),
        }
    }

    /// Key for the enter event of `hash`.
    pub fn enter(hash: impl Into<String>) -> Self {
        Self::new(HashEventKind::Enter, hash)
    }

    /// Key for the exit event of `hash`.
    pub fn exit(hash: impl Into<String>) -> Self {
        Self::new(HashEventKind::Exit, hash)
    }

    /// Render the namespaced event name, e.g. `hashactions:enter:#foo`.
    pub fn name(&self, namespace: &str) -> String {
        format!("{namespace}:{}:{}", self.kind, self.hash)
    }
}

/// A single enter or exit notification.
///
/// Events are ephemeral: they are built, delivered to the current listeners
/// and dropped. The payload is the hash itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashEvent {
    key: EventKey,
    name: String,
}

impl HashEvent {
    /// Build an event for `key` under `namespace`.
    pub fn new(namespace: &str, key: EventKey) -> Self {
        let name = key.name(namespace);
        Self { key, name }
    }

    /// Enter or exit.
    pub fn kind(&self) -> HashEventKind {
        self.key.kind
    }

    /// The hash this event is about.
    pub fn hash(&self) -> &str {
        &self.key.hash
    }

    /// The routing key.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// The full namespaced name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for HashEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_includes_delimiter() {
        let event = HashEvent::new("hashactions", EventKey::enter("#foo"));
        assert_eq!(event.name(), "hashactions:enter:#foo");
        assert_eq!(event.hash(), "#foo");
        assert_eq!(event.kind(), HashEventKind::Enter);
    }

    #[test]
    fn test_empty_hash_event_name() {
        let event = HashEvent::new("hashactions", EventKey::exit(""));
        assert_eq!(event.name(), "hashactions:exit:");
        assert_eq!(event.kind(), HashEventKind::Exit);
    }

    #[test]
    fn test_keys_differ_by_kind() {
        assert_ne!(EventKey::enter("#a"), EventKey::exit("#a"));
        assert_eq!(EventKey::enter("#a"), EventKey::new(HashEventKind::Enter, "#a"));
    }
}
