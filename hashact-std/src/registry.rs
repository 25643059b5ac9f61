//! Listener registry keyed by `(kind, hash)`.

use hashact_core::{BoxListener, EventKey, HashEvent, HashListener, ListenerId};
use std::collections::HashMap;

struct Entry {
    id: ListenerId,
    listener: BoxListener,
}

/// Listeners grouped by [`EventKey`], delivered in subscription order.
///
/// Every subscription gets a fresh [`ListenerId`] that can later be used to
/// remove exactly that listener.
#[derive(Default)]
pub struct ListenerRegistry {
    routes: HashMap<EventKey, Vec<Entry>>,
    index: HashMap<ListenerId, EventKey>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` to `key`. Listeners on the same key run FIFO.
    pub fn subscribe<L>(&mut self, key: EventKey, listener: L) -> ListenerId
    where
        L: HashListener + 'static,
    {
        self.subscribe_boxed(key, Box::new(listener))
    }

    /// Subscribe an already boxed listener.
    pub fn subscribe_boxed(&mut self, key: EventKey, listener: BoxListener) -> ListenerId {
        let id = ListenerId::from_raw(self.next_id);
        self.next_id += 1;
        self.index.insert(id, key.clone());
        self.routes.entry(key).or_default().push(Entry { id, listener });
        id
    }

    /// Remove one subscription. Returns `false` if `id` is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let Some(key) = self.index.remove(&id) else {
            return false;
        };
        if let Some(entries) = self.routes.get_mut(&key) {
            entries.retain(|entry| entry.id != id);
            if entries.is_empty() {
                self.routes.remove(&key);
            }
        }
        true
    }

    /// Deliver `event` to every listener of its key. Returns how many ran.
    pub fn emit(&mut self, event: &HashEvent) -> usize {
        let Some(entries) = self.routes.get_mut(event.key()) else {
            return 0;
        };
        for entry in entries.iter_mut() {
            entry.listener.on_hash_event(event);
        }
        entries.len()
    }

    /// Deliver `event` to the single listener `id`, whatever its key.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn notify(&mut self, id: ListenerId, event: &HashEvent) -> bool {
        let Some(key) = self.index.get(&id) else {
            return false;
        };
        let entry = self
            .routes
            .get_mut(key)
            .and_then(|entries| entries.iter_mut().find(|entry| entry.id == id));
        match entry {
            Some(entry) => {
                entry.listener.on_hash_event(event);
                true
            }
            None => false,
        }
    }

    /// Number of listeners subscribed to `key`.
    pub fn listener_count(&self, key: &EventKey) -> usize {
        self.routes.get(key).map_or(0, Vec::len)
    }

    /// Total number of subscriptions.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("keys", &self.routes.len())
            .field("listeners", &self.index.len())
            .finish()
    }
}
