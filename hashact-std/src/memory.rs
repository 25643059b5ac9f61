//! In-memory navigation host.
//!
//! [`MemoryHost`] behaves like a browser tab as far as the dispatcher can
//! tell:
//!
//! - fragment writes update the live hash immediately and queue a change
//!   notification for later delivery
//! - a write to the empty fragment leaves a bare `#` in the URL
//! - URL replacement changes the URL silently
//! - assigning a fragment jumps to its anchor, or to the top for a bare `#`,
//!   even when the fragment is already live
//!
//! Notifications are delivered with [`HashDispatcher::flush_notifications`].
//!
//! [`HashDispatcher::flush_notifications`]: crate::HashDispatcher::flush_notifications

use hashact_core::{Capabilities, Host, HostError, ScrollOffset, remove_hash_symbol};
use std::collections::{HashMap, VecDeque};

/// A navigation context held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    pathname: String,
    search: String,
    /// Fragment text without its `#`. `Some("")` is a bare trailing `#`.
    fragment: Option<String>,
    scroll: ScrollOffset,
    anchors: HashMap<String, ScrollOffset>,
    capabilities: Capabilities,
    pending: VecDeque<String>,
    history_len: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHost {
    /// Open `url` (path, optional query, optional fragment) with every
    /// capability available.
    pub fn new(url: &str) -> Self {
        let (pathname, search, fragment) = split_url(url);
        Self {
            pathname,
            search,
            fragment,
            scroll: ScrollOffset::default(),
            anchors: HashMap::new(),
            capabilities: Capabilities::all(),
            pending: VecDeque::new(),
            history_len: 1,
        }
    }

    /// Open `url` on a host without any optional capability.
    pub fn legacy(url: &str) -> Self {
        Self::new(url).with_capabilities(Capabilities::empty())
    }

    /// Replace the reported capabilities.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Declare an element with id matching `hash` at `offset`.
    pub fn with_anchor(mut self, hash: &str, offset: ScrollOffset) -> Self {
        self.anchors.insert(normalize(hash).to_string(), offset);
        self
    }

    /// Start scrolled to `offset`.
    pub fn with_scroll(mut self, offset: ScrollOffset) -> Self {
        self.scroll = offset;
        self
    }

    /// The full visible URL.
    pub fn href(&self) -> String {
        let mut href = format!("{}{}", self.pathname, self.search);
        if let Some(fragment) = &self.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }

    /// Whether the visible URL contains a `#` at all.
    pub fn has_hash_symbol(&self) -> bool {
        self.fragment.is_some()
    }

    /// Pop the oldest undelivered change notification (the new URL).
    pub fn take_notification(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Number of undelivered change notifications.
    pub fn pending_notifications(&self) -> usize {
        self.pending.len()
    }

    /// Number of history entries created so far, including the initial one.
    pub fn history_len(&self) -> usize {
        self.history_len
    }
}

impl Host for MemoryHost {
    fn hash(&self) -> String {
        match self.fragment.as_deref() {
            None | Some("") => String::new(),
            Some(fragment) => format!("#{fragment}"),
        }
    }

    fn set_hash(&mut self, hash: &str) -> Result<(), HostError> {
        let before = self.href();
        let fragment = normalize(hash);
        self.fragment = Some(fragment.to_string());

        // Assigning the current fragment still scrolls to its target.
        if fragment.is_empty() {
            self.scroll = ScrollOffset::default();
        } else if let Some(anchor) = self.anchors.get(fragment) {
            self.scroll = *anchor;
        }

        let after = self.href();
        if after != before {
            self.history_len += 1;
            self.pending.push_back(after);
        }
        Ok(())
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn search(&self) -> String {
        self.search.clone()
    }

    fn replace_url(&mut self, url: &str) -> Result<(), HostError> {
        if !self.capabilities.contains(Capabilities::HISTORY_REPLACE) {
            return Err(HostError::Unsupported("history.replaceState"));
        }
        let (pathname, search, fragment) = split_url(url);
        self.pathname = pathname;
        self.search = search;
        self.fragment = fragment;
        Ok(())
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) -> Result<(), HostError> {
        self.scroll = offset;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

fn normalize(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}

fn split_url(url: &str) -> (String, String, Option<String>) {
    let fragment = url.find('#').map(|idx| url[idx + 1..].to_string());
    let rest = remove_hash_symbol(url);
    let (pathname, search) = match rest.find('?') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };
    let pathname = if pathname.is_empty() { "/" } else { pathname };
    (pathname.to_string(), search.to_string(), fragment)
}
