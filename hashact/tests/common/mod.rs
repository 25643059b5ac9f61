#![allow(dead_code)]

use hashact::{HashDispatcher, HashEvent, HashListener, MemoryHost};
use std::{cell::RefCell, rc::Rc};

// ============================================================================
// Dispatcher Fixtures
// ============================================================================

pub fn dispatcher(url: &str) -> HashDispatcher<MemoryHost> {
    HashDispatcher::new(MemoryHost::new(url))
}

pub fn hiding_dispatcher(host: MemoryHost) -> HashDispatcher<MemoryHost> {
    HashDispatcher::builder(host)
        .hide_empty_hash_from_url(true)
        .build()
        .unwrap()
}

// ============================================================================
// Order Recording
// ============================================================================

/// Shared log of labels, for checking delivery order across listeners.
#[derive(Clone, Default)]
pub struct OrderLog(Rc<RefCell<Vec<String>>>);

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self, label: &str) -> OrderListener {
        OrderListener {
            label: label.to_string(),
            log: self.0.clone(),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

pub struct OrderListener {
    pub label: String,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl HashListener for OrderListener {
    fn on_hash_event(&mut self, event: &HashEvent) {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.label, event.name()));
    }
}
