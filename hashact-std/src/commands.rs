//! Deferred dispatcher commands.
//!
//! Listeners run while the dispatcher is mutably borrowed, so they cannot
//! call it directly. A [`HashCommands`] handle queues the call instead; the
//! dispatcher applies the queue once it is idle again, in issue order.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HashCommand {
    SetHash(String),
    SetHashWithoutScrolling(String),
    RemoveHashWithoutReload,
    RegisterHash { hash: String, trigger_on_current: bool },
    UnregisterHash(String),
    TriggerEnter(String),
    TriggerExit(String),
    ProcessHashChange,
}

/// A cloneable handle that queues calls for a [`HashDispatcher`].
///
/// Obtain one with [`HashDispatcher::commands`] and move it into listeners:
///
/// ```rust
/// use hashact_core::{HashEvent, Host};
/// use hashact_std::{HashDispatcher, MemoryHost};
///
/// let mut dispatcher = HashDispatcher::new(MemoryHost::new("/"));
/// let commands = dispatcher.commands();
/// dispatcher.on_hash_enter("#old", move |_: &HashEvent| commands.set_hash("#new"), false);
///
/// dispatcher.set_hash("#old")?;
/// dispatcher.flush_notifications()?;
/// assert_eq!(dispatcher.host().hash(), "#new");
/// # Ok::<(), hashact_core::HashActionsError>(())
/// ```
///
/// [`HashDispatcher`]: crate::HashDispatcher
/// [`HashDispatcher::commands`]: crate::HashDispatcher::commands
#[derive(Debug, Clone, Default)]
pub struct HashCommands {
    queue: Rc<RefCell<VecDeque<HashCommand>>>,
}

impl HashCommands {
    fn push(&self, command: HashCommand) {
        self.queue.borrow_mut().push_back(command);
    }

    pub(crate) fn pop(&self) -> Option<HashCommand> {
        self.queue.borrow_mut().pop_front()
    }

    /// Queue [`HashDispatcher::set_hash`](crate::HashDispatcher::set_hash).
    pub fn set_hash(&self, hash: impl Into<String>) {
        self.push(HashCommand::SetHash(hash.into()));
    }

    /// Queue [`HashDispatcher::set_hash_without_scrolling`](crate::HashDispatcher::set_hash_without_scrolling).
    pub fn set_hash_without_scrolling(&self, hash: impl Into<String>) {
        self.push(HashCommand::SetHashWithoutScrolling(hash.into()));
    }

    /// Queue [`HashDispatcher::remove_hash_without_reload`](crate::HashDispatcher::remove_hash_without_reload).
    pub fn remove_hash_without_reload(&self) {
        self.push(HashCommand::RemoveHashWithoutReload);
    }

    /// Queue [`HashDispatcher::register_hash`](crate::HashDispatcher::register_hash).
    pub fn register_hash(&self, hash: impl Into<String>, trigger_on_current: bool) {
        self.push(HashCommand::RegisterHash {
            hash: hash.into(),
            trigger_on_current,
        });
    }

    /// Queue [`HashDispatcher::unregister_hash`](crate::HashDispatcher::unregister_hash).
    pub fn unregister_hash(&self, hash: impl Into<String>) {
        self.push(HashCommand::UnregisterHash(hash.into()));
    }

    /// Queue [`HashDispatcher::trigger_hash_enter`](crate::HashDispatcher::trigger_hash_enter).
    pub fn trigger_hash_enter(&self, hash: impl Into<String>) {
        self.push(HashCommand::TriggerEnter(hash.into()));
    }

    /// Queue [`HashDispatcher::trigger_hash_exit`](crate::HashDispatcher::trigger_hash_exit).
    pub fn trigger_hash_exit(&self, hash: impl Into<String>) {
        self.push(HashCommand::TriggerExit(hash.into()));
    }

    /// Queue one round of change processing against the live fragment.
    ///
    /// Host bindings use this when a notification arrives while the
    /// dispatcher is borrowed.
    pub fn process_hash_change(&self) {
        self.push(HashCommand::ProcessHashChange);
    }

    /// Number of queued commands.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
