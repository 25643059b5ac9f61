//! Fragment mutation helpers and removal of the bare `#`.

use hashact::{
    HashEventKind, Host, MemoryHost, ScrollOffset, UrlCleanup, remove_hash_symbol,
    testing::RecordingListener,
};

mod common;
use common::{dispatcher, hiding_dispatcher};

#[test]
fn test_remove_hash_symbol() {
    assert_eq!(remove_hash_symbol("/foo/#bar"), "/foo/");
    assert_eq!(remove_hash_symbol("#bar"), "");
    assert_eq!(remove_hash_symbol("/foo/"), "/foo/");
}

#[test]
fn test_set_hash_foo() {
    let mut dispatcher = dispatcher("/");
    dispatcher.set_hash("#foo").unwrap();
    assert_eq!(dispatcher.host().hash(), "#foo");
    assert!(dispatcher.is_current_hash("#foo"));
}

#[test]
fn test_set_empty_hash_leaves_no_delimiter() {
    let mut dispatcher = dispatcher("/page?q=1#foo");
    dispatcher.set_hash("").unwrap();

    assert_eq!(dispatcher.host().hash(), "");
    assert_eq!(dispatcher.host().href(), "/page?q=1");
    assert!(!dispatcher.host().has_hash_symbol());
}

#[test]
fn test_history_rewrite_synthesizes_exit() {
    let recorder = RecordingListener::new();
    let mut dispatcher = dispatcher("/#sandman");
    dispatcher.on_hash_exit("#sandman", recorder.clone());
    assert_eq!(dispatcher.url_cleanup(), UrlCleanup::HistoryReplace);

    dispatcher.remove_hash_without_reload().unwrap();

    // No host notification follows a history rewrite.
    assert_eq!(dispatcher.host().pending_notifications(), 0);
    assert_eq!(recorder.names(), vec!["hashactions:exit:#sandman"]);
    assert_eq!(dispatcher.current_snapshot(), "");
    assert_eq!(dispatcher.host().history_len(), 1);
}

#[test]
fn test_history_rewrite_from_empty_emits_nothing() {
    let recorder = RecordingListener::new();
    let mut dispatcher = dispatcher("/");
    dispatcher.on_hash_enter("", recorder.clone(), false);

    dispatcher.remove_hash_without_reload().unwrap();
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_hide_empty_hash_after_host_navigation() {
    let recorder = RecordingListener::new();
    let mut dispatcher = hiding_dispatcher(MemoryHost::new("/docs#a"));
    dispatcher.on_hash_exit("#a", recorder.clone());

    dispatcher.host_mut().set_hash("").unwrap();
    assert!(dispatcher.host().has_hash_symbol());

    assert_eq!(dispatcher.flush_notifications().unwrap(), 1);
    assert_eq!(dispatcher.host().href(), "/docs");
    assert_eq!(dispatcher.host().pending_notifications(), 0);
    assert_eq!(recorder.count_of(HashEventKind::Exit), 1);
}

#[test]
fn test_hide_empty_hash_processes_once() {
    let recorder = RecordingListener::new();
    let mut dispatcher = hiding_dispatcher(MemoryHost::new("/#a"));
    dispatcher.on_hash_exit("#a", recorder.clone());
    dispatcher.on_hash_enter("", recorder.clone(), false);

    dispatcher.set_hash_without_scrolling("").unwrap();
    dispatcher.flush_notifications().unwrap();

    assert!(!dispatcher.host().has_hash_symbol());
    assert_eq!(
        recorder.names(),
        vec!["hashactions:exit:#a", "hashactions:enter:"]
    );
}

#[test]
fn test_hide_empty_hash_on_history_rewrite_emits_once() {
    let recorder = RecordingListener::new();
    let mut dispatcher = hiding_dispatcher(MemoryHost::new("/#a"));
    dispatcher.on_hash_exit("#a", recorder.clone());
    dispatcher.on_hash_enter("", recorder.clone(), false);

    // Cleanup runs change processing, which asks for cleanup again.
    dispatcher.set_hash("").unwrap();

    assert_eq!(
        recorder.names(),
        vec!["hashactions:exit:#a", "hashactions:enter:"]
    );
    assert!(!dispatcher.host().has_hash_symbol());
    assert_eq!(dispatcher.host().pending_notifications(), 0);
    assert_eq!(dispatcher.host().history_len(), 1);
    assert_eq!(dispatcher.phase(), hashact::Phase::Idle);
    assert_eq!(dispatcher.current_snapshot(), "");
}

#[test]
fn test_hide_flag_toggles_at_runtime() {
    let mut dispatcher = dispatcher("/#a");
    assert!(!dispatcher.hide_empty_hash_from_url());

    dispatcher.host_mut().set_hash("").unwrap();
    dispatcher.flush_notifications().unwrap();
    assert!(dispatcher.host().has_hash_symbol());

    dispatcher.set_hide_empty_hash_from_url(true);
    dispatcher.host_mut().set_hash("#b").unwrap();
    dispatcher.host_mut().set_hash("").unwrap();
    dispatcher.flush_notifications().unwrap();
    assert!(!dispatcher.host().has_hash_symbol());
}

#[test]
fn test_set_hash_without_scrolling_restores_offset() {
    let host = MemoryHost::new("/")
        .with_anchor("#faq", ScrollOffset::new(0.0, 2400.0))
        .with_scroll(ScrollOffset::new(5.0, 300.0));
    let mut dispatcher = hashact::HashDispatcher::new(host);

    dispatcher.set_hash_without_scrolling("#faq").unwrap();
    assert!(dispatcher.is_current_hash("#faq"));
    assert_eq!(dispatcher.host().scroll_offset(), ScrollOffset::new(5.0, 300.0));

    dispatcher.set_hash("#faq-other").unwrap();
    dispatcher.set_hash("#faq").unwrap();
    assert_eq!(dispatcher.host().scroll_offset(), ScrollOffset::new(0.0, 2400.0));
}

#[test]
fn test_legacy_fallback_keeps_scroll_and_defers_events() {
    let recorder = RecordingListener::new();
    let host = MemoryHost::legacy("/#a").with_scroll(ScrollOffset::new(0.0, 640.0));
    let mut dispatcher = hashact::HashDispatcher::new(host);
    dispatcher.on_hash_exit("#a", recorder.clone());
    assert_eq!(dispatcher.url_cleanup(), UrlCleanup::ScrollSafeAssign);

    dispatcher.set_hash("").unwrap();

    assert_eq!(dispatcher.host().hash(), "");
    assert!(dispatcher.host().has_hash_symbol());
    assert_eq!(dispatcher.host().scroll_offset(), ScrollOffset::new(0.0, 640.0));
    assert_eq!(recorder.count(), 0);

    assert_eq!(dispatcher.flush_notifications().unwrap(), 1);
    assert_eq!(recorder.names(), vec!["hashactions:exit:#a"]);
}

#[test]
fn test_legacy_fallback_noop_when_already_empty() {
    let mut dispatcher = hashact::HashDispatcher::new(MemoryHost::legacy("/"));
    dispatcher.remove_hash_without_reload().unwrap();
    assert_eq!(dispatcher.host().href(), "/");
    assert_eq!(dispatcher.host().pending_notifications(), 0);
}

#[test]
fn test_legacy_hide_flag_does_not_loop() {
    let mut dispatcher = hiding_dispatcher(MemoryHost::legacy("/#a"));
    dispatcher.register_hash("#a", false);

    dispatcher.host_mut().set_hash("").unwrap();
    assert_eq!(dispatcher.flush_notifications().unwrap(), 1);
    assert_eq!(dispatcher.host().pending_notifications(), 0);
    assert!(dispatcher.host().has_hash_symbol());
}
