//! Listener subscription, direct invocation and event sinks.

use hashact::{
    HashDispatcher, HashEventKind, HashHandlers, MemoryHost,
    hooks::LoggingListener,
    testing::{CountingListener, RecordingListener},
};

mod common;
use common::{OrderLog, dispatcher};

#[test]
fn test_on_hash_enter_registers_hash() {
    let mut dispatcher = dispatcher("/");
    dispatcher.on_hash_enter("#a", CountingListener::new(), false);
    dispatcher.on_hash_exit("#b", CountingListener::new());
    assert!(dispatcher.is_registered_hash("#a"));
    assert!(dispatcher.is_registered_hash("#b"));
}

#[test]
fn test_trigger_on_current_calls_only_new_listener() {
    let existing = CountingListener::new();
    let sink = RecordingListener::new();
    let fresh = CountingListener::new();

    let mut dispatcher = dispatcher("/#live");
    dispatcher.add_sink(sink.clone());
    dispatcher.on_hash_enter("#live", existing.clone(), false);
    dispatcher.on_hash_enter("#live", fresh.clone(), true);

    assert_eq!(fresh.count(), 1);
    assert_eq!(existing.count(), 0);
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_trigger_on_current_needs_live_hash() {
    let fresh = CountingListener::new();
    let mut dispatcher = dispatcher("/#elsewhere");
    dispatcher.on_hash_enter("#live", fresh.clone(), true);
    assert_eq!(fresh.count(), 0);
}

#[test]
fn test_on_subscribes_exit_before_enter() {
    let log = OrderLog::new();
    let mut dispatcher = dispatcher("/");
    let subscription = dispatcher.on(
        "#panel",
        HashHandlers::new()
            .on_enter(log.listener("enter"))
            .on_exit(log.listener("exit")),
        false,
    );

    let (enter, exit) = (subscription.enter.unwrap(), subscription.exit.unwrap());
    assert!(exit < enter);
    assert!(dispatcher.is_registered_hash("#panel"));

    dispatcher.set_hash("#panel").unwrap();
    dispatcher.flush_notifications().unwrap();
    dispatcher.set_hash("#elsewhere").unwrap();
    dispatcher.flush_notifications().unwrap();

    assert_eq!(
        log.entries(),
        vec![
            "enter:hashactions:enter:#panel",
            "exit:hashactions:exit:#panel"
        ]
    );
}

#[test]
fn test_on_with_partial_handlers() {
    let recorder = RecordingListener::new();
    let mut dispatcher = dispatcher("/#panel");
    let subscription = dispatcher.on("#panel", HashHandlers::new().on_enter(recorder.clone()), true);

    assert!(subscription.exit.is_none());
    assert!(subscription.enter.is_some());
    assert_eq!(recorder.count_of(HashEventKind::Enter), 1);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let kept = CountingListener::new();
    let dropped = CountingListener::new();
    let mut dispatcher = dispatcher("/");
    dispatcher.on_hash_enter("#a", kept.clone(), false);
    let id = dispatcher.on_hash_enter("#a", dropped.clone(), false);

    assert!(dispatcher.unsubscribe(id));
    assert!(!dispatcher.unsubscribe(id));
    assert_eq!(dispatcher.listener_count(HashEventKind::Enter, "#a"), 1);

    dispatcher.set_hash("#a").unwrap();
    dispatcher.flush_notifications().unwrap();
    assert_eq!(kept.count(), 1);
    assert_eq!(dropped.count(), 0);
    // The hash itself stays registered.
    assert!(dispatcher.is_registered_hash("#a"));
}

#[test]
fn test_sinks_mirror_broadcasts() {
    let sink = RecordingListener::new();
    let mut dispatcher = HashDispatcher::builder(MemoryHost::new("/#a"))
        .sink(sink.clone())
        .sink(LoggingListener)
        .build()
        .unwrap();
    dispatcher.register_hash("#a", false);
    dispatcher.register_hash("#b", false);

    dispatcher.set_hash("#b").unwrap();
    dispatcher.flush_notifications().unwrap();
    dispatcher.trigger_hash_enter("#unregistered");

    assert_eq!(
        sink.names(),
        vec![
            "hashactions:exit:#a",
            "hashactions:enter:#b",
            "hashactions:enter:#unregistered",
        ]
    );
}

#[test]
fn test_closure_listener_keeps_state() {
    let mut dispatcher = dispatcher("/");
    let totals = std::rc::Rc::new(std::cell::Cell::new(0));
    let shared = totals.clone();
    let mut seen = 0;
    dispatcher.on_hash_enter(
        "#count",
        move |_: &hashact::HashEvent| {
            seen += 1;
            shared.set(seen);
        },
        false,
    );

    for _ in 0..3 {
        dispatcher.trigger_hash_enter("#count");
    }
    assert_eq!(totals.get(), 3);
}
