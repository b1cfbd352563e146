//! Tests for factory substitution through `construct`

use super::common::app::{self, Connection, DATABASE_URL};
use super::common::init_tracing;
use depinj::di::mocks::RecordingFactory;
use depinj::{construct, inject_factory, DepinjError, Registry};

fn fake_connection((url, pool_size): &(&'static str, u32)) -> Connection {
    Connection {
        url: format!("sqlite::memory:?for={}", url),
        pool_size: *pool_size,
    }
}

#[test]
fn test_construct_calls_real_without_substitution() {
    init_tracing();

    assert_eq!(
        app::describe_user(7),
        format!("user 7 via {} (8)", DATABASE_URL)
    );
}

#[test]
fn test_injected_factory_reaches_production_code() {
    init_tracing();

    let recorder = RecordingFactory::new(fake_connection);
    let promise = inject_factory(recorder.clone(), Connection::open);

    let described = app::describe_user(7);
    assert!(described.contains("sqlite::memory:"));

    // The test sees exactly what production code received.
    let connection = promise.get().unwrap();
    assert_eq!(connection.pool_size, 8);
    assert_eq!(recorder.calls(), vec![(DATABASE_URL, 8)]);

    depinj::clear();
}

#[test]
fn test_promise_errors_until_constructed() {
    init_tracing();

    let registry = Registry::new();
    let promise = registry.register_factory_substitution(
        RecordingFactory::new(fake_connection),
        Connection::open,
    );

    match promise.get() {
        Err(DepinjError::NotConstructed(real)) => assert!(real.contains("open")),
        other => panic!("expected NotConstructed, got {:?}", other),
    }

    registry.resolve_construction(Connection::open, ("a", 1));
    assert_eq!(promise.get().unwrap().pool_size, 1);
}

#[test]
fn test_real_construction_is_not_cached() {
    init_tracing();

    let registry = Registry::new();
    let connection = registry.resolve_construction(Connection::open, ("postgres://x", 2));

    assert_eq!(connection, Connection::open("postgres://x", 2));
    assert!(registry.is_empty());
}

#[test]
fn test_reregistering_factory_replaces_fixture() {
    init_tracing();

    let registry = Registry::new();
    let first = RecordingFactory::new(fake_connection);
    let second = RecordingFactory::new(|(url, _): &(&'static str, u32)| Connection::open(url, 99));
    registry.register_factory_substitution(first.clone(), Connection::open);
    let promise = registry.register_factory_substitution(second.clone(), Connection::open);

    registry.resolve_construction(Connection::open, ("db", 1));

    assert_eq!(first.call_count(), 0);
    assert_eq!(second.call_count(), 1);
    assert_eq!(promise.get().unwrap().pool_size, 99);
    assert_eq!(registry.stats().factories, 1);
}

#[test]
fn test_construct_free_function_matches_registry_method() {
    init_tracing();

    let direct = construct(Connection::open, ("postgres://y", 3));
    let through_registry =
        Registry::new().resolve_construction(Connection::open, ("postgres://y", 3));
    assert_eq!(direct, through_registry);
}
