//! Tests for locating the current registry

use super::common::app::{self, Connection};
use super::common::init_tracing;
use depinj::di::mocks::{CountingResolver, RecordingFactory};
use depinj::di::{current, default_registry, scoped, set_resolver, DefaultResolver};
use depinj::Registry;

#[test]
fn test_counting_resolver_sees_every_free_function_call() {
    init_tracing();

    let registry = Registry::new();
    let resolver = CountingResolver::new(registry.clone());
    let guard = set_resolver(resolver.clone());

    let recorder = RecordingFactory::new(|(url, size): &(&'static str, u32)| {
        Connection::open(&format!("fake+{}", url), *size)
    });
    depinj::inject_factory(recorder.clone(), Connection::open);
    app::describe_user(1);
    app::describe_user(2);

    assert_eq!(resolver.resolutions(), 3);
    assert_eq!(recorder.call_count(), 2);
    assert_eq!(registry.stats().constructed, 1);
    assert!(default_registry().is_empty());

    drop(guard);
    assert!(current().ptr_eq(&default_registry()));
}

#[test]
fn test_default_resolver_can_be_installed_explicitly() {
    init_tracing();

    let registry = Registry::new();
    let _outer = set_resolver(CountingResolver::new(registry));
    let _inner = set_resolver(DefaultResolver);

    assert!(current().ptr_eq(&default_registry()));
}

#[test]
fn test_scoped_registries_isolate_tests() {
    init_tracing();

    let first = Registry::new();
    let second = Registry::new();

    scoped(&first, || {
        depinj::inject_factory(
            |url: &'static str, _: u32| Connection::open(url, 1),
            Connection::open,
        );
    });

    let in_first = scoped(&first, || app::describe_user(5));
    let in_second = scoped(&second, || app::describe_user(5));

    assert!(in_first.ends_with("(1)"));
    assert!(in_second.ends_with("(8)"));
    assert!(second.is_empty());
}
