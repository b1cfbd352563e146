//! Per-thread registry resolution
//!
//! Each thread owns a default registry and a stack of installed resolvers.
//! The top of the stack decides which registry the free functions use.

use super::traits::RegistryResolver;
use crate::registry::Registry;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
    static DEFAULT_REGISTRY: Registry = Registry::new();
    static RESOLVERS: RefCell<Vec<Rc<dyn RegistryResolver>>> = const { RefCell::new(Vec::new()) };
}

/// Resolver yielding this thread's default registry
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl RegistryResolver for DefaultResolver {
    fn resolve(&self) -> Registry {
        default_registry()
    }
}

/// Get this thread's default registry
pub fn default_registry() -> Registry {
    DEFAULT_REGISTRY.with(Registry::clone)
}

/// Get the registry the installed resolver points to
pub fn current() -> Registry {
    let top = RESOLVERS.with(|stack| stack.borrow().last().cloned());
    match top {
        Some(resolver) => resolver.resolve(),
        None => DefaultResolver.resolve(),
    }
}

/// Uninstalls a resolver when dropped
///
/// Guards nest. Dropping a guard also uninstalls every resolver installed
/// after it.
#[must_use = "the resolver is uninstalled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ResolverGuard {
    depth: usize,
    _not_send: PhantomData<Rc<()>>,
}

/// Install `resolver` for the current thread until the guard is dropped
pub fn set_resolver<R>(resolver: R) -> ResolverGuard
where
    R: RegistryResolver + 'static,
{
    let depth = RESOLVERS.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(Rc::new(resolver));
        stack.len()
    });
    tracing::debug!(depth, "installed registry resolver");

    ResolverGuard {
        depth,
        _not_send: PhantomData,
    }
}

impl Drop for ResolverGuard {
    fn drop(&mut self) {
        // Removed resolvers are dropped after the stack borrow ends.
        let removed = RESOLVERS.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            let keep = self.depth.saturating_sub(1).min(stack.len());
            stack.split_off(keep)
        });

        if let Ok(removed) = removed {
            tracing::debug!(
                depth = self.depth,
                removed = removed.len(),
                "uninstalled registry resolver"
            );
        }
    }
}

/// Run `f` with `registry` as the current registry
pub fn scoped<T>(registry: &Registry, f: impl FnOnce() -> T) -> T {
    let registry = registry.clone();
    let _guard = set_resolver(move || registry.clone());
    f()
}
