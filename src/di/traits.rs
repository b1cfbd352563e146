//! Trait definitions for locating the current registry

use crate::registry::Registry;

/// Trait for locating the registry that free functions operate on
///
/// Any `Fn() -> Registry` closure is a resolver. Implementations are not
/// required to be `Send` because registries are per-thread.
pub trait RegistryResolver {
    /// Get the registry to use for the current call
    fn resolve(&self) -> Registry;
}

impl<F> RegistryResolver for F
where
    F: Fn() -> Registry,
{
    fn resolve(&self) -> Registry {
        self()
    }
}
