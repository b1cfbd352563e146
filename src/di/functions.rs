//! Free functions over the current registry
//!
//! These mirror the [`Registry`](crate::Registry) methods and act on whatever registry
//! [`current`] yields. Code that can take a `&Registry` should prefer it.

use super::container::current;
use crate::core::{Constructor, Real};
use crate::registry::ConstructionPromise;

/// Return the fixture registered for `real`, or `real` unchanged
pub fn lookup<T>(real: T) -> T
where
    T: Real + Clone,
{
    current().resolve_lookup(real)
}

/// Build through the fixture registered for `real`, or through `real` itself
pub fn construct<F, Args>(real: F, args: Args) -> F::Output
where
    F: Constructor<Args>,
    F::Output: 'static,
    Args: 'static,
{
    current().resolve_construction(real, args)
}

/// Substitute the factory `fixture` for `real` in the current registry
pub fn inject_factory<F, G, Args>(fixture: G, real: F) -> ConstructionPromise<F::Output>
where
    F: Constructor<Args>,
    G: Constructor<Args, Output = F::Output>,
    F::Output: Clone + 'static,
    Args: 'static,
{
    current().register_factory_substitution(fixture, real)
}

/// Substitute the object `fixture` for `real` in the current registry
pub fn inject<T>(fixture: T, real: &T)
where
    T: Real + Clone,
{
    current().register_object_substitution(fixture, real)
}

/// Clear the current registry
pub fn clear() {
    current().clear()
}
