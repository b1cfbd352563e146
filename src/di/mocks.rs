//! Reusable test doubles for substitution tests

use super::traits::RegistryResolver;
use crate::core::{Constructor, SubstitutionKey};
use crate::registry::Registry;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Fixture factory that records every argument tuple it is called with
///
/// Clones share the recorded calls, so one clone can be registered while
/// another is kept for assertions.
///
/// # Example
///
/// ```
/// use depinj::di::mocks::RecordingFactory;
/// use depinj::Registry;
///
/// fn open(path: &str, retries: u32) -> String {
///     format!("{}:{}", path, retries)
/// }
///
/// let registry = Registry::new();
/// let recorder =
///     RecordingFactory::new(|(path, _): &(&'static str, u32)| format!("fake:{}", path));
/// registry.register_factory_substitution(recorder.clone(), open);
///
/// assert_eq!(registry.resolve_construction(open, ("db", 3)), "fake:db");
/// assert_eq!(recorder.calls(), vec![("db", 3)]);
/// ```
pub struct RecordingFactory<Args, Out> {
    calls: Rc<RefCell<Vec<Args>>>,
    build: Rc<dyn Fn(&Args) -> Out>,
}

impl<Args, Out> RecordingFactory<Args, Out> {
    /// Create a recorder building its output with `build`
    pub fn new(build: impl Fn(&Args) -> Out + 'static) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            build: Rc::new(build),
        }
    }

    /// Number of times the factory was invoked
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl<Args: Clone, Out> RecordingFactory<Args, Out> {
    /// Get all recorded argument tuples, oldest first
    pub fn calls(&self) -> Vec<Args> {
        self.calls.borrow().clone()
    }

    /// Get the most recent argument tuple
    pub fn last_call(&self) -> Option<Args> {
        self.calls.borrow().last().cloned()
    }
}

impl<Args, Out> Clone for RecordingFactory<Args, Out> {
    fn clone(&self) -> Self {
        Self {
            calls: Rc::clone(&self.calls),
            build: Rc::clone(&self.build),
        }
    }
}

impl<Args: 'static, Out: 'static> Constructor<Args> for RecordingFactory<Args, Out> {
    type Output = Out;

    fn invoke(&self, args: Args) -> Out {
        let built = (self.build)(&args);
        self.calls.borrow_mut().push(args);
        built
    }

    /// Recorders are keyed by their shared call log, so clones count as one real
    fn factory_key(&self) -> SubstitutionKey {
        SubstitutionKey::of_allocation::<Self, _>(&*self.calls)
    }
}

/// Resolver that always yields one registry and counts how often it was asked
#[derive(Clone)]
pub struct CountingResolver {
    registry: Registry,
    resolutions: Rc<Cell<usize>>,
}

impl CountingResolver {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            resolutions: Rc::new(Cell::new(0)),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of times the resolver was consulted
    pub fn resolutions(&self) -> usize {
        self.resolutions.get()
    }
}

impl RegistryResolver for CountingResolver {
    fn resolve(&self) -> Registry {
        self.resolutions.set(self.resolutions.get() + 1);
        self.registry.clone()
    }
}
