//! Substitution registry
//!
//! Holds the three mappings behind `lookup` and `construct`: fixture
//! factories, fixture objects, and the last value each fixture factory built.

mod promise;

pub use promise::ConstructionPromise;

use crate::config::RegistryConfig;
use crate::core::{Constructor, Real, SubstitutionKey};
use serde::Serialize;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Stored form of a fixture factory: returns the built value together with
/// the copy kept for promises.
type Fixture<Args, Out> = dyn Fn(Args) -> (Out, Box<dyn Any>);

/// A registered fixture next to the real it replaces
struct Entry {
    fixture: Rc<dyn Any>,
    // Keeps the real alive so its address cannot be reused by another value.
    _real: Box<dyn Any>,
}

#[derive(Default)]
pub(crate) struct Substitutions {
    factories: HashMap<SubstitutionKey, Entry>,
    objects: HashMap<SubstitutionKey, Entry>,
    constructed: HashMap<SubstitutionKey, Box<dyn Any>>,
}

impl Substitutions {
    pub(crate) fn constructed<T: Clone + 'static>(&self, key: &SubstitutionKey) -> Option<T> {
        self.constructed
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }
}

/// Snapshot of how many entries each mapping holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RegistryStats {
    pub factories: usize,
    pub objects: usize,
    pub constructed: usize,
}

/// Registry of test-time substitutions
///
/// `Registry` is a handle: clones share the same mappings. It is
/// single-threaded and intentionally `!Send`.
///
/// # Example
///
/// ```
/// use depinj::Registry;
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// let real = Arc::new("production".to_string());
/// let fake = Arc::new("fixture".to_string());
///
/// registry.register_object_substitution(fake.clone(), &real);
/// assert_eq!(*registry.resolve_lookup(real.clone()), "fixture");
///
/// registry.clear();
/// assert_eq!(*registry.resolve_lookup(real), "production");
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    substitutions: Rc<RefCell<Substitutions>>,
    config: Rc<RegistryConfig>,
}

impl Registry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            substitutions: Rc::default(),
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Substitute `fixture` for the factory `real`.
    ///
    /// The returned promise yields whatever `fixture` built most recently
    /// through [`Registry::resolve_construction`].
    pub fn register_factory_substitution<F, G, Args>(
        &self,
        fixture: G,
        real: F,
    ) -> ConstructionPromise<F::Output>
    where
        F: Constructor<Args>,
        G: Constructor<Args, Output = F::Output>,
        F::Output: Clone + 'static,
        Args: 'static,
    {
        let key = real.factory_key();
        let stored: Rc<Fixture<Args, F::Output>> = Rc::new(move |args: Args| {
            let built = fixture.invoke(args);
            let kept: Box<dyn Any> = Box::new(built.clone());
            (built, kept)
        });

        let entry = Entry {
            fixture: Rc::new(stored),
            _real: Box::new(real),
        };

        // A replaced entry is dropped only after the borrow ends.
        let previous = self
            .substitutions
            .borrow_mut()
            .factories
            .insert(key.clone(), entry);
        self.note_registration("factory", &key, previous.is_some());
        drop(previous);

        ConstructionPromise::new(Rc::clone(&self.substitutions), key)
    }

    /// Substitute `fixture` for the object `real`
    pub fn register_object_substitution<T>(&self, fixture: T, real: &T)
    where
        T: Real + Clone,
    {
        let key = real.substitution_key();
        let entry = Entry {
            fixture: Rc::new(fixture),
            _real: Box::new(real.clone()),
        };

        let previous = self
            .substitutions
            .borrow_mut()
            .objects
            .insert(key.clone(), entry);
        self.note_registration("object", &key, previous.is_some());
        drop(previous);
    }

    /// Build a value through the fixture registered for `real`, or through
    /// `real` itself when there is none.
    ///
    /// Only fixture results are remembered for promises. Arguments must own
    /// their data (`String` rather than `&str` from a local) because a fixture
    /// registered for `&'static` arguments may keep them.
    ///
    /// ```compile_fail
    /// use depinj::Registry;
    ///
    /// fn open(url: &str, pool: u32) -> String {
    ///     format!("{}:{}", url, pool)
    /// }
    ///
    /// let registry = Registry::new();
    /// let url = String::from("db");
    /// registry.resolve_construction(open, (url.as_str(), 1));
    /// ```
    pub fn resolve_construction<F, Args>(&self, real: F, args: Args) -> F::Output
    where
        F: Constructor<Args>,
        F::Output: 'static,
        Args: 'static,
    {
        let key = real.factory_key();
        if !self.config.enabled {
            tracing::trace!(real = %key, "substitution disabled, constructing real");
            return real.invoke(args);
        }

        // The borrow ends here so the fixture may use the registry itself.
        let fixture = self
            .substitutions
            .borrow()
            .factories
            .get(&key)
            .map(|entry| Rc::clone(&entry.fixture))
            .and_then(|fixture| fixture.downcast::<Rc<Fixture<Args, F::Output>>>().ok());

        match fixture {
            Some(fixture) => {
                tracing::debug!(real = %key, "constructing through fixture factory");
                let build: &Fixture<Args, F::Output> = &**fixture;
                let (built, kept) = build(args);
                let previous = self.substitutions.borrow_mut().constructed.insert(key, kept);
                drop(previous);
                built
            }
            None => real.invoke(args),
        }
    }

    /// Return the fixture registered for `real`, or `real` unchanged
    pub fn resolve_lookup<T>(&self, real: T) -> T
    where
        T: Real + Clone,
    {
        let key = real.substitution_key();
        if !self.config.enabled {
            tracing::trace!(real = %key, "substitution disabled, returning real");
            return real;
        }

        let fixture = self
            .substitutions
            .borrow()
            .objects
            .get(&key)
            .map(|entry| Rc::clone(&entry.fixture));

        match fixture.as_deref().and_then(|any| any.downcast_ref::<T>()) {
            Some(fixture) => {
                tracing::debug!(real = %key, "looked up fixture object");
                fixture.clone()
            }
            None => real,
        }
    }

    pub fn has_factory_substitution<F, Args>(&self, real: &F) -> bool
    where
        F: Constructor<Args>,
    {
        self.substitutions
            .borrow()
            .factories
            .contains_key(&real.factory_key())
    }

    pub fn has_object_substitution<T: Real>(&self, real: &T) -> bool {
        self.substitutions
            .borrow()
            .objects
            .contains_key(&real.substitution_key())
    }

    pub fn stats(&self) -> RegistryStats {
        let substitutions = self.substitutions.borrow();
        RegistryStats {
            factories: substitutions.factories.len(),
            objects: substitutions.objects.len(),
            constructed: substitutions.constructed.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats() == RegistryStats::default()
    }

    /// Forget every substitution and every remembered construction
    pub fn clear(&self) {
        // Dropped outside the borrow: fixtures may hold registry handles.
        let previous = std::mem::take(&mut *self.substitutions.borrow_mut());
        tracing::debug!(
            factories = previous.factories.len(),
            objects = previous.objects.len(),
            "cleared substitution registry"
        );
        drop(previous);
    }

    /// Whether both handles refer to the same registry
    pub fn ptr_eq(&self, other: &Registry) -> bool {
        Rc::ptr_eq(&self.substitutions, &other.substitutions)
    }

    fn note_registration(&self, kind: &str, key: &SubstitutionKey, replaced: bool) {
        if replaced && self.config.warn_on_replace {
            tracing::warn!(real = %key, "replacing existing {} substitution", kind);
        } else {
            tracing::debug!(real = %key, replaced, "registered {} substitution", kind);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("stats", &self.stats())
            .field("config", &self.config)
            .finish()
    }
}
