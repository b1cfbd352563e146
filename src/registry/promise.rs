use super::Substitutions;
use crate::core::{DepinjError, DepinjResult, SubstitutionKey};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// Accessor for the value most recently built by a fixture factory
///
/// Returned by [`register_factory_substitution`]. The promise reads the
/// registry it came from each time, so it sees later constructions and is
/// emptied by [`Registry::clear`](super::Registry::clear).
///
/// [`register_factory_substitution`]: super::Registry::register_factory_substitution
pub struct ConstructionPromise<T> {
    substitutions: Rc<RefCell<Substitutions>>,
    key: SubstitutionKey,
    _output: PhantomData<fn() -> T>,
}

impl<T: Clone + 'static> ConstructionPromise<T> {
    pub(crate) fn new(substitutions: Rc<RefCell<Substitutions>>, key: SubstitutionKey) -> Self {
        Self {
            substitutions,
            key,
            _output: PhantomData,
        }
    }

    /// Get the last constructed value
    ///
    /// # Errors
    ///
    /// Returns [`DepinjError::NotConstructed`] if the fixture has not built
    /// anything since it was registered or since the registry was cleared.
    pub fn get(&self) -> DepinjResult<T> {
        self.substitutions
            .borrow()
            .constructed::<T>(&self.key)
            .ok_or_else(|| DepinjError::NotConstructed(self.key.to_string()))
    }

    /// Whether a value is available
    pub fn is_ready(&self) -> bool {
        self.get().is_ok()
    }
}

impl<T> ConstructionPromise<T> {
    /// Key of the real factory this promise belongs to
    pub fn key(&self) -> &SubstitutionKey {
        &self.key
    }
}

impl<T> Clone for ConstructionPromise<T> {
    fn clone(&self) -> Self {
        Self {
            substitutions: Rc::clone(&self.substitutions),
            key: self.key.clone(),
            _output: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ConstructionPromise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructionPromise")
            .field("key", &self.key)
            .finish()
    }
}
