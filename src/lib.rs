//! Depinj: dependency substitution for unit tests
//!
//! Production code routes object references through `lookup` and factory
//! calls through `construct`. Tests register fixtures for those reals, and
//! both calls hand back the fixture instead.

pub use depinj_core::{Constructor, DepinjError, DepinjResult, Real, SubstitutionKey};

/// Core module re-exported from `depinj-core`.
pub mod core {
    pub use depinj_core::*;
}

/// Registry configuration.
pub mod config;

/// The substitution registry.
pub mod registry;

/// Registry resolution and free functions.
pub mod di;

pub use config::RegistryConfig;
pub use di::{clear, construct, inject, inject_factory, lookup};
pub use registry::{ConstructionPromise, Registry, RegistryStats};
