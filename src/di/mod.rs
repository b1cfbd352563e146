//! Registry location and the free-function interface
//!
//! Production code calls [`lookup`] and [`construct`] around the references
//! it wants to keep swappable. Tests register fixtures with [`inject`] and
//! [`inject_factory`], either on the thread's default registry or on an
//! explicit [`Registry`](crate::Registry) installed with [`scoped`] or
//! [`set_resolver`].
//!
//! # Example (Production)
//! ```
//! use depinj::di::{construct, lookup};
//! use std::sync::Arc;
//!
//! fn parse_port(raw: &str) -> u16 {
//!     raw.parse().unwrap_or(80)
//! }
//!
//! let settings = Arc::new("production".to_string());
//! assert_eq!(*lookup(settings), "production");
//! assert_eq!(construct(parse_port, ("8080",)), 8080);
//! ```
//!
//! # Example (Testing)
//! ```
//! use depinj::di::{construct, scoped};
//! use depinj::Registry;
//!
//! fn parse_port(raw: &str) -> u16 {
//!     raw.parse().unwrap_or(80)
//! }
//!
//! let registry = Registry::new();
//! let promise = registry.register_factory_substitution(|_: &'static str| 9999u16, parse_port);
//!
//! let port = scoped(&registry, || construct(parse_port, ("8080",)));
//! assert_eq!(port, 9999);
//! assert_eq!(promise.get().unwrap(), 9999);
//! ```

pub mod container;
pub mod functions;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::{
    current, default_registry, scoped, set_resolver, DefaultResolver, ResolverGuard,
};
pub use functions::{clear, construct, inject, inject_factory, lookup};
pub use traits::RegistryResolver;
