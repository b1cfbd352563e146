//! Core types shared by the Depinj substitution registry.
//!
//! This crate defines how a "real" reference is identified, how callables of
//! different arities are invoked uniformly, and the error type used across
//! the workspace.

pub mod core;

pub use crate::core::constructor::Constructor;
pub use crate::core::error::{DepinjError, DepinjResult};
pub use crate::core::key::{Real, SubstitutionKey};
