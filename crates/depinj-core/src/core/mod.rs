pub mod constructor;
pub mod error;
pub mod key;
