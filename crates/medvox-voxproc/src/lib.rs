#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// connected-component labeling module.
pub mod components;

/// error types for the processing operations.
pub mod error;

/// separable gaussian filtering module.
pub mod filter;

pub use crate::error::VoxprocError;
