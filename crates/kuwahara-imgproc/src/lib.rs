#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// luminosity extraction module.
pub mod color;

/// kuwahara filtering module.
pub mod filter;

/// module containing parallelization utilities.
pub mod parallel;
