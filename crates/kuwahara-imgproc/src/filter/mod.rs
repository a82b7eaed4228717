//! Kuwahara filter operations
//!
//! This module provides the edge-preserving Kuwahara filter: each pixel is
//! replaced by the channel-wise average of the lowest-variance quadrant of
//! its square neighborhood.

/// Quadrant geometry of the filter window
pub mod quadrant;

/// Per-quadrant running statistics
pub mod welford;

/// Filter operations
mod kuwahara;
pub use kuwahara::*;
