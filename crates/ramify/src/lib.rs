//! Umbrella crate for the `ramify` workspace.
//!
//! Re-exports the image primitives, the binary preprocessing that produces a
//! skeleton, and the skeleton analysis itself.

pub use rf_core::*;
pub use rf_morph::*;
pub use rf_skeleton::*;
