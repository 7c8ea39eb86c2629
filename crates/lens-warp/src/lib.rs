//! Umbrella crate for the `lens-warp` workspace.
//!
//! Re-exports the image/texture primitives of `lw-core` and the barrel
//! distortion of `lw-distort`.

pub use lw_core::*;
pub use lw_distort::*;
