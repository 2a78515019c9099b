//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental pieces used throughout the system:
//! - `cube`: cube-face texel ↔ direction ↔ polar-angle mapping
//! - `basis`: associated Legendre terms and the real SH basis
//! - `params`: coefficient container and `(l, m)` ↔ index conversion
//! - `color` / `image_block`: sample and pixel-buffer types
//!
//! All types here are "pure data" - no I/O, no progress reporting.

pub mod basis;
pub mod color;
pub mod cube;
pub mod image_block;
pub mod params;

// Re-export public types
pub use basis::{basis_len, BasisFunction, LegendreTable, LegendreTerm, ShBasis, MAX_LEVEL};
pub use color::Rgba;
pub use cube::{direction_of, polar_of, surface_point, CubeFace, PolarSample};
pub use image_block::ImageBlock;
pub use params::{to_index, to_lm, ColorChannel, EstimateState, Parameter, ShResult};

/// Reject band levels above [`MAX_LEVEL`].
pub fn validate_level(level: u32) -> crate::Result<u32> {
    if level > MAX_LEVEL {
        return Err(crate::ShError::LevelOutOfRange(level));
    }
    Ok(level)
}
