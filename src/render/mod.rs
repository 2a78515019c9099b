//! Reconstruction: evaluating SH coefficients back into cube-map images.

pub mod layout;
mod synth;

pub use layout::{compose_horizontal_cross, horizontal_cross_cell, CubeMapLayout};
pub use synth::{synthesize, Reconstructor};
