//! # shcube-rs: Spherical Harmonics for Cube-Map Light Probes
//!
//! This crate projects a cube-map environment (six square face images) onto a
//! real spherical-harmonics basis of band level `L` (`0..=10`), and evaluates a
//! coefficient set back into cube-map images.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - `core`: Fundamental data structures (faces, directions, SH basis, coefficients)
//! - `source`: Cube-map and sphere sample sources
//! - `estimate`: Projection (cube map → coefficients) and progress reporting
//! - `render`: Reconstruction (coefficients → cube map) and output layouts
//! - `io`: File I/O (face images, coefficient files)
//! - `config`: Run settings shared by the CLI and library callers
//!
//! ## Pipeline
//!
//! ```text
//! probe_px.png … probe_nz.png
//!   → ImageCubeSource::open
//!   → CubeEstimator::estimate   (Σ color · Y_lm(θ, φ) / d³ · 4 / N²)
//!   → ShResult                  ((L+1)² coefficients per channel)
//!   → synthesize                (Σ c_lm · Y_lm(θ, φ), clamped, rounded)
//!   → save_cube_map
//! ```

// Core data structures and math
pub mod core;

// Run configuration
pub mod config;

// Error type
pub mod error;

// Projection
pub mod estimate;

// I/O operations (images, coefficient files)
pub mod io;

// Reconstruction
pub mod render;

// Sample sources
pub mod source;

// Re-export commonly used types at crate root for convenience
pub use config::ProbeConfig;
pub use core::{CubeFace, EstimateState, ImageBlock, Parameter, ShResult};
pub use error::{Result, ShError};
pub use estimate::{CubeEstimator, SphereEstimator};
pub use render::{synthesize, CubeMapLayout};
pub use source::{CubeMapSource, ImageCubeSource, SphereSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
