//! I/O operations for loading and saving data.
//!
//! This module handles everything that touches the filesystem:
//! - Face file naming (`probe.png` → `probe_px.png`, ...)
//! - Image decode/encode (BMP, PNG, JPEG, TGA)
//! - Coefficient files (binary, text dump, JSON)

mod coefficients;
mod image_file;
mod paths;

// Re-export public types and functions
pub use coefficients::{
    load_coefficients, read_binary, read_text, save_coefficients, write_binary, write_text,
    CoefficientFormat,
};
pub use image_file::{load_image_block, output_format, save_cube_map, save_image_block};
pub use paths::{base_name_of, extension_of, face_paths, with_suffix};
