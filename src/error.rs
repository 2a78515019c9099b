//! Error type shared by estimation, synthesis and file I/O.

use crate::core::EstimateState;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading cube maps, estimating coefficients
/// or writing results.
#[derive(Debug, Error)]
pub enum ShError {
    #[error("lack of cube map files: expected 6, got {found}")]
    LackOfFiles { found: usize },

    #[error("invalid file [{path}]: {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "invalid file format or texture size [{path} : width = {width}, height = {height}, expected {expected}x{expected}]"
    )]
    SizeMismatch {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },

    #[error("texture is not square [{path} : width = {width}, height = {height}]")]
    NotSquare {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("SH band level {0} is out of range (0..={max})", max = crate::core::MAX_LEVEL)]
    LevelOutOfRange(u32),

    #[error("unsupported output extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("cube map layout {0} is not supported")]
    UnsupportedLayout(&'static str),

    #[error("invalid coefficient file: {0}")]
    InvalidFormat(String),

    #[error("operation cancelled after {done} of {total} samples")]
    Cancelled { done: u64, total: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShError {
    /// Classify this error onto the estimation state taxonomy.
    pub fn state(&self) -> EstimateState {
        match self {
            ShError::LevelOutOfRange(_) | ShError::UnsupportedLayout(_) => {
                EstimateState::InvalidParam
            }
            ShError::Cancelled { .. } => EstimateState::NotEstimated,
            _ => EstimateState::InvalidData,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShError>;
