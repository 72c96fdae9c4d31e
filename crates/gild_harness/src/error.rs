//! Errors raised while reading, writing or comparing golden images.

use std::path::PathBuf;

use gild_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the regression harness.
#[derive(Error, Debug)]
pub enum GoldenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error(transparent)]
    Scene(#[from] CoreError),

    #[error("Malformed PPM header: {0}")]
    Header(String),

    #[error("Image size {width}x{height} is not representable")]
    ImageSize { width: u32, height: u32 },

    #[error("Scene {scene} appears twice: {first} and {second}")]
    DuplicateScene {
        scene: usize,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Unsupported PPM max value {0} (expected 255)")]
    MaxValue(u32),

    #[error("{name} size mismatch: expected {expected} bytes, found {found}")]
    SizeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{name} is {found_width}x{found_height}, expected {width}x{height}")]
    Dimensions {
        name: String,
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("No reference image for scene {0}")]
    MissingScene(usize),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type GoldenResult<T> = Result<T, GoldenError>;
