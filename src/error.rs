use std::path::PathBuf;
use thiserror::Error;

use crate::formats::SupportedFormat;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {}: {}", .0.display(), .1)]
    Decode(PathBuf, #[source] image::ImageError),

    #[error("Failed to encode {0}: {1}")]
    Encode(SupportedFormat, #[source] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Not a supported image input: {}", .0.display())]
    UnsupportedInput(PathBuf),

    #[error("Invalid compression strength: {0}. Must be between 1 and 99")]
    InvalidStrength(u8),

    #[error("Unknown strength preset: {0}. Expected one of: light, balanced, strong")]
    UnknownPreset(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("Failed to create output directory: {}", .0.display())]
    DirectoryCreationFailed(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("A compression run is already in progress")]
    BatchInProgress,

    #[error("Batch produced {0} results for {1} selected files")]
    BatchShapeMismatch(usize, usize),

    #[error("All {0} files in the batch failed to compress")]
    BatchFailed(usize),

    #[error("Batch memory limit exceeded: estimated {0}MiB, maximum allowed {1}MiB")]
    BatchMemoryLimitExceeded(u64, u64),

    #[error("Batch file count limit exceeded: {0} files, maximum allowed {1}")]
    BatchFileLimitExceeded(usize, usize),

    #[error(
        "Insufficient available memory: estimated batch requires {0}MiB, but only {1}MiB available"
    )]
    InsufficientMemory(u64, u64),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
