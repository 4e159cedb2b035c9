use crate::constants::{MAX_FILE_SIZE, MAX_IMAGE_DIMENSION, OUTPUT_NAME_SUFFIX};
use crate::error::{CompressionError, Result};
use crate::formats::SupportedFormat;
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

/// A selected input image: raw bytes plus the metadata the pipeline
/// needs. Immutable once read.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub file_name: String,
    pub format: SupportedFormat,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    /// Read a source image from disk. Applies the format filter and the
    /// size cap; the contents are not decoded yet.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        let format = SupportedFormat::from_path(path)
            .ok_or_else(|| CompressionError::UnsupportedInput(path.to_path_buf()))?;

        let size = fs::metadata(path)?.len();
        if size > MAX_FILE_SIZE {
            return Err(CompressionError::FileTooLarge(size, MAX_FILE_SIZE));
        }

        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("image.{}", format.extension()));

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            format,
            bytes,
        })
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Decode to pixels. Fails when the file claims an image extension
    /// but is not readable; oversized dimensions are rejected.
    pub fn decode(&self) -> Result<DynamicImage> {
        let img = image::load_from_memory(&self.bytes)
            .map_err(|e| CompressionError::Decode(self.path.clone(), e))?;

        let (width, height) = (img.width(), img.height());
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(CompressionError::InvalidDimensions(
                width,
                height,
                MAX_IMAGE_DIMENSION,
            ));
        }

        Ok(img)
    }

    /// Suggested output name: the original stem with the fixed suffix,
    /// original extension reapplied.
    pub fn output_file_name(&self) -> String {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        format!("{}{}.{}", stem, OUTPUT_NAME_SUFFIX, self.format.extension())
    }
}
