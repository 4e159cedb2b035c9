use crate::constants::{LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, ZOPFLI_ITERATIONS};
use crate::error::{CompressionError, Result};
use image::{DynamicImage, ImageFormat};
use oxipng::Deflaters;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::num::NonZeroU8;
use std::path::Path;

/// Re-encode targets supported by the pipeline. Output always keeps the
/// input's format; anything else is rejected upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFormat {
    Jpeg,
    Png,
    WebP,
}

impl SupportedFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(SupportedFormat::Jpeg),
            "png" => Some(SupportedFormat::Png),
            "webp" => Some(SupportedFormat::WebP),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SupportedFormat::Jpeg => "jpg",
            SupportedFormat::Png => "png",
            SupportedFormat::WebP => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SupportedFormat::Jpeg => "image/jpeg",
            SupportedFormat::Png => "image/png",
            SupportedFormat::WebP => "image/webp",
        }
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            SupportedFormat::Jpeg => ImageFormat::Jpeg,
            SupportedFormat::Png => ImageFormat::Png,
            SupportedFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Encode `img` into this format, in memory. Quality drives the
    /// JPEG encoder directly and picks the PNG deflater tier; the WebP
    /// codec here is lossless and ignores it.
    pub fn encode(self, img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        match self {
            SupportedFormat::Jpeg => encode_jpeg(img, quality),
            SupportedFormat::Png => encode_png(img, quality),
            SupportedFormat::WebP => encode_webp(img),
        }
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupportedFormat::Jpeg => "JPEG",
            SupportedFormat::Png => "PNG",
            SupportedFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CompressionError::Encode(SupportedFormat::Jpeg, e))?;
    Ok(buf)
}

fn encode_png(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    img.write_to(&mut Cursor::new(&mut raw), ImageFormat::Png)
        .map_err(|e| CompressionError::Encode(SupportedFormat::Png, e))?;

    let mut options = oxipng::Options::from_preset(4);
    options.deflate = if quality >= 90 {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };

    oxipng::optimize_from_memory(&raw, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

fn encode_webp(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)
        .map_err(|e| CompressionError::Encode(SupportedFormat::WebP, e))?;
    Ok(buf)
}
