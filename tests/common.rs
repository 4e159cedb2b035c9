#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Deterministic noisy image. Noise resists compression, which keeps
/// encoded fixtures comfortably above the 100 KiB skip threshold.
pub fn noise_image(width: u32, height: u32) -> DynamicImage {
    let mut seed = 0x1234_5678u32;
    let buf = RgbImage::from_fn(width, height, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let b = seed.to_le_bytes();
        Rgb([b[0], b[1], b[2]])
    });
    DynamicImage::ImageRgb8(buf)
}

/// Write a small flat PNG, well under the skip threshold.
pub fn write_small_png(path: &Path) {
    let img = DynamicImage::new_rgb8(64, 48);
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write a noisy PNG large enough to take the real compression path.
pub fn write_large_png(path: &Path, side: u32) {
    let img = noise_image(side, side);
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write a noisy JPEG at the given quality.
pub fn write_jpeg(path: &Path, width: u32, height: u32, quality: u8) {
    let img = noise_image(width, height);
    let rgb = img.to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
    fs::write(path, bytes).unwrap();
}

/// Write garbage bytes under an image extension, sized past the skip
/// threshold so decoding is attempted and fails.
pub fn write_corrupt_image(path: &Path, len: usize) {
    fs::write(path, vec![0xA5u8; len]).unwrap();
}

/// Encode an image to in-memory PNG bytes.
pub fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
