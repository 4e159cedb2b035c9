use crate::constants::SKIP_THRESHOLD_BYTES;
use crate::error::Result;
use crate::params::derive_parameters;
use crate::source::SourceImage;
use crate::strength::{CompressionStrength, StrengthPreset};
use crate::utils::format_file_size;
use std::path::Path;

/// Inspect an image and preview what the pipeline would do to it at the
/// given strength and at each preset.
pub fn print_image_info(input_path: &Path, strength: CompressionStrength) -> Result<()> {
    let source = SourceImage::read(input_path)?;
    let img = source.decode()?;

    let size = source.byte_size();
    let (width, height) = (img.width(), img.height());

    crate::info!("📋 Image Information:");
    crate::info!("  📁 File: {}", source.path.display());
    crate::info!("  🎭 Format: {} ({})", source.format, source.format.mime_type());
    crate::info!("  📏 Dimensions: {}x{} pixels", width, height);
    crate::info!("  📦 Size: {} ({} bytes)", format_file_size(size), size);

    let aspect_ratio = f64::from(width) / f64::from(height);
    let megapixels = f64::from(width) * f64::from(height) / 1_000_000.0;
    crate::info!("  📐 Aspect ratio: {:.2}:1", aspect_ratio);
    crate::info!("  🔢 Megapixels: {:.2} MP", megapixels);

    if size < SKIP_THRESHOLD_BYTES {
        crate::info!("\n💡 Below 100 KiB: compression would pass this file through unchanged");
        return Ok(());
    }

    let params = derive_parameters(size, (width, height), strength);
    crate::info!("\n🎯 Derived parameters at strength {}:", strength);
    crate::info!(
        "  📊 Target size: {}",
        format_file_size(params.target_size_bytes)
    );
    crate::info!("  📏 Target max dimension: {} px", params.target_max_dimension);
    crate::info!("  🎨 Quality: {}", params.quality);

    crate::info!("\n💡 Preset preview:");
    for preset in StrengthPreset::all() {
        let preset_params = derive_parameters(size, (width, height), preset.strength());
        crate::info!(
            "  {} ({}): target {} at quality {}",
            preset.name(),
            preset.strength(),
            format_file_size(preset_params.target_size_bytes),
            preset_params.quality
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_info_on_real_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tiny.png");
        let img = image::DynamicImage::new_rgb8(40, 30);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, &bytes).unwrap();

        assert!(print_image_info(&path, CompressionStrength::default()).is_ok());
    }

    #[test]
    fn test_info_on_missing_file() {
        let result = print_image_info(
            Path::new("does_not_exist.png"),
            CompressionStrength::default(),
        );
        assert!(result.is_err());
    }
}
