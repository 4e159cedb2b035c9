use crate::constants::{QUALITY_SEARCH_FLOOR, SKIP_THRESHOLD_BYTES};
use crate::error::{CompressionError, Result};
use crate::formats::SupportedFormat;
use crate::params::{derive_parameters, CompressionParameters};
use crate::source::SourceImage;
use crate::stats::{CompressionStats, Outcome};
use crate::strength::CompressionStrength;
use crate::utils::{create_progress_spinner, format_file_size};
use image::{imageops::FilterType, DynamicImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Output of one pipeline run. `data` holds the final bytes (possibly
/// the untouched original); writing them anywhere is the caller's job.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub file_name: String,
    pub format: SupportedFormat,
    pub data: Vec<u8>,
    pub outcome: Outcome,
    pub stats: CompressionStats,
}

/// The whole per-image pipeline: skip-path check, decode, downscale,
/// re-encode towards the derived parameters, and the safety fallback to
/// the original bytes when re-encoding did not shrink the file.
pub fn compress_source(
    source: &SourceImage,
    strength: CompressionStrength,
) -> Result<CompressionResult> {
    let original_size = source.byte_size();

    // Small files rarely compress usefully; pass them through without
    // even decoding.
    if original_size < SKIP_THRESHOLD_BYTES {
        return Ok(pass_through(source, Outcome::SkippedSmallInput));
    }

    let img = source.decode()?;
    let params = derive_parameters(original_size, (img.width(), img.height()), strength);
    let scaled = downscale_to_fit(img, params.target_max_dimension);
    let encoded = encode_towards_target(&scaled, source.format, &params)?;

    if encoded.len() as u64 >= original_size {
        return Ok(pass_through(source, Outcome::FallbackOriginal));
    }

    let stats = CompressionStats::from_sizes(original_size, encoded.len() as u64);
    Ok(CompressionResult {
        file_name: source.output_file_name(),
        format: source.format,
        data: encoded,
        outcome: Outcome::Encoded,
        stats,
    })
}

fn pass_through(source: &SourceImage, outcome: Outcome) -> CompressionResult {
    let size = source.byte_size();
    CompressionResult {
        file_name: source.output_file_name(),
        format: source.format,
        data: source.bytes.clone(),
        outcome,
        stats: CompressionStats::from_sizes(size, size),
    }
}

/// Aspect-preserving downscale when the longer side exceeds the cap.
/// Never upscales.
fn downscale_to_fit(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let longer = width.max(height);
    if longer <= max_dimension {
        return img;
    }

    let scale = f64::from(max_dimension) / f64::from(longer);
    let new_width = ((f64::from(width) * scale).round() as u32).max(1);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Encode at the derived quality. For JPEG, when the first attempt
/// misses the target size, binary-search a lower quality that fits;
/// the smallest attempt wins when nothing fits. PNG and WebP get a
/// single attempt; the fallback rule upstream absorbs misses.
fn encode_towards_target(
    img: &DynamicImage,
    format: SupportedFormat,
    params: &CompressionParameters,
) -> Result<Vec<u8>> {
    let first = format.encode(img, params.quality)?;
    if format != SupportedFormat::Jpeg || first.len() as u64 <= params.target_size_bytes {
        return Ok(first);
    }

    let mut low = i32::from(QUALITY_SEARCH_FLOOR);
    let mut high = i32::from(params.quality) - 1;
    let mut smallest = first;
    let mut best_fit: Option<Vec<u8>> = None;

    while low <= high {
        let mid = (low + high) / 2;
        let attempt = format.encode(img, mid as u8)?;
        if attempt.len() < smallest.len() {
            smallest = attempt.clone();
        }
        if attempt.len() as u64 <= params.target_size_bytes {
            best_fit = Some(attempt);
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    Ok(best_fit.unwrap_or(smallest))
}

/// Single-file CLI entry: read, compress, write next to the input (or
/// into `output_dir`), report sizes.
pub fn compress_image(
    input: PathBuf,
    output_dir: Option<PathBuf>,
    strength: CompressionStrength,
) -> Result<()> {
    let spinner = create_progress_spinner("Loading image...");
    let source = SourceImage::read(&input)?;
    spinner.finish_with_message("Image loaded");

    crate::info!(
        "🗜️  Compressing {} ({}) at strength {}",
        source.file_name,
        format_file_size(source.byte_size()),
        strength
    );

    let result = compress_source(&source, strength)?;

    let dir = match output_dir {
        Some(dir) => dir,
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    fs::create_dir_all(&dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(dir.clone()))?;

    let output_path = dir.join(&result.file_name);
    fs::write(&output_path, &result.data)?;

    crate::info!("📊 Original size: {:.2} MB", result.stats.original_mb);
    crate::info!("📈 Compressed size: {:.2} MB", result.stats.compressed_mb);
    crate::info!("🎯 Savings: {:.1}%", result.stats.saved_percent);
    match result.outcome {
        Outcome::Encoded => {}
        Outcome::SkippedSmallInput => {
            crate::info!("✅ Input below 100 KiB, passed through unchanged")
        }
        Outcome::FallbackOriginal => {
            crate::info!("✅ Re-encoding did not shrink the file, kept the original")
        }
    }
    crate::info!("📁 Wrote {}", output_path.display());

    Ok(())
}
