use crate::constants::{
    LARGE_IMAGE_THRESHOLD_MIB, MAX_BATCH_FILES, MAX_BATCH_MEMORY_MIB,
    MAX_CONCURRENT_LARGE_IMAGES, MIN_AVAILABLE_MEMORY_MIB, SUPPORTED_IMAGE_EXTENSIONS,
};
use crate::error::{CompressionError, Result};
use crate::pipeline::{compress_source, CompressionResult};
use crate::source::SourceImage;
use crate::state::SessionState;
use crate::stats::{BatchReport, FileReport};
use crate::strength::{CompressionStrength, StrengthSelection};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};
use walkdir::WalkDir;

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect candidate files from a file path, a directory or a glob
/// pattern. Non-image files are silently excluded; the list is sorted
/// so batch results stay positionally reproducible.
pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        // An explicitly named file bypasses the extension filter; the
        // pipeline rejects it loudly if it is not a supported image.
        image_files.push(input_path.to_path_buf());
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path).into_iter()
        } else {
            WalkDir::new(input_path).max_depth(1).into_iter()
        };

        // Hidden entries are skipped, but never the walk root itself
        // (temp directories are often dot-prefixed).
        let not_hidden = |e: &walkdir::DirEntry| {
            e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
        };
        for entry in walker.filter_entry(not_hidden) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_image_file(path) {
                image_files.push(path.to_path_buf());
            }
        }
        image_files.sort();
    } else if let Ok(pattern) = glob(input) {
        for entry in pattern.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                image_files.push(entry);
            }
        }
        image_files.sort();
    } else {
        return Err(CompressionError::NoImageFilesFound(input.to_string()));
    }

    Ok(image_files)
}

/// Estimate decode memory for a file without loading it. Compressed
/// formats expand severalfold in memory.
fn estimate_image_memory_usage(file_path: &Path) -> Result<f64> {
    let metadata = fs::metadata(file_path)?;
    let file_size_mib = metadata.len() as f64 / (1024.0 * 1024.0);

    let multiplier = match file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => 4.0,
        Some("webp") => 3.5,
        _ => 3.0,
    };

    Ok(file_size_mib * multiplier)
}

/// Validate batch size against the file-count cap, the configured
/// memory budget and what the host actually has available.
fn validate_batch_limits(image_files: &[PathBuf]) -> Result<(f64, usize)> {
    if image_files.len() > MAX_BATCH_FILES {
        return Err(CompressionError::BatchFileLimitExceeded(
            image_files.len(),
            MAX_BATCH_FILES,
        ));
    }

    let mut total_memory_mib = 0.0;
    let mut large_image_count = 0;
    for file_path in image_files {
        let estimate = estimate_image_memory_usage(file_path)?;
        total_memory_mib += estimate;
        if estimate > LARGE_IMAGE_THRESHOLD_MIB {
            large_image_count += 1;
        }
    }

    let total_memory_mib_u64 = total_memory_mib.ceil() as u64;
    if total_memory_mib_u64 > MAX_BATCH_MEMORY_MIB {
        return Err(CompressionError::BatchMemoryLimitExceeded(
            total_memory_mib_u64,
            MAX_BATCH_MEMORY_MIB,
        ));
    }

    let available = available_memory_mib();
    if total_memory_mib_u64 + MIN_AVAILABLE_MEMORY_MIB > available {
        return Err(CompressionError::InsufficientMemory(
            total_memory_mib_u64,
            available,
        ));
    }

    Ok((total_memory_mib, large_image_count))
}

fn available_memory_mib() -> u64 {
    let mut sys =
        System::new_with_specifics(RefreshKind::new().with_memory(MemoryRefreshKind::new()));
    sys.refresh_memory();
    sys.available_memory() / (1024 * 1024)
}

/// Worker count for a batch: bounded by the pool baseline, the
/// large-image concurrency cap and the per-file memory estimate.
fn compute_parallelism(estimated_mib: f64, file_count: usize, large_image_count: usize) -> usize {
    let baseline = rayon::current_num_threads().min(file_count.max(1));
    let large_cap = if large_image_count >= MAX_CONCURRENT_LARGE_IMAGES {
        MAX_CONCURRENT_LARGE_IMAGES
    } else {
        baseline
    };

    let available = available_memory_mib();
    let avg_per_file_mib = ((estimated_mib / file_count.max(1) as f64).ceil() as u64).max(1);
    let mem_cap = (available.saturating_sub(MIN_AVAILABLE_MEMORY_MIB) / avg_per_file_mib)
        .clamp(1, baseline as u64) as usize;

    large_cap.min(mem_cap).max(1)
}

/// Run every per-image pipeline in parallel. The ordered collect keeps
/// `results[i]` aligned with `sources[i]` whatever the completion
/// order, and each element carries its own success or failure; one
/// bad file never discards its siblings.
pub fn compress_all(
    sources: &[SourceImage],
    strength: CompressionStrength,
) -> Vec<Result<CompressionResult>> {
    let progress = if crate::logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(sources.len() as u64)
    };
    progress.set_style(ProgressStyle::default_bar());

    let results = sources
        .par_iter()
        .map(|source| {
            let result = compress_source(source, strength);
            progress.inc(1);
            result
        })
        .collect();

    progress.finish_and_clear();
    results
}

/// Batch CLI entry: collect, validate, run the session state machine
/// around a parallel compression pass, write the successes and report.
pub fn batch_compress_images(
    input: &str,
    output: PathBuf,
    selection: StrengthSelection,
    recursive: bool,
    json: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let files = collect_image_files(input, recursive)?;
    if files.is_empty() {
        crate::warn!("No image files found in the input path");
        return Ok(());
    }

    crate::info!("🚀 Compressing {} files from {}", files.len(), input);

    let (estimated_mib, large_image_count) = validate_batch_limits(&files)?;
    crate::verbose!(
        "Estimated decode memory: {:.1} MiB ({} large images)",
        estimated_mib,
        large_image_count
    );

    fs::create_dir_all(&output)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output.clone()))?;

    let mut state = SessionState::new();
    state.select_files(files.clone());
    match selection {
        StrengthSelection::Preset(preset) => state.set_preset(preset),
        StrengthSelection::Slider(value) => state.set_slider(value),
    }
    state.start_run()?;
    let strength = state.strength();

    let parallelism = compute_parallelism(estimated_mib, files.len(), large_image_count);
    crate::verbose!("Using {} worker threads", parallelism);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .expect("Failed to build worker thread pool");

    // Per-file isolation starts at load: a file that cannot even be
    // read claims only its own slot.
    let mut load_errors: Vec<(usize, CompressionError)> = Vec::new();
    let mut loaded: Vec<(usize, SourceImage)> = Vec::new();
    for (index, path) in files.iter().enumerate() {
        match SourceImage::read(path) {
            Ok(source) => loaded.push((index, source)),
            Err(error) => load_errors.push((index, error)),
        }
    }
    let (indices, sources): (Vec<usize>, Vec<SourceImage>) = loaded.into_iter().unzip();

    let compressed = pool.install(|| compress_all(&sources, strength));

    let mut slots: BTreeMap<usize, Result<CompressionResult>> = BTreeMap::new();
    for (index, error) in load_errors {
        slots.insert(index, Err(error));
    }
    for (index, result) in indices.into_iter().zip(compressed) {
        slots.insert(index, result);
    }

    let mut reports = Vec::with_capacity(files.len());
    for (path, (_, result)) in files.iter().zip(slots) {
        let display = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match result {
            Ok(res) => {
                let out_path = output.join(&res.file_name);
                match fs::write(&out_path, &res.data) {
                    Ok(()) => {
                        crate::verbose!("Wrote {}", out_path.display());
                        reports.push(FileReport::success(display, res.outcome, res.stats));
                    }
                    Err(error) => {
                        crate::error!("Failed to write {}: {}", out_path.display(), error);
                        reports.push(FileReport::failure(display, error.to_string()));
                    }
                }
            }
            Err(error) => {
                crate::error!("Failed to process {}: {}", path.display(), error);
                reports.push(FileReport::failure(display, error.to_string()));
            }
        }
    }

    let elapsed = start_time.elapsed();
    state.complete_run(reports)?;

    let report = BatchReport::new(
        strength.value(),
        elapsed.as_millis() as u64,
        state.results().to_vec(),
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, elapsed);
    }

    if report.succeeded == 0 {
        return Err(CompressionError::BatchFailed(report.failed));
    }
    Ok(())
}

fn print_summary(report: &BatchReport, elapsed: Duration) {
    crate::info!("\n📊 Batch Compression Summary:");
    crate::info!("  📁 Files processed: {}", report.total_files);
    crate::info!("  📊 Total original size: {:.2} MB", report.total_original_mb);
    crate::info!(
        "  📈 Total compressed size: {:.2} MB",
        report.total_compressed_mb
    );
    crate::info!("  🎯 Overall savings: {:.1}%", report.overall_saved_percent);
    crate::info!("  ⏱️  Total time: {:.2?}", elapsed);
    if elapsed.as_secs_f64() > 0.0 {
        crate::info!(
            "  ⚡ Average speed: {:.2} files/second",
            report.succeeded as f64 / elapsed.as_secs_f64()
        );
    }
    if report.failed > 0 {
        crate::warn!("{} files failed", report.failed);
    }
}
