use crate::utils::calculate_compression_ratio;
use serde::{Deserialize, Serialize};

/// How a per-image result came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Re-encoded output was smaller and was kept.
    Encoded,
    /// Input was below the skip threshold and passed through untouched.
    SkippedSmallInput,
    /// Re-encoding did not shrink the file; original bytes substituted.
    FallbackOriginal,
}

/// Size comparison for one processed image. Sizes are reported in MB
/// rounded to two decimals, savings to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub original_mb: f64,
    pub compressed_mb: f64,
    pub saved_percent: f64,
}

impl CompressionStats {
    pub fn from_sizes(original: u64, compressed: u64) -> Self {
        Self {
            original_bytes: original,
            compressed_bytes: compressed,
            original_mb: round2(bytes_to_mb(original)),
            compressed_mb: round2(bytes_to_mb(compressed)),
            saved_percent: round1(calculate_compression_ratio(original, compressed)),
        }
    }
}

/// One line of a batch report: stats for a success or the error that
/// claimed the file. Reports stay positionally aligned with the inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CompressionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn success(file: impl Into<String>, outcome: Outcome, stats: CompressionStats) -> Self {
        Self {
            file: file.into(),
            ok: true,
            outcome: Some(outcome),
            stats: Some(stats),
            error: None,
        }
    }

    pub fn failure(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ok: false,
            outcome: None,
            stats: None,
            error: Some(error.into()),
        }
    }
}

/// Machine-readable summary of a whole batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub strength: u8,
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_original_mb: f64,
    pub total_compressed_mb: f64,
    pub overall_saved_percent: f64,
    pub elapsed_ms: u64,
    pub entries: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(strength: u8, elapsed_ms: u64, entries: Vec<FileReport>) -> Self {
        let succeeded = entries.iter().filter(|e| e.ok).count();
        let failed = entries.len() - succeeded;
        let total_original: u64 = entries
            .iter()
            .filter_map(|e| e.stats.map(|s| s.original_bytes))
            .sum();
        let total_compressed: u64 = entries
            .iter()
            .filter_map(|e| e.stats.map(|s| s.compressed_bytes))
            .sum();
        Self {
            strength,
            total_files: entries.len(),
            succeeded,
            failed,
            total_original_mb: round2(bytes_to_mb(total_original)),
            total_compressed_mb: round2(bytes_to_mb(total_compressed)),
            overall_saved_percent: round1(calculate_compression_ratio(
                total_original,
                total_compressed,
            )),
            elapsed_ms,
            entries,
        }
    }
}

pub(crate) fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
