pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 99;
pub const DEFAULT_STRENGTH: u8 = 50;

pub const PRESET_LIGHT_STRENGTH: u8 = 25;
pub const PRESET_BALANCED_STRENGTH: u8 = 50;
pub const PRESET_STRONG_STRENGTH: u8 = 75;

/// Inputs below this size pass through untouched (skip-path).
pub const SKIP_THRESHOLD_BYTES: u64 = 100 * 1024;

/// Lower bound for the derived target size: 0.3 MB.
pub const TARGET_SIZE_FLOOR_BYTES: u64 = 307_200;

/// Dimension tiers. A longer side above a boundary is clamped to it;
/// images at or below the lower tier keep their own dimensions.
pub const DIMENSION_TIER_UPPER: u32 = 4000;
pub const DIMENSION_TIER_LOWER: u32 = 2000;

/// Floor for the JPEG target-size quality search.
pub const QUALITY_SEARCH_FLOOR: u8 = 10;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

/// Appended to the original stem when naming output files.
pub const OUTPUT_NAME_SUFFIX: &str = "_jelly_image_compress";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 20_000;

pub const MAX_BATCH_FILES: usize = 1000;
pub const MAX_BATCH_MEMORY_MIB: u64 = 4096;
pub const LARGE_IMAGE_THRESHOLD_MIB: f64 = 50.0;
pub const MAX_CONCURRENT_LARGE_IMAGES: usize = 2;
pub const MIN_AVAILABLE_MEMORY_MIB: u64 = 512;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
