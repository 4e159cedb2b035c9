use crate::constants::{
    DIMENSION_TIER_LOWER, DIMENSION_TIER_UPPER, TARGET_SIZE_FLOOR_BYTES,
};
use crate::strength::CompressionStrength;

/// Derived per-image compression parameters. Computed fresh for every
/// source from its byte size, decoded dimensions and the strength
/// control; never user-set and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionParameters {
    /// Upper bound the encoder aims for, in bytes.
    pub target_size_bytes: u64,
    /// Upper bound on the longer image axis, in pixels.
    pub target_max_dimension: u32,
    /// Encode quality (1-99).
    pub quality: u8,
}

/// Pure derivation: target size is the strength-scaled original size
/// clamped to the floor; the dimension cap follows the tier rule and
/// never exceeds the image's own longer side (no upscaling).
pub fn derive_parameters(
    byte_size: u64,
    dimensions: (u32, u32),
    strength: CompressionStrength,
) -> CompressionParameters {
    let keep_fraction = 1.0 - f64::from(strength.value()) / 100.0;
    let scaled = (byte_size as f64 * keep_fraction).floor() as u64;
    let target_size_bytes = scaled.max(TARGET_SIZE_FLOOR_BYTES);

    let longer_side = dimensions.0.max(dimensions.1);
    let target_max_dimension = if longer_side > DIMENSION_TIER_UPPER {
        DIMENSION_TIER_UPPER
    } else if longer_side > DIMENSION_TIER_LOWER {
        DIMENSION_TIER_LOWER
    } else {
        longer_side
    };

    CompressionParameters {
        target_size_bytes,
        target_max_dimension,
        quality: strength.quality(),
    }
}
