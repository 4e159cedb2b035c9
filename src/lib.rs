pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod info;
pub mod logger;
pub mod params;
pub mod pipeline;
pub mod source;
pub mod state;
pub mod stats;
pub mod strength;
pub mod utils;

pub use batch::{batch_compress_images, collect_image_files, compress_all, is_image_file};
pub use error::{CompressionError, Result};
pub use formats::SupportedFormat;
pub use info::print_image_info;
pub use params::{derive_parameters, CompressionParameters};
pub use pipeline::{compress_image, compress_source, CompressionResult};
pub use source::SourceImage;
pub use state::SessionState;
pub use stats::{BatchReport, CompressionStats, FileReport, Outcome};
pub use strength::{CompressionStrength, StrengthPreset, StrengthSelection};
