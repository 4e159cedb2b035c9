use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jelly-compress",
    about = "Strength-driven image compression with a safe fallback to the original",
    long_about = "jelly-compress reduces JPEG, PNG and WebP file sizes from a single \
                  compression-strength control. The strength value picks a target size, \
                  a dimension cap and an encode quality per image; when re-encoding does \
                  not actually shrink a file, the original is kept instead.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    jelly-compress compress photo.jpg -s 70\n  \
    jelly-compress compress photo.jpg -o ./out --preset strong\n  \
    jelly-compress batch ./images ./compressed -r --preset balanced\n  \
    jelly-compress batch \"./shots/*.png\" ./compressed -s 35 --json\n  \
    jelly-compress info photo.png"
)]
pub struct Args {
    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Suppress informational output"
    )]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image file",
        long_about = "Compress one image. The output keeps the input's format and is \
                      named after the original with the _jelly_image_compress suffix."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'o',
            long,
            help = "Output directory (default: next to the input)"
        )]
        output_dir: Option<PathBuf>,

        #[arg(
            short = 's',
            long,
            conflicts_with = "preset",
            help = "Compression strength (1-99, default: 50)",
            long_help = "Compression strength from 1 (gentle) to 99 (aggressive). \
                         Higher values request a smaller target size and lower quality. \
                         Mutually exclusive with --preset."
        )]
        strength: Option<u8>,

        #[arg(
            short = 'p',
            long,
            help = "Strength preset: light, balanced or strong",
            long_help = "Named strength level: light (25), balanced (50) or strong (75). \
                         Mutually exclusive with --strength."
        )]
        preset: Option<String>,

        #[arg(
            short = 'j',
            long,
            help = "Number of worker threads (default: auto)"
        )]
        threads: Option<usize>,
    },

    #[command(
        about = "Compress many images in parallel",
        long_about = "Process a directory, glob pattern or single path as a batch. Every \
                      file is compressed independently; one failure never aborts the \
                      rest, and per-file results stay aligned with the input order."
    )]
    Batch {
        #[arg(
            help = "Input directory, file path or glob pattern",
            long_help = "Input can be a directory, a single file or a glob expression. \
                         Examples: './images', 'photo.jpg', './shots/*.png'"
        )]
        input: String,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[arg(
            short = 's',
            long,
            conflicts_with = "preset",
            help = "Compression strength (1-99, default: 50)"
        )]
        strength: Option<u8>,

        #[arg(
            short = 'p',
            long,
            help = "Strength preset: light, balanced or strong"
        )]
        preset: Option<String>,

        #[arg(
            short = 'r',
            long,
            help = "Process subdirectories recursively"
        )]
        recursive: bool,

        #[arg(long, help = "Print the batch report as JSON")]
        json: bool,

        #[arg(
            short = 'j',
            long,
            help = "Number of worker threads (default: auto)"
        )]
        threads: Option<usize>,
    },

    #[command(
        about = "Show image details and the parameters compression would use",
        long_about = "Display file and pixel information for an image together with the \
                      target size, dimension cap and quality each strength level would \
                      derive for it."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,

        #[arg(
            short = 's',
            long,
            conflicts_with = "preset",
            help = "Strength to preview (1-99, default: 50)"
        )]
        strength: Option<u8>,

        #[arg(
            short = 'p',
            long,
            help = "Preset to preview: light, balanced or strong"
        )]
        preset: Option<String>,
    },
}
