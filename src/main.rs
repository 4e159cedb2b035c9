use anyhow::Context;
use clap::Parser;
use jelly_compress::cli::{Args, Commands};
use jelly_compress::error::Result;
use jelly_compress::strength::{CompressionStrength, StrengthPreset, StrengthSelection};
use jelly_compress::{batch, info, logger, pipeline};
use rayon::ThreadPoolBuilder;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    match args.command {
        Commands::Compress {
            input,
            output_dir,
            strength,
            preset,
            threads,
        } => {
            setup_thread_pool(threads);
            let selection = resolve_selection(strength, preset)?;
            pipeline::compress_image(input, output_dir, selection.strength())
                .context("compression failed")?;
        }
        Commands::Batch {
            input,
            output,
            strength,
            preset,
            recursive,
            json,
            threads,
        } => {
            setup_thread_pool(threads);
            let selection = resolve_selection(strength, preset)?;
            batch::batch_compress_images(&input, output, selection, recursive, json)
                .context("batch compression failed")?;
        }
        Commands::Info {
            input,
            strength,
            preset,
        } => {
            let selection = resolve_selection(strength, preset)?;
            info::print_image_info(&input, selection.strength())
                .context("image inspection failed")?;
        }
    }

    Ok(())
}

/// Map the mutually exclusive --strength/--preset flags to a selection;
/// neither flag means the default strength on the slider side.
fn resolve_selection(strength: Option<u8>, preset: Option<String>) -> Result<StrengthSelection> {
    match (strength, preset) {
        (Some(value), _) => Ok(StrengthSelection::Slider(CompressionStrength::new(value)?)),
        (None, Some(name)) => Ok(StrengthSelection::Preset(name.parse::<StrengthPreset>()?)),
        (None, None) => Ok(StrengthSelection::Slider(CompressionStrength::default())),
    }
}

fn setup_thread_pool(threads: Option<usize>) {
    let num_threads = threads.unwrap_or_else(num_cpus::get);
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .unwrap_or_else(|e| {
            jelly_compress::warn!("Failed to set thread pool size: {}", e);
        });
}
