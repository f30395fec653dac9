//! # LSB Detector Command Line
//!
//! Thin wrapper over the library: pick an image, run embed/extract/analyze,
//! print the result.
//!
//! ## Usage
//!
//! ```bash
//! lsb-detector analyze photo.png
//! lsb-detector scan ./images --json scan.json
//! lsb-detector embed cover.png "meet at noon" -o stego.png
//! lsb-detector create "meet at noon" --seed 7
//! lsb-detector extract stego.png
//! lsb-detector capacity cover.png
//! ```
//!
//! All commands accept `--config <FILE>` (TOML) and `--channel red|green|blue`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use lsb_detector::common::config::DetectorConfig;
use lsb_detector::common::image_io::{
    find_images, with_image_extension, FsImageStore, ImageProvider, ImageWriter,
};
use lsb_detector::common::report::{AnalysisReport, ScanReport};
use lsb_detector::processing::bitstream::max_message_len;
use lsb_detector::processing::steganography::{embed_text_in_image, random_cover};
use lsb_detector::utils::init_logger;
use lsb_detector::{Channel, LsbDetector};

#[derive(Parser, Debug)]
#[command(name = "lsb-detector")]
#[command(author, version, about = "Hide, extract and detect LSB steganography", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Colour channel to use (overrides the configuration)
    #[arg(long, global = true, value_enum)]
    channel: Option<Channel>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one image for a hidden LSB payload
    Analyze {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Write the full report as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Analyze every image (jpg, jpeg, png, bmp, tiff) in a directory
    Scan {
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Write all reports plus a summary as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Print the message hidden in an image
    Extract {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// Hide a message in an existing image
    Embed {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Output file (".png" is appended without a known image extension)
        #[arg(short, long, default_value = "stego.png")]
        output: String,
    },

    /// Generate a random cover image and hide a message in it
    Create {
        #[arg(value_name = "MESSAGE")]
        message: String,

        #[arg(short, long, default_value = "stego_cover.png")]
        output: String,

        /// Seed for the cover's random samples
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show how many characters an image can hide
    Capacity {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = DetectorConfig::from_optional_file(cli.config.as_ref())?;
    let channel = cli.channel.unwrap_or(config.analysis.channel);
    let detector = LsbDetector::with_scorer(config.scorer());
    let store = FsImageStore;

    match cli.command {
        Commands::Analyze { image, json } => {
            let report = analyze(&detector, &store, &image, channel)?;
            println!("\nANALYSIS OF {} ({} channel)", image.display(), channel);
            println!("{}", "=".repeat(60));
            println!("{}", report.verdict);
            if let Some(path) = json {
                report
                    .export_to_json(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Report written to: {}", path.display());
            }
        }
        Commands::Scan { dir, json } => {
            let images =
                find_images(&dir).with_context(|| format!("listing {}", dir.display()))?;
            if images.is_empty() {
                println!("No images found in {}", dir.display());
                return Ok(());
            }

            let mut scan = ScanReport::new();
            for path in images {
                match analyze(&detector, &store, &path, channel) {
                    Ok(report) => {
                        println!(
                            "{:<40} {:.2}  {}",
                            path.display(),
                            report.verdict.score,
                            report.verdict.status
                        );
                        scan.record(report);
                    }
                    Err(e) => {
                        warn!("Skipping {}: {:#}", path.display(), e);
                        scan.record_failure(path.display().to_string(), format!("{:#}", e));
                    }
                }
            }

            let summary = scan.summarize();
            println!(
                "\n{} images: {} detected, {} suspicious, {} normal, {} failed",
                summary.total_images,
                summary.detected,
                summary.suspicious,
                summary.normal,
                summary.failed
            );
            if let Some(path) = json {
                scan.export_to_json(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Report written to: {}", path.display());
            }
        }
        Commands::Extract { image } => {
            let plane = store.load_channel(&image, channel)?;
            match lsb_detector::extract_message(&plane) {
                Some(message) => println!("Message found: '{}'", message),
                None => println!("No message found"),
            }
        }
        Commands::Embed {
            image,
            message,
            output,
        } => {
            let cover = store.load_rgb(&image)?;
            let stego = embed_text_in_image(&cover, channel, &message)?;
            let output = with_image_extension(&output);
            store.save_rgb(&stego, &output)?;
            println!("Message hidden in: {}", output.display());
        }
        Commands::Create {
            message,
            output,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let cover_cfg = &config.cover;
            let cover = random_cover(
                &mut rng,
                cover_cfg.width,
                cover_cfg.height,
                cover_cfg.min_value,
                cover_cfg.max_value,
            );
            let stego = embed_text_in_image(&cover, channel, &message)?;
            let output = with_image_extension(&output);
            store.save_rgb(&stego, &output)?;
            info!("Created {}x{} cover", cover_cfg.width, cover_cfg.height);
            println!("Image created: {}", output.display());
        }
        Commands::Capacity { image } => {
            let plane = store.load_channel(&image, channel)?;
            println!(
                "{}x{} {} channel: {} bits, up to {} characters",
                plane.width(),
                plane.height(),
                channel,
                plane.capacity_bits(),
                max_message_len(plane.capacity_bits())
            );
        }
    }

    Ok(())
}

fn analyze(
    detector: &LsbDetector,
    store: &FsImageStore,
    path: &Path,
    channel: Channel,
) -> Result<AnalysisReport> {
    let image = store.load_rgb(path)?;
    let verdict = detector.analyze_image(&image, channel)?;
    Ok(AnalysisReport {
        image: path.display().to_string(),
        channel,
        width: image.width(),
        height: image.height(),
        verdict,
    })
}
