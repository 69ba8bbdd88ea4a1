use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pixpress", version, about = "Compress images to baseline JPEG")]
pub struct CliArgs {
    /// JSON file with default options; explicit flags win
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Print the result as JSON on stdout
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Shrink landscape images wider than this (integer ratio)
    #[arg(long, global = true)]
    pub max_width: Option<u32>,

    /// Shrink portrait images taller than this (integer ratio)
    #[arg(long, global = true)]
    pub max_height: Option<u32>,

    /// Ignore the EXIF orientation tag
    #[arg(long, global = true, default_value_t = false)]
    pub no_orientation: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress an image at a fixed quality
    Compress {
        /// Source image (JPEG or PNG)
        input: PathBuf,

        /// Destination JPEG file
        output: PathBuf,

        /// JPEG quality (1-100)
        #[arg(short, long)]
        quality: Option<i32>,

        /// Use the standard Huffman tables instead of optimized ones
        #[arg(long, default_value_t = false)]
        no_optimize: bool,
    },

    /// Lower the quality until the output fits a size budget
    Fit {
        /// Source image (JPEG or PNG)
        input: PathBuf,

        /// Destination JPEG file
        output: PathBuf,

        /// Size budget in KiB
        #[arg(long)]
        target_kb: Option<u64>,

        /// Quality of the first attempt
        #[arg(long)]
        start_quality: Option<u8>,

        /// Quality decrease between attempts
        #[arg(long)]
        step: Option<u8>,
    },
}
