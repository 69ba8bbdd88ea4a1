use serde::Serialize;
use tracing::{info, warn};

use pixpress_core::{compress_file, compress_file_to_size, EncodeSummary, FitOutcome};

use crate::args::{CliArgs, Command};
use crate::config::Options;
use crate::errors::AppError;

/// What a command produced, printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Compressed(EncodeSummary),
    Fitted(FitOutcome),
}

pub fn run(args: &CliArgs) -> Result<Report, AppError> {
    let options = Options::resolve(args)?;

    let report = match &args.command {
        Command::Compress { input, output, .. } => {
            info!(
                input = %input.display(),
                output = %output.display(),
                quality = options.quality,
                optimize = options.optimize,
                "Compressing"
            );
            let summary = compress_file(
                input,
                output,
                options.quality,
                options.optimize,
                &options.load,
            )?;
            info!(
                "Wrote {}x{} JPEG, {} bytes",
                summary.width, summary.height, summary.bytes_written
            );
            Report::Compressed(summary)
        }
        Command::Fit { input, output, .. } => {
            info!(
                input = %input.display(),
                output = %output.display(),
                target_bytes = options.target.target_bytes,
                "Compressing to target size"
            );
            let outcome = compress_file_to_size(input, output, &options.target, &options.load)?;
            match outcome {
                FitOutcome::AlreadyWithinTarget { source_bytes } => {
                    info!("Source is {source_bytes} bytes, already within target; nothing written")
                }
                FitOutcome::Fit { quality, bytes, .. } => {
                    info!("Wrote {bytes} bytes at quality {quality}")
                }
                FitOutcome::BestEffort { quality, bytes, .. } => {
                    warn!("Target not reached; wrote {bytes} bytes at quality {quality}")
                }
            }
            Report::Fitted(outcome)
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(report)
}
