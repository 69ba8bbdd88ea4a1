//! Options file loading and flag overrides.

use std::path::Path;

use pixpress_core::encode::DEFAULT_QUALITY;
use pixpress_core::{LoadOptions, SizeTarget};
use serde::{Deserialize, Serialize};

use crate::args::{CliArgs, Command};
use crate::errors::AppError;

/// Everything the commands need, after merging the file and the flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub quality: i32,
    pub optimize: bool,
    pub load: LoadOptions,
    pub target: SizeTarget,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            quality: i32::from(DEFAULT_QUALITY),
            optimize: true,
            load: LoadOptions::default(),
            target: SizeTarget::default(),
        }
    }
}

impl Options {
    /// Read options from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the options file named by `--config` (if any) and apply flags.
    pub fn resolve(args: &CliArgs) -> Result<Self, AppError> {
        let mut options = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        options.apply_args(args);
        Ok(options)
    }

    fn apply_args(&mut self, args: &CliArgs) {
        if let Some(max_width) = args.max_width {
            self.load.max_width = max_width;
        }
        if let Some(max_height) = args.max_height {
            self.load.max_height = max_height;
        }
        if args.no_orientation {
            self.load.apply_orientation = false;
        }

        match &args.command {
            Command::Compress {
                quality,
                no_optimize,
                ..
            } => {
                if let Some(quality) = quality {
                    self.quality = *quality;
                }
                if *no_optimize {
                    self.optimize = false;
                }
            }
            Command::Fit {
                target_kb,
                start_quality,
                step,
                ..
            } => {
                if let Some(kb) = target_kb {
                    self.target.target_bytes = kb.saturating_mul(1024);
                }
                if let Some(q) = start_quality {
                    self.target.start_quality = *q;
                }
                if let Some(step) = step {
                    self.target.quality_step = *step;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_without_config() {
        let args = CliArgs::parse_from(["pixpress", "compress", "in.png", "out.jpg"]);
        let options = Options::resolve(&args).unwrap();

        assert_eq!(options, Options::default());
        assert_eq!(options.quality, 90);
        assert!(options.optimize);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(
            &path,
            r#"{ "quality": 60, "optimize": true, "load": { "max_width": 500 } }"#,
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "pixpress",
            "--config",
            path.to_str().unwrap(),
            "compress",
            "in.png",
            "out.jpg",
            "--quality",
            "75",
            "--no-optimize",
        ]);
        let options = Options::resolve(&args).unwrap();

        assert_eq!(options.quality, 75);
        assert!(!options.optimize);
        assert_eq!(options.load.max_width, 500);
        assert_eq!(options.load.max_height, 1280);
    }

    #[test]
    fn test_fit_flags() {
        let args = CliArgs::parse_from([
            "pixpress",
            "fit",
            "in.png",
            "out.jpg",
            "--target-kb",
            "200",
            "--step",
            "5",
            "--max-height",
            "800",
        ]);
        let options = Options::resolve(&args).unwrap();

        assert_eq!(options.target.target_bytes, 200 * 1024);
        assert_eq!(options.target.quality_step, 5);
        assert_eq!(options.target.start_quality, 100);
        assert_eq!(options.load.max_height, 800);
    }

    #[test]
    fn test_bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Options::from_file(&path),
            Err(AppError::ConfigParse { .. })
        ));
        assert!(matches!(
            Options::from_file(&dir.path().join("absent.json")),
            Err(AppError::ConfigRead { .. })
        ));
    }
}
