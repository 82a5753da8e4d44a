//! CLI arguments using clap

use crate::application::dto::ScanOptions;
use crate::domain::services::LayoutScheme;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// imgdiag - parse images in a directory to diagnose whether they are corrupted
///
/// Every JPEG, TIFF, PNG and HEIC file under the scan path is parsed.
/// Invalid files can be moved aside, and valid ones can be filed into a
/// date/device folder hierarchy. Extensions are matched case-insensitively,
/// so `IMG_0001.JPG` is checked as well as `img_0001.jpg`.
#[derive(Parser, Debug)]
#[command(name = "imgdiag")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse images in a directory to diagnose whether they are corrupted")]
pub struct Cli {
    /// Path to directory to scan
    #[arg(short, long)]
    pub path: PathBuf,

    /// Move bad files to this directory
    #[arg(short, long = "move", value_name = "DIR")]
    pub move_bad: Option<PathBuf>,

    /// Move valid files into a date/device hierarchy under this directory
    #[arg(short, long, value_name = "DIR")]
    pub organize: Option<PathBuf>,

    /// Folder hierarchy used with --organize
    #[arg(long, value_enum, default_value_t = LayoutArg::DateDevice)]
    pub layout: LayoutArg,

    /// Only check these extensions, matched case-insensitively (e.g. jpg,heic)
    #[arg(short, long = "ext", value_delimiter = ',', value_name = "EXT")]
    pub extensions: Option<Vec<String>>,

    /// Whether to process hidden files and directories
    #[arg(long)]
    pub hidden: bool,

    /// Whether to log in JSON instead of pretty print
    #[arg(long)]
    pub json: bool,

    /// Log planned moves without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Show a progress spinner
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

/// Folder hierarchy choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// YYYY/MM/<device>
    DateDevice,
    /// YYYY/MM
    Date,
    /// <device>/YYYY/MM
    DeviceDate,
}

impl From<LayoutArg> for LayoutScheme {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::DateDevice => LayoutScheme::DateDevice,
            LayoutArg::Date => LayoutScheme::Date,
            LayoutArg::DeviceDate => LayoutScheme::DeviceDate,
        }
    }
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::TRACE
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Converts the arguments into scan options
    pub fn scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions::new(&self.path)
            .with_hidden(self.hidden)
            .with_dry_run(self.dry_run)
            .with_extensions(self.extensions.clone().unwrap_or_default());

        if let Some(dir) = &self.move_bad {
            options = options.with_quarantine(dir);
        }
        if let Some(dir) = &self.organize {
            options = options.with_organize(dir, self.layout.into());
        }

        options
    }
}
