use std::path::PathBuf;
use serde::Serialize;

pub mod analyzers;
pub mod audio;
pub mod utils;
pub mod cli;

use analyzers::bitrate::BitrateLabel;

/// One row of the track table: what was read from the file plus the fields
/// derived from it for display.
#[derive(Debug, Clone, Serialize)]
pub struct SongRecord {
    pub path: PathBuf,
    pub filename: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: f64,
    pub formatted_duration: String,
    pub size_bytes: u64,
    pub file_size_mb: f64,
    pub format: String,
    pub approx_kbps: i64,
    pub bitrate_label: BitrateLabel,
}

impl SongRecord {
    pub fn formatted_size(&self) -> String {
        utils::format::format_megabytes(self.file_size_mb)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Cannot read directory {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unreadable audio file {file}: {reason}")]
    UnreadableAudio { file: String, reason: String },
    #[error("Metadata read error for {file}: {reason}")]
    MetadataRead { file: String, reason: String },
    #[error("Cannot compute bitrate for {file}: duration is zero or undefined")]
    ZeroDuration { file: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScanError {
    /// The file a per-file error refers to, if any.
    pub fn file(&self) -> Option<&str> {
        match self {
            ScanError::UnreadableAudio { file, .. }
            | ScanError::MetadataRead { file, .. }
            | ScanError::ZeroDuration { file } => Some(file),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

// Re-exports for convenience
pub use audio::metadata::MetadataExtractor;
pub use audio::scanner::{scan, DirectoryScanner, ScanReport, AUDIO_EXTENSIONS};
pub use analyzers::bitrate::{approximate_kbps, bucket};
pub use analyzers::duplicate::{DuplicateAnalyzer, DuplicateGroup};
pub use utils::format::{format_duration, format_size};
