use std::ffi::OsString;
use std::path::{Path, PathBuf};
use log::{info, warn};
use walkdir::WalkDir;
use crate::audio::metadata::MetadataExtractor;
use crate::utils::parallel::ParallelProcessor;
use crate::{Result, ScanError, SongRecord};

/// Extensions the scanner picks up, compared case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "w4a"];

/// Everything one scan produced. Bad files land in `errors`, the rest in `records`.
#[derive(Debug)]
pub struct ScanReport {
    pub directory: PathBuf,
    pub records: Vec<SongRecord>,
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

pub struct DirectoryScanner;

impl ParallelProcessor for DirectoryScanner {}

impl DirectoryScanner {
    pub fn is_audio_file(path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                AUDIO_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// File names of the recognized audio files directly inside `dir`, in
    /// the order the filesystem lists them. Symlinks are resolved, and names
    /// are kept as-is even when they are not UTF-8 so extraction can report them.
    pub fn list_candidates(dir: impl AsRef<Path>) -> Result<Vec<OsString>> {
        let dir = dir.as_ref();
        let filesystem_error = |source: std::io::Error| ScanError::Filesystem {
            path: dir.to_path_buf(),
            source,
        };

        let meta = std::fs::metadata(dir).map_err(filesystem_error)?;
        if !meta.is_dir() {
            return Err(filesystem_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a directory",
            )));
        }
        // Surfaces permission errors on the directory itself before walking it.
        std::fs::read_dir(dir).map_err(filesystem_error)?;

        let mut candidates = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 is the directory itself; failing to list it fails the scan.
                Err(err) if err.depth() == 0 => {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed"));
                    return Err(filesystem_error(source));
                }
                Err(err) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                    continue;
                }
            };

            if entry.file_type().is_file() && Self::is_audio_file(entry.path()) {
                candidates.push(entry.file_name().to_os_string());
            }
        }

        Ok(candidates)
    }

    /// Lists the directory and extracts every candidate. Only a failure to
    /// read the directory itself is an `Err`; per-file failures are collected
    /// in the report.
    pub fn scan(dir: impl AsRef<Path>) -> Result<ScanReport> {
        Self::init_parallel_processing();
        let dir = dir.as_ref();

        info!("Scanning directory: {}", dir.display());
        let candidates = Self::list_candidates(dir)?;
        info!("Found {} candidate audio files", candidates.len());

        let results = Self::parallel_map(&candidates, "Extracting metadata", |name| {
            MetadataExtractor::extract_metadata(dir.join(name))
        });

        let mut records = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping file: {}", e);
                    errors.push(e);
                }
            }
        }

        info!(
            "Scan of {} complete: {} records, {} errors",
            dir.display(),
            records.len(),
            errors.len()
        );

        Ok(ScanReport {
            directory: dir.to_path_buf(),
            records,
            errors,
        })
    }
}

/// Shorthand for [`DirectoryScanner::scan`].
pub fn scan(dir: impl AsRef<Path>) -> Result<ScanReport> {
    DirectoryScanner::scan(dir)
}
