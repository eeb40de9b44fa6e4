use std::path::{Path, PathBuf};
use std::fs;
use log::{info, warn};
use crate::analyzers::duplicate::DuplicateGroup;
use crate::{Result, ScanError};

/// What a deletion pass did, or would have done on a dry run.
#[derive(Debug, Default)]
pub struct DeletionSummary {
    pub dry_run: bool,
    pub planned: Vec<PathBuf>,
    pub moved: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, ScanError)>,
}

impl DeletionSummary {
    pub fn planned_count(&self) -> usize {
        self.planned.len()
    }
}

/// Moves duplicates into a quarantine directory. Nothing is ever unlinked.
pub struct FileManager {
    quarantine_dir: PathBuf,
}

impl FileManager {
    pub fn new(quarantine_dir: impl Into<PathBuf>) -> Self {
        Self {
            quarantine_dir: quarantine_dir.into(),
        }
    }

    pub fn quarantine_dir(&self) -> &Path {
        &self.quarantine_dir
    }

    /// Free name in the quarantine directory for `file_path`, adding a
    /// `_duplicate_<n>` suffix when the plain name is taken.
    fn destination_for(&self, file_path: &Path) -> Result<PathBuf> {
        let file_name = file_path.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid file path")
        })?;

        let destination = self.quarantine_dir.join(file_name);
        if !destination.exists() {
            return Ok(destination);
        }

        let stem = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "duplicate".to_string());
        let extension = file_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let mut counter = 1;
        loop {
            let candidate = self
                .quarantine_dir
                .join(format!("{}_duplicate_{}{}", stem, counter, extension));
            if !candidate.exists() {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    pub fn move_duplicate(&self, file_path: impl AsRef<Path>) -> Result<PathBuf> {
        let file_path = file_path.as_ref();
        self.ensure_directory(&self.quarantine_dir)?;
        let destination = self.destination_for(file_path)?;
        fs::rename(file_path, &destination)?;
        Ok(destination)
    }

    pub fn ensure_directory(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::create_dir_all(path.as_ref())?;
        Ok(())
    }

    /// Moves every non-keeper of every group. On a dry run only the plan is
    /// filled in. A failed move is recorded and the rest carry on.
    pub fn quarantine(&self, groups: &[DuplicateGroup], dry_run: bool) -> DeletionSummary {
        let mut summary = DeletionSummary {
            dry_run,
            ..Default::default()
        };

        for group in groups {
            for duplicate in &group.duplicates {
                summary.planned.push(duplicate.path.clone());
                if dry_run {
                    continue;
                }
                match self.move_duplicate(&duplicate.path) {
                    Ok(destination) => {
                        info!("Moved {} -> {}", duplicate.path.display(), destination.display());
                        summary.moved.push((duplicate.path.clone(), destination));
                    }
                    Err(e) => {
                        warn!("Could not move {}: {}", duplicate.path.display(), e);
                        summary.failed.push((duplicate.path.clone(), e));
                    }
                }
            }
        }

        summary
    }
}
