use std::cmp::Ordering;
use std::path::Path;
use clap::ValueEnum;
use csv::Writer;
use log::info;
use crate::analyzers::duplicate::DuplicateGroup;
use crate::utils::file_ops::DeletionSummary;
use crate::{Result, ScanReport, SongRecord};

const HEADERS: [&str; 8] = ["Filename", "Title", "Artist", "Album", "Duration", "Size", "Format", "Bitrate"];
const WIDTHS: [usize; 8] = [28, 24, 20, 20, 8, 10, 6, 10];

/// Column a track table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Filename,
    Title,
    Artist,
    Album,
    Duration,
    Size,
    Format,
    Bitrate,
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn sort_records(records: &mut [SongRecord], key: SortKey, descending: bool) {
    records.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Filename => cmp_text(&a.filename, &b.filename),
            SortKey::Title => cmp_text(&a.title, &b.title),
            SortKey::Artist => cmp_text(&a.artist, &b.artist),
            SortKey::Album => cmp_text(&a.album, &b.album),
            SortKey::Duration => a.duration_secs.total_cmp(&b.duration_secs),
            SortKey::Size => a.size_bytes.cmp(&b.size_bytes),
            SortKey::Format => a.format.cmp(&b.format),
            SortKey::Bitrate => a.approx_kbps.cmp(&b.approx_kbps),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        format!("{:<width$}", value, width = width)
    } else {
        let cut: String = value.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn row_cells(record: &SongRecord) -> [String; 8] {
    [
        record.filename.clone(),
        record.title.clone(),
        record.artist.clone(),
        record.album.clone(),
        record.formatted_duration.clone(),
        record.formatted_size(),
        record.format.clone(),
        record.bitrate_label.to_string(),
    ]
}

pub struct Reporter;

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_table(&self, records: &[SongRecord]) -> String {
        let mut out = String::new();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(WIDTHS)
                .map(|(cell, width)| fit(cell, width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        out.push_str(&line(&headers[..]));
        out.push('\n');
        let rule: usize = WIDTHS.iter().sum::<usize>() + 2 * (WIDTHS.len() - 1);
        out.push_str(&"-".repeat(rule));
        out.push('\n');
        for record in records {
            out.push_str(&line(&row_cells(record)[..]));
            out.push('\n');
        }
        out
    }

    pub fn print_scan_report(&self, report: &ScanReport) {
        print!("{}", self.render_table(&report.records));
        println!(
            "\n{} tracks in {}",
            report.record_count(),
            report.directory.display()
        );
        if !report.errors.is_empty() {
            eprintln!("{} files could not be read:", report.error_count());
            for error in &report.errors {
                eprintln!("  {}", error);
            }
        }
    }

    pub fn write_records_csv(&self, records: &[SongRecord], output_path: impl AsRef<Path>) -> Result<()> {
        let output_path_ref = output_path.as_ref();
        let mut writer = Writer::from_path(output_path_ref)?;

        let mut header: Vec<&str> = HEADERS.to_vec();
        header.push("Path");
        writer.write_record(&header)?;

        for record in records {
            let mut row = row_cells(record).to_vec();
            row.push(record.path.display().to_string());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        info!("Track table written: {}", output_path_ref.display());
        Ok(())
    }

    pub fn print_duplicates(&self, groups: &[DuplicateGroup]) {
        for group in groups {
            println!("\n{}", group.reason);
            println!("  Keep:      {} ({})", group.keeper.filename, group.keeper.bitrate_label);
            for duplicate in &group.duplicates {
                println!("  Duplicate: {} ({})", duplicate.filename, duplicate.bitrate_label);
            }
        }
    }

    pub fn print_deletion_summary(&self, summary: &DeletionSummary) {
        if summary.dry_run {
            println!("\nDry run: {} duplicate tracks would be moved", summary.planned_count());
            return;
        }
        println!("\n{} duplicate tracks have been moved", summary.moved.len());
        for (path, error) in &summary.failed {
            eprintln!("  Error moving {}: {}", path.display(), error);
        }
    }

    pub fn generate_duplicate_report(&self, groups: &[DuplicateGroup], output_path: impl AsRef<Path>) -> Result<()> {
        let output_path_ref = output_path.as_ref();
        let mut writer = Writer::from_path(output_path_ref)?;

        writer.write_record([
            "Keeper",
            "Keeper Size (bytes)",
            "Keeper Bitrate",
            "Duplicate Files",
            "Duplicate Sizes",
            "Duplicate Bitrates",
            "Reason",
        ])?;

        for group in groups {
            let duplicates = group.duplicates.iter()
                .map(|f| f.filename.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            let duplicate_sizes = group.duplicates.iter()
                .map(|f| f.size_bytes.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            let duplicate_bitrates = group.duplicates.iter()
                .map(|f| f.bitrate_label.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            writer.write_record([
                &group.keeper.filename,
                &group.keeper.size_bytes.to_string(),
                &group.keeper.bitrate_label.to_string(),
                &duplicates,
                &duplicate_sizes,
                &duplicate_bitrates,
                &group.reason,
            ])?;
        }

        writer.flush()?;
        info!("Duplicate report written: {}", output_path_ref.display());
        Ok(())
    }
}
