use clap::{Parser, Subcommand};
use std::path::PathBuf;
use crate::utils::reporting::SortKey;

#[derive(Parser)]
#[command(name = "track-dedupe")]
#[command(version = "1.0")]
#[command(about = "Browse a music folder's track metadata and clear out duplicate tracks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the audio files in a directory with their metadata
    Scan {
        /// Music directory to scan (not recursive)
        #[arg(short = 'i', long = "input")]
        dir: PathBuf,

        /// Column to sort the table by
        #[arg(short = 's', long, value_enum, default_value_t = SortKey::Filename)]
        sort: SortKey,

        /// Sort in descending order
        #[arg(long)]
        desc: bool,

        /// Also write the table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Find duplicate tracks and optionally move them out of the way
    Duplicates {
        /// Music directory to scan (not recursive)
        #[arg(short = 'i', long = "input")]
        dir: PathBuf,

        /// Directory duplicates are moved into
        #[arg(short = 'o', long = "output", default_value = "duplicates")]
        quarantine: PathBuf,

        /// Actually move the duplicates; without this nothing is touched
        #[arg(long)]
        apply: bool,

        /// Write the duplicate groups to this CSV file
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn duplicates_defaults_to_dry_run() {
        let cli = Cli::try_parse_from(["track-dedupe", "duplicates", "-i", "/music"]).unwrap();
        match cli.command {
            Commands::Duplicates { dir, quarantine, apply, report } => {
                assert_eq!(dir, PathBuf::from("/music"));
                assert_eq!(quarantine, PathBuf::from("duplicates"));
                assert!(!apply);
                assert!(report.is_none());
            }
            _ => panic!("expected duplicates command"),
        }
    }

    #[test]
    fn scan_parses_sort_key() {
        let cli = Cli::try_parse_from(["track-dedupe", "scan", "-i", "/music", "--sort", "bitrate", "--desc"]).unwrap();
        match cli.command {
            Commands::Scan { sort, desc, csv, .. } => {
                assert_eq!(sort, SortKey::Bitrate);
                assert!(desc);
                assert!(csv.is_none());
            }
            _ => panic!("expected scan command"),
        }
    }
}
