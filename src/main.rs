use std::process::ExitCode;
use clap::Parser;
use track_dedupe::{
    DirectoryScanner,
    DuplicateAnalyzer,
    utils::{
        file_ops::FileManager,
        reporting::{sort_records, Reporter},
    },
};
use track_dedupe::cli::commands::{Cli, Commands};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let reporter = Reporter::new();

    match cli.command {
        Commands::Scan { dir, sort, desc, csv } => {
            let mut report = match DirectoryScanner::scan(&dir) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error scanning directory: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            sort_records(&mut report.records, sort, desc);
            reporter.print_scan_report(&report);

            if let Some(csv_path) = csv {
                match reporter.write_records_csv(&report.records, &csv_path) {
                    Ok(_) => println!("Table saved to: {}", csv_path.display()),
                    Err(e) => {
                        eprintln!("Error writing table: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
        }

        Commands::Duplicates { dir, quarantine, apply, report } => {
            println!("=== Starting Duplicate Analysis ===");
            println!("Scanning directory: {}", dir.display());

            let scan = match DirectoryScanner::scan(&dir) {
                Ok(scan) => scan,
                Err(e) => {
                    eprintln!("Error scanning directory: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            println!("Found {} readable audio files", scan.record_count());
            if scan.error_count() > 0 {
                eprintln!("{} files could not be read and were left out", scan.error_count());
            }

            let groups = DuplicateAnalyzer::new().find_duplicates(&scan.records);
            println!("Found {} groups of duplicates", groups.len());
            reporter.print_duplicates(&groups);

            let file_manager = FileManager::new(&quarantine);
            if apply && !groups.is_empty() {
                println!("\nMoving duplicates to: {}", file_manager.quarantine_dir().display());
            }
            let summary = file_manager.quarantine(&groups, !apply);
            reporter.print_deletion_summary(&summary);

            if let Some(report_path) = report {
                match reporter.generate_duplicate_report(&groups, &report_path) {
                    Ok(_) => println!("Report saved to: {}", report_path.display()),
                    Err(e) => {
                        eprintln!("Error generating report: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }

            println!("\n=== Duplicate Analysis Complete ===");
        }
    }

    ExitCode::SUCCESS
}
