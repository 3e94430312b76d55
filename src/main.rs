use clap::Parser;
use env_logger::Builder;
use lambench::generate_report;
use log::{error, info};
use std::{fs, path::PathBuf};

/// Render a multi-panel PNG report from a CSV of serverless invocation
/// metrics.
#[derive(Parser)]
#[command(name = "lambench")]
struct Cli {
    /// Path to the benchmark CSV file. When omitted, the first `.csv` file
    /// in the current directory is used.
    csv_file: Option<PathBuf>,
}

fn find_default_csv() -> Option<PathBuf> {
    let entries = fs::read_dir(".").ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            return Some(path);
        }
    }

    None
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger.
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    builder.init();

    let cli = Cli::parse();

    let csv_file = match cli.csv_file {
        Some(path) => path,
        None => match find_default_csv() {
            Some(path) => {
                info!("using csv file: {}", path.display());
                path
            }
            None => {
                println!("usage: lambench [CSV_FILE]");
                println!("or run from a directory containing benchmark CSV data");
                return Ok(());
            }
        },
    };

    // A failed run logs its reason and still exits zero.
    if let Err(err) = generate_report(&csv_file) {
        error!("failed to generate report: {err}");
    }

    Ok(())
}
