use clap::Parser;
use std::process::ExitCode;
use yield_tag::output::{OutputFormat, write_records};
use yield_tag::utils::default_output_path;
use yield_tag::{Scrape, ScrapeConfig};

mod args;
use args::{Args, apply_overrides};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => match ScrapeConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ScrapeConfig::new(&args.hashtag),
    };
    let config = apply_overrides(&args, base);

    let tag = match config.clean_tag() {
        Ok(tag) => tag,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    ::log::info!("Starting scrape for #{}", tag);

    let start_time = std::time::Instant::now();
    let report = match Scrape::new(&config.tag).with_config(config).run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if report.records.is_empty() {
        ::log::warn!("No videos found for #{}", tag);
        eprintln!(
            "No videos found. YouTube may have changed its structure or content is restricted."
        );
    }

    let format = OutputFormat::from(args.format);
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&tag, format, chrono::Local::now()));

    if let Err(e) = write_records(&report.records, &out_path, format) {
        ::log::error!("Failed to write {}: {}", out_path.display(), e);
        return ExitCode::FAILURE;
    }

    ::log::info!(
        "Scrape complete - {} videos ({} dropped) in {:.2} seconds",
        report.records.len(),
        report.dropped(),
        start_time.elapsed().as_secs_f64()
    );
    println!(
        "Saved {} videos to {}",
        report.records.len(),
        out_path.display()
    );
    ExitCode::SUCCESS
}
