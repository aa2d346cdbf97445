//! Static dashboard exporter.
//!
//! Writes a self-contained HTML page with the occupancy heatmap and the
//! per-weekday timeline.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin rsf-export -- scraped_data2.csv dashboard.html
//! ```
//!
//! Positional arguments override `data_path` and `output_path` from
//! configuration (`rsf.toml`, `RSF_*` environment variables).

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rsf_occupancy::config::DashboardConfig;
use rsf_occupancy::pipeline::PipelineError;
use rsf_occupancy::services::export_dashboard;

#[derive(Parser, Debug)]
#[command(name = "rsf-export")]
#[command(about = "Export the RSF occupancy dashboard as a static HTML file")]
struct Args {
    /// CSV source with Timestamp and percent_filled columns
    csv_path: Option<PathBuf>,

    /// Output HTML file
    output_path: Option<PathBuf>,
}

/// Log filter from `RUST_LOG` directives, falling back to `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let mut config = DashboardConfig::load().context("Failed to load configuration")?;
    if let Some(csv_path) = args.csv_path {
        config.data_path = csv_path;
    }
    if let Some(output_path) = args.output_path {
        config.output_path = output_path;
    }

    match export_dashboard(&config) {
        Ok(report) => {
            println!("Wrote {}", report.output_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(PipelineError::AllFilteredOut { .. }) => {
            eprintln!("No data after filtering open hours.");
            Ok(ExitCode::FAILURE)
        }
        Err(e @ PipelineError::NoSourceData) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).with_context(|| {
            format!("Failed to export dashboard from {}", config.data_path.display())
        }),
    }
}
