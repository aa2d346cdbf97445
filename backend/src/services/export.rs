//! Static dashboard export.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::dashboard::{load_occupancy, render_dashboard};
use super::render::RenderOptions;
use crate::config::DashboardConfig;
use crate::pipeline::{PipelineError, PipelineResult};

/// What an export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub bytes_written: usize,
    pub samples_used: usize,
}

/// Load `config.data_path`, render every weekday and write the HTML document
/// to `config.output_path`.
///
/// Nothing is written when the pipeline reports an empty result.
pub fn export_dashboard(config: &DashboardConfig) -> PipelineResult<ExportReport> {
    let data = load_occupancy(
        &config.data_path,
        &config.loader_options(),
        config.filter_open_hours,
        None,
    )?;

    let opts = RenderOptions {
        zmax: config.zmax,
        percent_scale: config.percent_scale,
    };
    let html = render_dashboard(&data, None, &opts);
    write_output(&config.output_path, &html)?;
    info!(
        "Exported {} bytes to {}",
        html.len(),
        config.output_path.display()
    );

    Ok(ExportReport {
        output_path: config.output_path.clone(),
        bytes_written: html.len(),
        samples_used: data.summary.samples_used,
    })
}

fn write_output(path: &Path, html: &str) -> PipelineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    fs::write(path, html).map_err(|e| PipelineError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path, csv: &str) -> DashboardConfig {
        let data_path = dir.join("data.csv");
        fs::write(&data_path, csv).unwrap();
        DashboardConfig {
            data_path,
            output_path: dir.join("out").join("dashboard.html"),
            ..Default::default()
        }
    }

    #[test]
    fn test_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            dir.path(),
            "Timestamp,percent_filled\n2024-01-01 07:03:00,0.5\n2024-01-02 09:00:00,0.4\n",
        );

        let report = export_dashboard(&config).unwrap();
        assert_eq!(report.samples_used, 2);

        let html = fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(html.len(), report.bytes_written);
        assert!(html.contains("\"name\":\"Monday\""));
        assert!(html.contains("\"name\":\"Tuesday\""));
    }

    #[test]
    fn test_export_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "Timestamp,percent_filled\n2024-01-06 18:00:00,0.9\n");

        let err = export_dashboard(&config).unwrap_err();
        assert!(matches!(err, PipelineError::AllFilteredOut { total: 1 }));
        assert!(!config.output_path.exists());
    }
}
