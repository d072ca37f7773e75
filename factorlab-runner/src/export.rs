//! Export — the factor CSV and the JSON run manifest.
//!
//! Two artifacts per run:
//! - **CSV**: date column plus every strategy series (absolute then
//!   relative), the file the study exists to produce
//! - **JSON**: the full `FactorBacktestResult` with a `schema_version`
//!   field; unknown newer versions are rejected on load

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::BacktestConfig;
use crate::runner::{FactorBacktestResult, SCHEMA_VERSION};

/// Derived CSV file name: `Factors{start_date}.csv`.
pub fn default_csv_name(config: &BacktestConfig) -> String {
    format!("Factors{}.csv", config.backtest.start_date)
}

/// Render the combined series CSV: one date column, one column per series.
pub fn export_series_csv(result: &FactorBacktestResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date".to_string()];
    header.extend(result.all_series().map(|s| s.name.clone()));
    wtr.write_record(&header)?;

    for (i, date) in result.dates.iter().enumerate() {
        let mut record = vec![date.to_string()];
        for series in result.all_series() {
            record.push(format!("{:.6}", series.series[i]));
        }
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize a run result to pretty JSON.
pub fn export_json(result: &FactorBacktestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize result to JSON")
}

/// Deserialize a run result from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<FactorBacktestResult> {
    let result: FactorBacktestResult =
        serde_json::from_str(json).context("failed to deserialize result from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

/// Save the artifact set for a run: the factor CSV and `manifest.json`.
///
/// Returns the directory the artifacts were written to.
pub fn save_artifacts(result: &FactorBacktestResult, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let csv_name = if result.config.output.csv_path.is_empty() {
        default_csv_name(&result.config)
    } else {
        result.config.output.csv_path.clone()
    };

    let csv_path = output_dir.join(csv_name);
    std::fs::write(&csv_path, export_series_csv(result)?)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    let manifest_path = output_dir.join("manifest.json");
    std::fs::write(&manifest_path, export_json(result)?)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    Ok(output_dir.to_path_buf())
}
