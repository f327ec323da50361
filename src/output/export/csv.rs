//! CSV export for coupled-run histories
//!
//! This module exports the per-major-step history of a partitioned run to
//! CSV (Comma-Separated Values) format, compatible with Excel, Python
//! pandas, MATLAB, and most data analysis tools. The usual consumer is a
//! validation workflow comparing a partitioned run against a fully coupled
//! reference solution.
//!
//! # Features
//!
//! - **Simple interface**: export from the recorded [`HistoryRow`] slice
//! - **Metadata support**: optional header comments with run parameters
//! - **Customizable**: delimiter, precision, format options
//! - **Validation**: checks for empty and non-finite data
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use cht_rs::output::export::export_history_csv;
//!
//! // rows recorded by a StepHistory reporter during the run
//! export_history_csv(&history.rows(), "run.csv", None)?;
//! ```
//!
//! **Output** (`run.csv`):
//! ```csv
//! Time (s),Major Step,Total Fluid Iterations,Total Solid Steps
//! 0.004000,1,60,2
//! 0.008000,2,120,4
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use cht_rs::output::export::{export_history_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_run("Thermal Network", "Alternating Fluid-Solid", &config);
//! let csv_config = CsvConfig::default().with_metadata(metadata);
//!
//! export_history_csv(&history.rows(), "run.csv", Some(&csv_config))?;
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::coupling::{CouplingConfig, HistoryRow};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',        // European CSV
///     precision: 10,         // High precision
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for the time column (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Custom header for the time column (default: "Time (s)")
    pub time_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (s)".to_string(),
        }
    }
}

impl CsvConfig {
    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are included in the header.
#[derive(Clone, Default)]
pub struct CsvMetadata {
    /// Engine name (e.g., "Thermal Network")
    pub engine_name: Option<String>,

    /// Scheme name (e.g., "Alternating Fluid-Solid")
    pub scheme_name: Option<String>,

    /// Configured end time (seconds)
    pub end_time: Option<f64>,

    /// Solid timestep (seconds)
    pub solid_time_step: Option<f64>,

    /// Fluid iterations per solve
    pub fluid_iterations: Option<u32>,

    /// Subcycles per major step
    pub subcycles: Option<u32>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Create metadata from a run's engine, scheme and configuration.
    pub fn from_run(engine: &str, scheme: &str, config: &CouplingConfig) -> Self {
        Self {
            engine_name: Some(engine.to_string()),
            scheme_name: Some(scheme.to_string()),
            end_time: Some(config.end_time),
            solid_time_step: Some(config.solid_time_step),
            fluid_iterations: Some(config.fluid_iterations),
            subcycles: Some(config.subcycles),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments to file
fn write_metadata_header(file: &mut File, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(file, "# Partitioned Coupling Run History")?;

    // Timestamp (current time)
    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    // Engine and scheme
    if let Some(engine) = &metadata.engine_name {
        writeln!(file, "# Engine: {}", engine)?;
    }
    if let Some(scheme) = &metadata.scheme_name {
        writeln!(file, "# Scheme: {}", scheme)?;
    }

    // Run parameters
    if let Some(end_time) = metadata.end_time {
        writeln!(file, "# End Time: {} s", end_time)?;
    }
    if let Some(step) = metadata.solid_time_step {
        writeln!(file, "# Solid Timestep: {} s", step)?;
    }
    if let Some(iterations) = metadata.fluid_iterations {
        writeln!(file, "# Fluid Iterations: {}", iterations)?;
    }
    if let Some(subcycles) = metadata.subcycles {
        writeln!(file, "# Subcycles: {}", subcycles)?;
    }

    // Custom parameters
    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    // Separator
    writeln!(file, "#")?;

    Ok(())
}

/// Validate history rows before export
fn validate_history(rows: &[HistoryRow]) -> Result<(), Box<dyn Error>> {
    if rows.is_empty() {
        return Err("Cannot export empty history".into());
    }

    if rows.iter().any(|row| !row.time.is_finite()) {
        return Err("History contains non-finite time values".into());
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a run history to CSV.
///
/// One data row per major step: time reached, step index, running fluid
/// iteration total, running solid step total.
///
/// # Arguments
///
/// * `rows` - History rows, in major-step order
/// * `path` - Output file path
/// * `config` - Optional format configuration (`None` for defaults)
///
/// # Errors
///
/// Fails on empty or non-finite history data and on any I/O error.
///
/// # Example
///
/// ```rust
/// use cht_rs::coupling::HistoryRow;
/// use cht_rs::output::export::export_history_csv;
///
/// let rows = vec![
///     HistoryRow { major_step: 1, time: 0.004, total_fluid_iterations: 60, total_solid_steps: 2 },
///     HistoryRow { major_step: 2, time: 0.008, total_fluid_iterations: 120, total_solid_steps: 4 },
/// ];
///
/// let path = std::env::temp_dir().join("cht_rs_doc_history.csv");
/// export_history_csv(&rows, path.to_str().unwrap(), None).unwrap();
/// # std::fs::remove_file(path).unwrap();
/// ```
pub fn export_history_csv(
    rows: &[HistoryRow],
    path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    validate_history(rows)?;

    let mut file = File::create(path)?;

    // Optional metadata header
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // Column header
    writeln!(
        file,
        "{}{}Major Step{}Total Fluid Iterations{}Total Solid Steps",
        config.time_header, config.delimiter, config.delimiter, config.delimiter
    )?;

    // Data rows
    for row in rows {
        writeln!(
            file,
            "{:.prec$}{}{}{}{}{}{}",
            row.time,
            config.delimiter,
            row.major_step,
            config.delimiter,
            row.total_fluid_iterations,
            config.delimiter,
            row.total_solid_steps,
            prec = config.precision
        )?;
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_rows() -> Vec<HistoryRow> {
        vec![
            HistoryRow {
                major_step: 1,
                time: 0.004,
                total_fluid_iterations: 60,
                total_solid_steps: 2,
            },
            HistoryRow {
                major_step: 2,
                time: 0.008,
                total_fluid_iterations: 120,
                total_solid_steps: 4,
            },
        ]
    }

    #[test]
    fn test_export_minimal() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        export_history_csv(&sample_rows(), path, None).unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "Time (s),Major Step,Total Fluid Iterations,Total Solid Steps"
        );
        assert_eq!(lines[1], "0.004000,1,60,2");
        assert_eq!(lines[2], "0.008000,2,120,4");
    }

    #[test]
    fn test_export_with_metadata() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let config = CouplingConfig::default();
        let metadata = CsvMetadata::from_run("Thermal Network", "Alternating Fluid-Solid", &config);
        let csv_config = CsvConfig::default().with_metadata(metadata);

        export_history_csv(&sample_rows(), path, Some(&csv_config)).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("# Engine: Thermal Network"));
        assert!(content.contains("# Scheme: Alternating Fluid-Solid"));
        assert!(content.contains("# End Time: 10 s"));
        assert!(content.contains("# Solid Timestep: 0.002 s"));
        assert!(content.contains("# Fluid Iterations: 30"));
    }

    #[test]
    fn test_export_custom_delimiter_and_precision() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let csv_config = CsvConfig::default().delimiter(';').precision(3);
        export_history_csv(&sample_rows(), path, Some(&csv_config)).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("0.004;1;60;2"));
    }

    #[test]
    fn test_export_empty_history_fails() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let result = export_history_csv(&[], path, None);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty history"));
    }

    #[test]
    fn test_export_non_finite_time_fails() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let rows = vec![HistoryRow {
            major_step: 1,
            time: f64::NAN,
            total_fluid_iterations: 60,
            total_solid_steps: 2,
        }];

        let result = export_history_csv(&rows, path, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_metadata_entries() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let mut metadata = CsvMetadata::default();
        metadata.add_custom("Case".to_string(), "GPU cold plate".to_string());

        let csv_config = CsvConfig::default().with_metadata(metadata);
        export_history_csv(&sample_rows(), path, Some(&csv_config)).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("# Case: GPU cold plate"));
    }
}
