//! Data export for external analysis
//!
//! Exports run histories in formats consumable by spreadsheet and data
//! analysis tools. See [`csv`] for the CSV writer.

pub mod csv;

// Re-export commonly used items for convenience
pub use csv::{export_history_csv, CsvConfig, CsvMetadata};
