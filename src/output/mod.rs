//! Output module for coupled-run results
//!
//! This module provides tools to get data out of a run for external
//! analysis:
//!
//! - **Export**: CSV history export for comparison against a fully
//!   coupled reference solution
//!
//! Snapshots are not handled here: the persisted simulation state is
//! engine-owned and written through
//! [`SolverEngine::save_snapshot`](crate::engine::SolverEngine::save_snapshot);
//! the scheduler only dictates when it happens and what the file is called.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cht_rs::coupling::StepHistory;
//! use cht_rs::output::export::export_history_csv;
//!
//! let history = StepHistory::new();
//! // register history.clone() with the scheduler, run, then:
//! export_history_csv(&history.rows(), "run.csv", None)?;
//! ```

pub mod export;

// Re-export commonly used items for convenience
pub use export::{export_history_csv, CsvConfig, CsvMetadata};
