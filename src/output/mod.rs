//! Output module for persisting and summarizing the dataset
//!
//! This module handles:
//! - Committing the collected items to the CSV dataset atomically
//! - Loading a committed dataset back with defensive coercion
//! - Computing and printing dataset statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{load_dataset, CsvDatasetWriter};
pub use stats::{print_statistics, DatasetStatistics};
pub use traits::{DatasetWriter, OutputError, OutputResult, WriteOutcome};
