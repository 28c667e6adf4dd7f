//! CSV dataset persistence
//!
//! The dataset is a header row `title,price,availability,rating,category`
//! followed by one row per item. Writes go to a temporary file next to the
//! destination and are renamed into place only after a complete flush, so a
//! failed run never leaves a half-written dataset behind.

use crate::output::traits::{DatasetWriter, OutputError, OutputResult, WriteOutcome};
use crate::record::{coerce_price_field, coerce_rating_field, ItemRecord};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes the dataset as CSV to a fixed path
#[derive(Debug, Clone)]
pub struct CsvDatasetWriter {
    path: PathBuf,
}

impl CsvDatasetWriter {
    /// Creates a writer targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in
    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl DatasetWriter for CsvDatasetWriter {
    fn write(&self, items: &[ItemRecord]) -> OutputResult<WriteOutcome> {
        if items.is_empty() {
            tracing::warn!(
                "No items to save; leaving {} untouched",
                self.path.display()
            );
            return Ok(WriteOutcome::SkippedEmpty);
        }

        let dir = self.staging_dir();
        std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut staged = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(staged.as_file_mut());
            for item in items {
                writer.serialize(item)?;
            }
            writer.flush()?;
        }
        staged.as_file_mut().flush()?;
        staged.as_file().sync_all()?;

        staged
            .persist(&self.path)
            .map_err(|e| OutputError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        tracing::info!("Saved {} items to {}", items.len(), self.path.display());

        Ok(WriteOutcome::Written {
            rows: items.len(),
            path: self.path.clone(),
        })
    }
}

/// One dataset row as text, before coercion
#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    availability: String,
    #[serde(default)]
    rating: String,
    #[serde(default)]
    category: String,
}

impl DatasetRow {
    fn into_record(self) -> ItemRecord {
        let price = coerce_price_field(&self.price);
        let rating = coerce_rating_field(&self.rating);

        ItemRecord {
            title: self.title,
            price: price.value,
            availability: self.availability,
            rating: rating.value,
            category: self.category,
            price_defaulted: price.defaulted,
            rating_defaulted: rating.defaulted,
        }
    }
}

/// Loads a dataset written by [`CsvDatasetWriter`]
///
/// A missing file is an empty dataset. Price and rating columns are coerced
/// with the same fallbacks the crawler uses (`0.0`, `0`); rows that cannot be
/// decoded at all are skipped with a warning.
pub fn load_dataset(path: &Path) -> OutputResult<Vec<ItemRecord>> {
    if !path.exists() {
        tracing::warn!("Dataset not found: {}", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let mut items = Vec::new();
    for (index, row) in reader.deserialize::<DatasetRow>().enumerate() {
        match row {
            Ok(row) => items.push(row.into_record()),
            // +2: one for the header, one for 1-based line numbers
            Err(e) => tracing::warn!("Skipping dataset line {}: {}", index + 2, e),
        }
    }

    tracing::debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}
