use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds surfaced by the data layer
// ---------------------------------------------------------------------------

/// Failures of the data layer. Loading either succeeds completely or yields
/// one of the first two variants; filtering only fails on inverted bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Source file missing, unreadable, or malformed.
    #[error("cannot read data source {}: {message}", .path.display())]
    DataSource { path: PathBuf, message: String },

    /// A categorical column is absent or holds non-text values.
    #[error("schema error in column '{column}': {message}")]
    Schema { column: String, message: String },

    /// Lower bound above upper bound (or a NaN bound).
    #[error("invalid range for {field}: low {low} > high {high}")]
    InvalidRange { field: String, low: f64, high: f64 },
}

pub type DataResult<T> = std::result::Result<T, DataError>;

impl DataError {
    pub fn data_source(path: &Path, err: &anyhow::Error) -> Self {
        DataError::DataSource {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        }
    }

    pub fn schema(column: &str, message: impl Into<String>) -> Self {
        DataError::Schema {
            column: column.to_string(),
            message: message.into(),
        }
    }

    /// Convert an internal loader failure, keeping schema errors intact.
    pub(crate) fn from_load(path: &Path, err: anyhow::Error) -> Self {
        match err.downcast_ref::<DataError>() {
            Some(DataError::DataSource { .. }) | None => Self::data_source(path, &err),
            Some(inner) => inner.clone(),
        }
    }
}
