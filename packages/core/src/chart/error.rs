//! Chart Builder Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Encoding names a column the frame does not have
    #[error("Column not found in data: {column}")]
    UnknownColumn { column: String },

    /// Spec could not be serialized
    #[error("Chart serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
