use arrow_schema::{ArrowError, DataType};
use thiserror::Error;

/// Failures raised while loading an edge table.
#[derive(Debug, Error)]
pub enum EdgeTableProviderError {
    #[error("column `{column}` not found in input schema")]
    ColumnNotFound { column: String },
    #[error("endpoint column `{column}` must hold strings or integers but found {actual:?}")]
    InvalidEndpointType { column: String, actual: DataType },
    #[error("weight column `{column}` must hold numbers but found {actual:?}")]
    InvalidWeightType { column: String, actual: DataType },
    #[error("column `{column}` is null at row {row}")]
    NullValue { column: String, row: usize },
    #[error("input has no header row")]
    MissingHeader,
    #[error("line {line} has no value for column `{column}`")]
    MissingField { line: usize, column: String },
    #[error("line {line} has weight `{raw}` which is not a number")]
    InvalidWeight { line: usize, raw: String },
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
