use thiserror::Error;

/// Which side of a canonical column order disagreed with the data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrderMismatch {
    #[error("present in the data but not in the canonical order")]
    UnlistedInOrder,
    #[error("listed in the canonical order but never seen in the data")]
    MissingFromData,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No samples found for metric '{metric}' with the recognized labels.")]
    EmptyInput { metric: String },
    #[error("Column '{label}' of metric '{metric}' is {direction}.")]
    UnknownColumnInCanonicalOrder {
        metric: String,
        label: String,
        direction: OrderMismatch,
    },
    #[error("Table shape mismatch: {columns} column names for {cells} cell columns.")]
    ShapeMismatch { columns: usize, cells: usize },
    #[error("Column '{column}' has {len} cells but the index has {rows} rows.")]
    ColumnLengthMismatch {
        column: String,
        len: usize,
        rows: usize,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
