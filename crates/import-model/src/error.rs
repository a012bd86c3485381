use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("row {row} is missing column '{column}'")]
    MissingColumn { row: usize, column: String },
    #[error("row {row} has unexpected column '{column}'")]
    UnexpectedColumn { row: usize, column: String },
    #[error("row {row} is out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
