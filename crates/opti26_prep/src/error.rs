use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Worksheet '{0}' not found")]
    MissingSheet(String),

    #[error("Column '{column}' not found in worksheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Invalid value '{value}' in worksheet '{sheet}' row {row} column '{column}', expected {expected}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("Worksheet 'employees' has no complete row, cannot derive the office location")]
    EmptyRoster,

    #[error("Failed to serialize optimizer input: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
