use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // Zero reference prices, zero standard deviations and logs of non-positive values.
    #[error("Arithmetic domain error: {0}")]
    ArithmeticDomainError(String),

    #[error("Shape mismatch: {operation} needs at least {required} observations, got {actual}")]
    ShapeMismatch {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    // Series construction errors raised by the shared models.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    pub(crate) fn shape(operation: &'static str, required: usize, actual: usize) -> Self {
        EngineError::ShapeMismatch {
            operation,
            required,
            actual,
        }
    }
}

/// Rejects a zero window/stride before any computation starts.
pub(crate) fn ensure_positive(name: &str, value: usize) -> Result<(), EngineError> {
    if value == 0 {
        return Err(EngineError::InvalidParameter(format!("{} must be greater than 0", name)));
    }
    Ok(())
}
