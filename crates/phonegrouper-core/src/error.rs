use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid number format: {digits} digit(s), expected at least {minimum}")]
    InvalidNumberFormat { digits: usize, minimum: usize },
    #[error("record has no phone numbers")]
    EmptyRecord,
    #[error("invalid minimum digit count: {0}")]
    InvalidMinimumDigitCount(i64),
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
    #[error("invalid suffix digits: {0}")]
    InvalidSuffixDigits(i64),
    #[error("invalid minimum group size: {0}")]
    InvalidMinGroupSize(i64),
    #[error("invalid parallel threshold: {0}")]
    InvalidParallelThreshold(i64),
}

impl CoreError {
    /// Configuration errors are fatal and surface before any record is processed.
    pub const fn is_configuration(&self) -> bool {
        !matches!(
            self,
            CoreError::InvalidNumberFormat { .. } | CoreError::EmptyRecord
        )
    }
}
