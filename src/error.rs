use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Invalid value for {field}: {value} (must be a non-negative number)")]
    InvalidNumeric { field: &'static str, value: Decimal },
    #[error("Tax rate {0}% is not configured")]
    UnsupportedTaxRate(Decimal),
    #[error("{reason}: {number:?} (series prefix {prefix:?})")]
    Format {
        number: String,
        prefix: String,
        reason: &'static str,
    },
    #[error("Sequence {series} moved: expected last {expected:?}, found {found:?}")]
    SequenceConflict {
        series: String,
        expected: Option<String>,
        found: Option<String>,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
