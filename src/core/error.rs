//! Failure kinds of the rate pipeline. None of them are retried; each one
//! aborts the current request.

#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Invalid tax code: {0}")]
    InvalidTaxCode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed rate table: {0}")]
    MalformedTable(String),

    #[error("Numeric format error: cannot parse '{0}' as a rate")]
    NumericFormat(String),

    #[error("Series length mismatch: {usd} USD rows but {eur} EUR rows")]
    SeriesLengthMismatch { usd: usize, eur: usize },
}

pub type Result<T> = std::result::Result<T, RateError>;
