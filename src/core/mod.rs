//! Core business logic abstractions

pub mod anchor;
pub mod config;
pub mod dataset;
pub mod error;
pub mod log;
pub mod provider;
pub mod rates;

// Re-export main types for cleaner imports
pub use dataset::{CombinedRow, MonthMean};
pub use error::{RateError, Result};
pub use provider::RateTableProvider;
pub use rates::{RateRow, RawRateRow, TaxCode};
