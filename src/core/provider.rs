//! Source of published rate tables

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::Result;
use super::rates::{RawRateRow, TaxCode};

#[async_trait]
pub trait RateTableProvider: Send + Sync {
    /// Fetches the table published for `anchor` and returns its rows in page order.
    async fn fetch_table(&self, anchor: NaiveDate, tax: TaxCode) -> Result<Vec<RawRateRow>>;
}
