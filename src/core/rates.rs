//! Rate rows and the conversion from scraped cells to typed rows.

use chrono::{Days, NaiveDate};
use std::fmt::Display;
use std::str::FromStr;

use super::anchor::month_year;
use super::error::{RateError, Result};

/// Currency pairs published by the reference-rate page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxCode {
    /// USD/BRL
    Ptx,
    /// EUR/BRL
    Eur,
}

impl TaxCode {
    /// Value of the `slcTaxa` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCode::Ptx => "PTX",
            TaxCode::Eur => "EUR",
        }
    }

    /// Output column holding this pair's rate.
    pub fn column(&self) -> &'static str {
        match self {
            TaxCode::Ptx => "usd_brl",
            TaxCode::Eur => "eur_brl",
        }
    }
}

impl Display for TaxCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaxCode {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PTX" => Ok(TaxCode::Ptx),
            "EUR" => Ok(TaxCode::Eur),
            other => Err(RateError::InvalidTaxCode(other.to_string())),
        }
    }
}

/// One scraped table row before conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRateRow {
    pub day_offset: u32,
    pub raw_rate: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub days: u32,
    pub rate: f64,
    pub date_retroactive: String,
    pub month_year_reference: String,
    pub date_step: NaiveDate,
    pub month_year: String,
}

/// Parses a pt-BR formatted rate such as `R$ 5.123,45`.
pub fn parse_locale_rate(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix("R$").unwrap_or(trimmed);
    let normalized = unsigned.replace('.', "").replace(',', ".");

    normalized
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RateError::NumericFormat(raw.to_string()))
}

/// Fails when the offset moves the date past chrono's calendar range, which
/// only a corrupted page can produce.
pub fn derive_row(day_offset: u32, rate: f64, anchor: NaiveDate) -> Result<RateRow> {
    let date_step = anchor
        .checked_add_days(Days::new(u64::from(day_offset)))
        .ok_or_else(|| {
            RateError::MalformedTable(format!("day offset {day_offset} is out of range"))
        })?;
    Ok(RateRow {
        days: day_offset,
        rate,
        date_retroactive: anchor.format("%Y-%m-%d").to_string(),
        month_year_reference: month_year(anchor),
        date_step,
        month_year: month_year(date_step),
    })
}

/// Converts a whole scraped table, failing on the first unparsable rate.
pub fn transform(rows: &[RawRateRow], anchor: NaiveDate) -> Result<Vec<RateRow>> {
    rows.iter()
        .map(|row| derive_row(row.day_offset, parse_locale_rate(&row.raw_rate)?, anchor))
        .collect()
}
