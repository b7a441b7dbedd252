//! Extraction of the day/rate columns from a reference-rate page.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::core::{RateError, RawRateRow, Result};

static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static td selector"));

const RATE_CLASS: &str = "text-right";

/// Day cells carry no class, rate cells carry `text-right`. Both columns are
/// collected in document order and paired by position.
pub fn extract_rows(markup: &str) -> Result<Vec<RawRateRow>> {
    let document = Html::parse_document(markup);

    let mut days = Vec::new();
    let mut rates = Vec::new();
    for cell in document.select(&CELL_SELECTOR) {
        let text = cell.text().collect::<String>();
        match cell.value().attr("class") {
            None => days.push(parse_day(&text)?),
            Some(class) if class.trim().is_empty() => days.push(parse_day(&text)?),
            Some(class) if class.split_whitespace().any(|c| c == RATE_CLASS) => {
                rates.push(text.trim().to_string())
            }
            Some(_) => {}
        }
    }

    if days.len() != rates.len() {
        return Err(RateError::MalformedTable(format!(
            "{} day cells but {} rate cells",
            days.len(),
            rates.len()
        )));
    }

    Ok(days
        .into_iter()
        .zip(rates)
        .map(|(day_offset, raw_rate)| RawRateRow {
            day_offset,
            raw_rate,
        })
        .collect())
}

fn parse_day(text: &str) -> Result<u32> {
    let text = text.trim();
    text.parse().map_err(|_| {
        RateError::MalformedTable(format!("day cell '{text}' is not an integer"))
    })
}
