//! Calendar anchors for a reference month.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Default number of months the published curve is kept for.
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Returns the first business day (Mon-Fri) on or after the 1st of `today`'s month.
pub fn retroactive_date(today: NaiveDate) -> NaiveDate {
    let mut date = today - Days::new(u64::from(today.day0()));
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date = date + Days::new(1);
    }
    date
}

/// Upper bound accepted from configuration.
pub const MAX_HORIZON_MONTHS: u32 = 120;

/// Month string `horizon_months` after the anchor's month, used as an
/// inclusive upper bound on `month_year`. Saturates at the last
/// representable date.
pub fn max_month(anchor: NaiveDate, horizon_months: u32) -> String {
    let shifted = anchor
        .checked_add_months(Months::new(horizon_months))
        .unwrap_or(NaiveDate::MAX);
    month_year(shifted)
}

pub fn month_year(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
