//! Merging the USD and EUR series into the published dataset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{RateError, Result};
use super::rates::RateRow;

/// One row of the served dataset. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub days: u32,
    pub usd_brl: f64,
    pub eur_brl: f64,
    pub date_retroactive: String,
    pub month_year: String,
}

/// Average rates for one published month within one reference month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthMean {
    pub month_year_reference: String,
    pub month_year: String,
    pub usd_brl: f64,
    pub eur_brl: f64,
}

fn ensure_same_length(usd: &[RateRow], eur: &[RateRow]) -> Result<()> {
    if usd.len() != eur.len() {
        return Err(RateError::SeriesLengthMismatch {
            usd: usd.len(),
            eur: eur.len(),
        });
    }
    Ok(())
}

/// Pairs both series by position. Calendar fields come from the USD series.
pub fn align(usd: &[RateRow], eur: &[RateRow]) -> Result<Vec<CombinedRow>> {
    ensure_same_length(usd, eur)?;

    Ok(usd
        .iter()
        .zip(eur)
        .map(|(u, e)| CombinedRow {
            days: u.days,
            usd_brl: u.rate,
            eur_brl: e.rate,
            date_retroactive: u.date_retroactive.clone(),
            month_year: u.month_year.clone(),
        })
        .collect())
}

/// Keeps rows whose `month_year` is on or before `max_month`, in input order.
pub fn filter_to_horizon(rows: Vec<CombinedRow>, max_month: &str) -> Vec<CombinedRow> {
    rows.into_iter()
        .filter(|row| row.month_year.as_str() <= max_month)
        .collect()
}

/// Mean USD/BRL and EUR/BRL per (`month_year_reference`, `month_year`),
/// restricted to months on or before `max_month` and sorted by those keys.
pub fn month_means(usd: &[RateRow], eur: &[RateRow], max_month: &str) -> Result<Vec<MonthMean>> {
    ensure_same_length(usd, eur)?;

    let mut groups: BTreeMap<(&str, &str), (f64, f64, usize)> = BTreeMap::new();
    for (u, e) in usd.iter().zip(eur) {
        if u.month_year.as_str() > max_month {
            continue;
        }
        let entry = groups
            .entry((u.month_year_reference.as_str(), u.month_year.as_str()))
            .or_insert((0.0, 0.0, 0));
        entry.0 += u.rate;
        entry.1 += e.rate;
        entry.2 += 1;
    }

    Ok(groups
        .into_iter()
        .map(|((reference, month), (usd_sum, eur_sum, count))| MonthMean {
            month_year_reference: reference.to_string(),
            month_year: month.to_string(),
            usd_brl: usd_sum / count as f64,
            eur_brl: eur_sum / count as f64,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::derive_row;
    use chrono::NaiveDate;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn series(rates: &[(u32, f64)]) -> Vec<RateRow> {
        rates
            .iter()
            .map(|(days, rate)| derive_row(*days, *rate, anchor()).unwrap())
            .collect()
    }

    #[test]
    fn test_align_takes_rates_from_each_series() {
        let usd = series(&[(1, 5.0), (40, 5.1)]);
        let eur = series(&[(1, 5.4), (40, 5.5)]);

        let rows = align(&usd, &eur).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].usd_brl, 5.0);
        assert_eq!(rows[0].eur_brl, 5.4);
        assert_eq!(rows[1].days, 40);
        assert_eq!(rows[1].month_year, "2024-02");
        assert_eq!(rows[1].date_retroactive, "2024-01-02");
    }

    #[test]
    fn test_align_rejects_length_mismatch() {
        let usd = series(&[(1, 5.0), (2, 5.1)]);
        let eur = series(&[(1, 5.4)]);

        let err = align(&usd, &eur).unwrap_err();
        assert!(matches!(
            err,
            RateError::SeriesLengthMismatch { usd: 2, eur: 1 }
        ));
    }

    #[test]
    fn test_filter_to_horizon_is_stable_and_idempotent() {
        let usd = series(&[(1, 5.0), (400, 6.0), (30, 5.1), (370, 5.9), (200, 5.5)]);
        let rows = align(&usd, &usd).unwrap();

        let filtered = filter_to_horizon(rows, "2025-01");
        let days: Vec<u32> = filtered.iter().map(|r| r.days).collect();
        // day 370 lands on 2025-01-06, day 400 on 2025-02-05
        assert_eq!(days, vec![1, 30, 370, 200]);

        let again = filter_to_horizon(filtered.clone(), "2025-01");
        assert_eq!(again, filtered);
    }

    #[test]
    fn test_month_means_groups_by_month() {
        let usd = series(&[(1, 5.0), (2, 6.0), (35, 7.0), (500, 9.0)]);
        let eur = series(&[(1, 5.5), (2, 6.5), (35, 7.5), (500, 9.5)]);

        let means = month_means(&usd, &eur, "2025-01").unwrap();
        assert_eq!(
            means,
            vec![
                MonthMean {
                    month_year_reference: "2024-01".into(),
                    month_year: "2024-01".into(),
                    usd_brl: 5.5,
                    eur_brl: 6.0,
                },
                MonthMean {
                    month_year_reference: "2024-01".into(),
                    month_year: "2024-02".into(),
                    usd_brl: 7.0,
                    eur_brl: 7.5,
                },
            ]
        );
    }
}
