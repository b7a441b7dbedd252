//! Runs the full fetch → parse → merge pipeline for one reference month.

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::core::anchor::{max_month, retroactive_date};
use crate::core::dataset::{align, filter_to_horizon, month_means};
use crate::core::rates::transform;
use crate::core::{CombinedRow, MonthMean, RateRow, RateTableProvider, Result, TaxCode};

/// Both currency series for one anchor, fetched concurrently.
pub async fn build_rate_rows(
    provider: &dyn RateTableProvider,
    anchor: NaiveDate,
) -> Result<(Vec<RateRow>, Vec<RateRow>)> {
    let (usd_raw, eur_raw) = futures::try_join!(
        provider.fetch_table(anchor, TaxCode::Ptx),
        provider.fetch_table(anchor, TaxCode::Eur),
    )?;
    debug!(usd = usd_raw.len(), eur = eur_raw.len(), "Fetched rate tables");

    Ok((transform(&usd_raw, anchor)?, transform(&eur_raw, anchor)?))
}

/// One currency's full series for the current reference month.
#[instrument(skip(provider))]
pub async fn build_series(
    provider: &dyn RateTableProvider,
    today: NaiveDate,
    tax: TaxCode,
) -> Result<Vec<RateRow>> {
    let anchor = retroactive_date(today);
    let raw = provider.fetch_table(anchor, tax).await?;
    transform(&raw, anchor)
}

#[instrument(skip(provider))]
pub async fn build_dataset(
    provider: &dyn RateTableProvider,
    today: NaiveDate,
    horizon_months: u32,
) -> Result<Vec<CombinedRow>> {
    let anchor = retroactive_date(today);
    let max_month = max_month(anchor, horizon_months);

    let (usd, eur) = build_rate_rows(provider, anchor).await?;
    let rows = filter_to_horizon(align(&usd, &eur)?, &max_month);

    info!(%anchor, %max_month, rows = rows.len(), "Built rate dataset");
    Ok(rows)
}

#[instrument(skip(provider))]
pub async fn build_month_means(
    provider: &dyn RateTableProvider,
    today: NaiveDate,
    horizon_months: u32,
) -> Result<Vec<MonthMean>> {
    let anchor = retroactive_date(today);
    let max_month = max_month(anchor, horizon_months);

    let (usd, eur) = build_rate_rows(provider, anchor).await?;
    month_means(&usd, &eur, &max_month)
}
