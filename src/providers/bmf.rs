use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, instrument};

use super::table::extract_rows;
use crate::core::{RateTableProvider, RawRateRow, Result, TaxCode};

const ENDPOINT: &str = "/pages/portal/bmfbovespa/lumis/lum-taxas-referenciais-bmf-ptBR.asp";
const USER_AGENT: &str = concat!("brlfx/", env!("CARGO_PKG_VERSION"));

/// Reads the BM&F "taxas referenciais" pages.
pub struct BmfProvider {
    base_url: String,
    client: reqwest::Client,
}

impl BmfProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(BmfProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!(status = %response.status(), "Received rate page");
        let body = response.bytes().await?;
        Ok(decode_latin1(&body))
    }
}

pub fn build_url(base_url: &str, anchor: NaiveDate, tax: TaxCode) -> String {
    format!(
        "{}{}?Data={}&Data1={}&slcTaxa={}",
        base_url,
        ENDPOINT,
        anchor.format("%d/%m/%Y"),
        anchor.format("%Y%m%d"),
        tax.as_str()
    )
}

/// The portal serves ISO-8859-1, where every byte is the code point of the
/// same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Collapses whitespace runs to one space and drops the spaces left between
/// tags, so pretty-printing never shows up as text nodes.
pub fn normalize_markup(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("> <", "><")
}

#[async_trait]
impl RateTableProvider for BmfProvider {
    #[instrument(skip(self))]
    async fn fetch_table(&self, anchor: NaiveDate, tax: TaxCode) -> Result<Vec<RawRateRow>> {
        let url = build_url(&self.base_url, anchor, tax);
        debug!("Requesting rate table from {}", url);

        let page = self.fetch(&url).await?;
        let rows = extract_rows(&normalize_markup(&page))?;
        debug!(rows = rows.len(), "Extracted rate table");
        Ok(rows)
    }
}
