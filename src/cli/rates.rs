use super::ui;
use crate::core::config::AppConfig;
use crate::core::{CombinedRow, MonthMean, RateRow, TaxCode};
use crate::pipeline;
use crate::providers::BmfProvider;
use anyhow::{Context, Result};
use comfy_table::Cell;

pub fn display_dataset(rows: &[CombinedRow]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Days"),
        ui::header_cell("USD/BRL"),
        ui::header_cell("EUR/BRL"),
        ui::header_cell("Month"),
    ]);

    for row in rows {
        table.add_row(vec![
            ui::number_cell(row.days),
            ui::rate_cell(row.usd_brl),
            ui::rate_cell(row.eur_brl),
            Cell::new(&row.month_year),
        ]);
    }

    let reference = rows
        .first()
        .map_or("N/A", |row| row.date_retroactive.as_str());
    format!(
        "Reference rates from {}\n\n{}",
        ui::style_text(reference, ui::StyleType::Title),
        table
    )
}

pub fn display_means(means: &[MonthMean]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Reference"),
        ui::header_cell("Month"),
        ui::header_cell("USD/BRL (avg)"),
        ui::header_cell("EUR/BRL (avg)"),
    ]);

    for mean in means {
        table.add_row(vec![
            Cell::new(&mean.month_year_reference),
            Cell::new(&mean.month_year),
            ui::rate_cell(mean.usd_brl),
            ui::rate_cell(mean.eur_brl),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Monthly average reference rates", ui::StyleType::Title),
        table
    )
}

/// Full series of one currency, including the dates each offset lands on.
pub fn display_series(tax: TaxCode, rows: &[RateRow]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Days"),
        ui::header_cell(tax.column()),
        ui::header_cell("Date"),
        ui::header_cell("Month"),
    ]);

    for row in rows {
        table.add_row(vec![
            ui::number_cell(row.days),
            ui::rate_cell(row.rate),
            Cell::new(row.date_step),
            Cell::new(&row.month_year),
        ]);
    }

    let reference = rows
        .first()
        .map_or("N/A", |row| row.month_year_reference.as_str());
    format!(
        "{} series for {}\n\n{}",
        tax,
        ui::style_text(reference, ui::StyleType::Title),
        table
    )
}

fn provider_from(config: &AppConfig) -> Result<BmfProvider> {
    BmfProvider::new(&config.provider.base_url, config.provider.timeout())
        .context("Failed to create HTTP client")
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn run_show(config: &AppConfig) -> Result<()> {
    let provider = provider_from(config)?;
    let spinner = ui::new_spinner("Fetching reference rates...");
    let result = pipeline::build_dataset(&provider, today(), config.horizon_months).await;
    spinner.finish_and_clear();

    let rows = result?;
    println!("{}", display_dataset(&rows));
    println!(
        "{}",
        ui::style_text(&format!("{} rows", rows.len()), ui::StyleType::Subtle)
    );
    Ok(())
}

pub async fn run_series(config: &AppConfig, tax: &str) -> Result<()> {
    let tax: TaxCode = tax.parse()?;
    let provider = provider_from(config)?;
    let spinner = ui::new_spinner("Fetching reference rates...");
    let result = pipeline::build_series(&provider, today(), tax).await;
    spinner.finish_and_clear();

    println!("{}", display_series(tax, &result?));
    Ok(())
}

pub async fn run_means(config: &AppConfig) -> Result<()> {
    let provider = provider_from(config)?;
    let spinner = ui::new_spinner("Fetching reference rates...");
    let result = pipeline::build_month_means(&provider, today(), config.horizon_months).await;
    spinner.finish_and_clear();

    println!("{}", display_means(&result?));
    Ok(())
}
