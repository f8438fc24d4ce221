use super::{describe_error, ui};
use crate::core::ExchangeRates;
use crate::core::config::AppConfig;
use crate::core::rates::{BTC, ETH};
use crate::providers::coinbase::RateFetcher;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use comfy_table::Cell;

pub async fn run(config: &AppConfig, currency: Option<&str>) -> Result<()> {
    let currency = currency.unwrap_or(&config.currency);
    let mut fetcher = RateFetcher::new(&config.providers.coinbase.base_url);

    let pb = ui::new_spinner(&format!("Fetching exchange rates for {currency}..."));
    let result = fetcher.fetch_rates_for(currency).await;
    pb.finish_and_clear();

    let rates = result.map_err(|e| anyhow!(describe_error(&e)))?;
    println!("{}", display_rates(currency, &rates, fetcher.last_fetch_timestamp()));
    Ok(())
}

pub fn display_rates(
    currency: &str,
    rates: &ExchangeRates,
    fetched_at: Option<DateTime<Utc>>,
) -> String {
    let currency = rates.currency().unwrap_or(currency);
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell(&format!("Rate (per {currency})")),
        ui::header_cell(&format!("Price ({currency})")),
    ]);

    for symbol in [BTC, ETH] {
        let row = match rates.rate(symbol) {
            Ok(rate) => {
                let price = if rate > 0.0 {
                    ui::number_cell(format!("{:.2}", 1.0 / rate))
                } else {
                    ui::number_cell("N/A".to_string())
                };
                vec![
                    Cell::new(symbol),
                    ui::number_cell(rates.raw_rate(symbol).unwrap_or_default()),
                    price,
                ]
            }
            Err(e) => vec![
                Cell::new(symbol),
                Cell::new(ui::style_text(&e.to_string(), ui::StyleType::Error)),
                ui::number_cell("N/A".to_string()),
            ],
        };
        table.add_row(row);
    }

    let mut output = format!(
        "Exchange rates: {}\n\n",
        ui::style_text(currency, ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    if let Some(fetched_at) = fetched_at {
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Fetched at:", ui::StyleType::TotalLabel),
            ui::style_text(&fetched_at.to_rfc3339(), ui::StyleType::Subtle)
        ));
    }

    output
}
