use super::{describe_error, ui};
use crate::core::config::AppConfig;
use crate::core::rates::{BTC, ETH};
use crate::core::{AllocationCalculator, PurchaseResult};
use anyhow::{Result, anyhow};
use comfy_table::Cell;

/// Flags of the `purchase` command. Unset values come from the config.
#[derive(Debug, Clone, Default)]
pub struct PurchaseArgs {
    pub amount: f64,
    pub btc_ratio: Option<String>,
    pub eth_ratio: Option<String>,
    pub currency: Option<String>,
}

pub async fn run(config: &AppConfig, args: &PurchaseArgs) -> Result<()> {
    let btc_ratio = args.btc_ratio.as_deref().unwrap_or(&config.btc_ratio);
    let eth_ratio = args.eth_ratio.as_deref().unwrap_or(&config.eth_ratio);
    let currency = args.currency.as_deref().unwrap_or(&config.currency);

    let mut calculator = AllocationCalculator::with_base_url(
        btc_ratio,
        eth_ratio,
        currency,
        &config.providers.coinbase.base_url,
    )
    .map_err(|e| anyhow!(describe_error(&e)))?;

    let pb = ui::new_spinner("Fetching exchange rates...");
    let result = calculator.determine_allocation(args.amount).await;
    pb.finish_and_clear();

    let purchase = result.map_err(|e| anyhow!(describe_error(&e)))?;
    println!("{}", display_purchase(args.amount, &calculator, &purchase));
    Ok(())
}

pub fn display_purchase(
    amount: f64,
    calculator: &AllocationCalculator,
    purchase: &PurchaseResult,
) -> String {
    let currency = calculator.currency();
    let rates = calculator.rate_fetcher().last_rates();
    let rate_of = |symbol: &str| {
        rates
            .and_then(|r| r.raw_rate(symbol))
            .unwrap_or_else(|| "N/A".to_string())
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Ratio"),
        ui::header_cell(&format!("Spend ({currency})")),
        ui::header_cell(&format!("Rate (per {currency})")),
        ui::header_cell("Quantity"),
    ]);

    for (symbol, ratio, quantity) in [
        (BTC, calculator.btc_ratio(), purchase.btc),
        (ETH, calculator.eth_ratio(), purchase.eth),
    ] {
        table.add_row(vec![
            Cell::new(symbol),
            ui::number_cell(format!("{:.2}%", ratio * 100.0)),
            ui::number_cell(format!("{:.2}", amount * ratio)),
            ui::number_cell(rate_of(symbol)),
            ui::quantity_cell(quantity),
        ]);
    }

    let mut output = format!(
        "Purchase: {}\n\n",
        ui::style_text(&format!("{amount} {currency}"), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());

    if let Some(fetched_at) = calculator.rate_fetcher().last_fetch_timestamp() {
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Rates fetched at:", ui::StyleType::TotalLabel),
            ui::style_text(&fetched_at.to_rfc3339(), ui::StyleType::Subtle)
        ));
    }

    output
}
