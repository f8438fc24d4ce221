use super::describe_error;
use crate::core::AllocationCalculator;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::debug;

/// One sample purchase request.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub amount: f64,
    pub btc_ratio: &'static str,
    pub eth_ratio: &'static str,
    pub currency: &'static str,
}

const fn scenario(
    amount: f64,
    btc_ratio: &'static str,
    eth_ratio: &'static str,
    currency: &'static str,
) -> Scenario {
    Scenario {
        amount,
        btc_ratio,
        eth_ratio,
        currency,
    }
}

pub const SCENARIOS: [Scenario; 10] = [
    // 70/30 split in USD
    scenario(10_000.0, "0.7", "0.3", "USD"),
    scenario(-1.0, "0.7", "0.3", "USD"),
    scenario(10_000.0, "Pancakes", "Waffles", "USD"),
    scenario(10_000.0, "-0.1", "-0.9", "USD"),
    scenario(10_000.0, "0.7", "0.3", "JPY"),
    scenario(10_000.0, "0.7", "0.3", "BAD"),
    scenario(10_000.0, "0.51", "0.49", "USD"),
    // Leaves 55% of the funds unused
    scenario(10_000.0, "0.2", "0.25", "USD"),
    scenario(10_000.0, "0.99", "0.99", "USD"),
    scenario(0.0, "0.7", "0.3", "USD"),
];

pub async fn run(config: &AppConfig) -> Result<()> {
    for line in run_scenarios(&SCENARIOS, &config.providers.coinbase.base_url).await {
        println!("{line}\n");
    }
    Ok(())
}

/// Runs every scenario and returns one numbered report line each. A failing
/// scenario is reported in its line and does not stop the others.
pub async fn run_scenarios(scenarios: &[Scenario], base_url: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(scenarios.len());
    for (idx, scenario) in scenarios.iter().enumerate() {
        debug!(?scenario, "Running scenario {}", idx + 1);
        let report = match run_scenario(scenario, base_url).await {
            Ok(report) => report,
            Err(e) => describe_error(&e),
        };
        lines.push(format!("{}) {report}", idx + 1));
    }
    lines
}

async fn run_scenario(scenario: &Scenario, base_url: &str) -> crate::core::Result<String> {
    let mut calculator = AllocationCalculator::with_base_url(
        scenario.btc_ratio,
        scenario.eth_ratio,
        scenario.currency,
        base_url,
    )?;
    let purchase = calculator.determine_allocation(scenario.amount).await?;

    Ok(format!(
        "For {} {} and a BTC/ETH split of {:?}/{:?}, purchase BTC: {:?} & ETH: {:?}",
        scenario.amount,
        calculator.currency(),
        calculator.btc_ratio(),
        calculator.eth_ratio(),
        purchase.btc,
        purchase.eth
    ))
}
