use cryptosplit::AppCommand;
use cryptosplit::cli::purchase::{PurchaseArgs, display_purchase};
use cryptosplit::cli::rates::display_rates;
use cryptosplit::core::AllocationCalculator;
use cryptosplit::providers::coinbase::RateFetcher;
use std::fs;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const INVALID_CURRENCY: &str =
        r#"{"errors":[{"id":"invalid_request","message":"Currency is invalid"}]}"#;

    /// A server answering exactly one rate request for `currency`. The
    /// expectation is verified when the server is dropped.
    pub async fn create_mock_server(currency: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/exchange-rates"))
            .and(query_param("currency", currency))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;
        mock_server
    }

    pub async fn mount(mock_server: &MockServer, currency: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/v2/exchange-rates"))
            .and(query_param("currency", currency))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub fn rates_body(currency: &str, btc: &str, eth: &str) -> String {
        format!(r#"{{"data":{{"currency":"{currency}","rates":{{"BTC":"{btc}","ETH":"{eth}"}}}}}}"#)
    }

    pub fn write_config(base_url: &str, extra: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
providers:
  coinbase:
    base_url: "{base_url}"
{extra}
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn purchase(amount: f64) -> AppCommand {
    AppCommand::Purchase(PurchaseArgs {
        amount,
        ..Default::default()
    })
}

#[test_log::test(tokio::test)]
async fn test_purchase_flow_with_mock() {
    let body = test_utils::rates_body("USD", "0.7777777777777", "1.5000000000000");
    let mock_server = test_utils::create_mock_server("USD", 200, &body).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "currency: \"USD\"");

    let result =
        cryptosplit::run_command(purchase(10_000.0), config_file.path().to_str()).await;
    assert!(
        result.is_ok(),
        "Purchase command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_purchase_flags_override_config() {
    let body = test_utils::rates_body("EUR", "0.333333333333333", "2.5000000");
    let mock_server = test_utils::create_mock_server("EUR", 200, &body).await;
    let config_file = test_utils::write_config(
        &mock_server.uri(),
        "currency: \"USD\"\nbtc_ratio: \"0.2\"\neth_ratio: \"0.25\"",
    );

    let command = AppCommand::Purchase(PurchaseArgs {
        amount: 10_000.0,
        btc_ratio: Some("0.51".to_string()),
        eth_ratio: Some("0.49".to_string()),
        currency: Some("EUR".to_string()),
    });
    let result = cryptosplit::run_command(command, config_file.path().to_str()).await;
    assert!(result.is_ok(), "Purchase failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_purchase_quantities_with_mock() {
    let body = test_utils::rates_body("USD", "0.7777777777777", "1.5000000000000");
    let mock_server = test_utils::create_mock_server("USD", 200, &body).await;

    let mut calculator =
        AllocationCalculator::with_base_url("0.7", "0.3", "USD", &mock_server.uri())
            .expect("Valid ratios");
    let purchase = calculator
        .determine_allocation(10_000.0)
        .await
        .expect("Purchase should succeed");

    assert_eq!(purchase.btc, 10_000.0 * 0.7 * 0.7777777777777);
    assert_eq!(purchase.eth, 10_000.0 * 0.3 * 1.5);

    let output = console::strip_ansi_codes(&display_purchase(10_000.0, &calculator, &purchase))
        .to_string();
    assert!(output.contains("Purchase: 10000 USD"));
    assert!(output.contains("7000.00"));
    assert!(output.contains("3000.00"));
    assert!(output.contains("0.7777777777777"));
    assert!(output.contains("4500.00000000"));
}

#[test_log::test(tokio::test)]
async fn test_purchase_with_negative_amount() {
    let mock_server = wiremock::MockServer::start().await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = cryptosplit::run_command(purchase(-1.0), config_file.path().to_str()).await;

    let err = result.expect_err("Negative amount should be rejected");
    assert_eq!(err.to_string(), "Bad Input: Amount cannot be less than 0.");
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "No request expected, got {requests:?}");
}

#[test_log::test(tokio::test)]
async fn test_purchase_with_invalid_ratios_in_config() {
    let mock_server = wiremock::MockServer::start().await;
    let config_file = test_utils::write_config(
        &mock_server.uri(),
        "btc_ratio: \"0.99\"\neth_ratio: \"0.99\"",
    );

    let result = cryptosplit::run_command(purchase(100.0), config_file.path().to_str()).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "btc_ratio: 0.99 + eth_ratio: 0.99 does not equal 1"
    );
}

#[test_log::test(tokio::test)]
async fn test_purchase_with_rejected_currency() {
    let mock_server =
        test_utils::create_mock_server("BAD", 400, test_utils::INVALID_CURRENCY).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "currency: \"BAD\"");

    let result = cryptosplit::run_command(purchase(100.0), config_file.path().to_str()).await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "invalid_request was triggered, Currency is invalid."
    );
}

#[test_log::test(tokio::test)]
async fn test_rates_flow_with_mock() {
    let body = test_utils::rates_body("JPY", "0.0000001", "0.000003");
    let mock_server = test_utils::create_mock_server("JPY", 200, &body).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let command = AppCommand::Rates {
        currency: Some("JPY".to_string()),
    };
    let result = cryptosplit::run_command(command, config_file.path().to_str()).await;
    assert!(result.is_ok(), "Rates failed with: {:?}", result.err());

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("currency=JPY"));
}

#[test_log::test(tokio::test)]
async fn test_rates_table_with_mock() {
    let body = test_utils::rates_body("EUR", "0.00002", "0.0005");
    let mock_server = test_utils::create_mock_server("EUR", 200, &body).await;

    let mut fetcher = RateFetcher::new(&mock_server.uri());
    let rates = fetcher.fetch_rates_for("EUR").await.expect("Fetch should succeed");
    let output =
        console::strip_ansi_codes(&display_rates("EUR", &rates, fetcher.last_fetch_timestamp()))
            .to_string();

    assert!(output.contains("Exchange rates: EUR"));
    assert!(output.contains("Rate (per EUR)"));
    assert!(output.contains("50000.00"));
    assert!(output.contains("2000.00"));
    assert!(output.contains("Fetched at:"));
}

#[test_log::test(tokio::test)]
async fn test_demo_flow_continues_past_failures() {
    let mock_server = wiremock::MockServer::start().await;
    for currency in ["USD", "JPY"] {
        let body = test_utils::rates_body(currency, "0.5", "2");
        test_utils::mount(&mock_server, currency, 200, &body).await;
    }
    test_utils::mount(&mock_server, "BAD", 400, test_utils::INVALID_CURRENCY).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = cryptosplit::run_command(AppCommand::Demo, config_file.path().to_str()).await;
    assert!(result.is_ok(), "Demo failed with: {:?}", result.err());

    // Scenarios 1, 5, 6, 7 and 10 reach the rate service
    let requests = mock_server.received_requests().await.unwrap_or_default();
    info!(count = requests.len(), "Demo requests");
    assert_eq!(requests.len(), 5);
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("missing.yaml");

    let result = cryptosplit::run_command(AppCommand::Demo, config_path.to_str()).await;

    let err = result.expect_err("Missing config should fail");
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test_log::test(tokio::test)]
async fn test_malformed_config_file() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), "providers: [not, a, map]").expect("Failed to write config");

    let result = cryptosplit::run_command(AppCommand::Demo, config_file.path().to_str()).await;

    let err = result.expect_err("Malformed config should fail");
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_setup_writes_loadable_config() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.yaml");

    cryptosplit::cli::setup::setup_at_path(&config_path).expect("Setup failed");
    let config = cryptosplit::core::config::AppConfig::load_from_path(&config_path)
        .expect("Generated config should load");

    assert_eq!(config.currency, "USD");
    assert_eq!(config.btc_ratio, "0.7");
    assert_eq!(config.eth_ratio, "0.3");
}
