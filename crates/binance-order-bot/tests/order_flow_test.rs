/*
[INPUT]:  Order flow driven against a mock exchange
[OUTPUT]: End-to-end results for validation, signing, and reporting
[POS]:    Integration test layer - full order flow verification
[UPDATE]: When adding new order flow scenarios
*/

use anyhow::Result;
use binance_futures_adapter::{BinanceClient, ClientConfig, Credentials};
use binance_order_bot::{
    ConfirmPrompt, FlowOptions, FlowOutcome, OrderManager, ResultStatus, ValidationError,
    validate_order,
};
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct AlwaysYes;

impl ConfirmPrompt for AlwaysYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

fn client_for(server: &MockServer) -> BinanceClient {
    let config = ClientConfig {
        base_url: server.uri(),
        recv_window: Some(5000),
        ..ClientConfig::default()
    };
    BinanceClient::with_config(config)
        .expect("client should build")
        .with_credentials(Credentials::new("flow-key", "flow-secret"))
}

async fn mount_account_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/fapi/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "canTrade": true,
            "availableBalance": "10000.00",
        })))
        .mount(server)
        .await;
}

fn flow_options() -> FlowOptions {
    FlowOptions {
        auto_confirm: false,
        verify_connection: true,
    }
}

#[tokio::test]
async fn test_limit_order_flow_against_exchange() {
    let server = MockServer::start().await;
    mount_account_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .and(header("X-MBX-APIKEY", "flow-key"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("side", "SELL"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("timeInForce", "GTC"))
        .and(query_param("price", "50000"))
        .and(query_param("quantity", "0.01"))
        .and(query_param("recvWindow", "5000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": 987654321i64,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "x-abc",
            "price": "50000.00",
            "avgPrice": "0.00",
            "origQty": "0.010",
            "executedQty": "0.000",
            "cumQuote": "0.00000",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "SELL",
            "updateTime": 1700000000000i64,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = validate_order("BTCUSDT", "sell", "limit", "0.01", Some("50000")).unwrap();
    let manager = OrderManager::new(client_for(&server));
    let mut out = Vec::new();

    let outcome = assert_ok!(
        manager
            .execute(&order, flow_options(), &mut AlwaysYes, &mut out)
            .await
    );

    let FlowOutcome::Completed(result) = outcome else {
        panic!("order should have been sent");
    };
    assert_eq!(result.status(), ResultStatus::Success);
    assert_eq!(result.order_id(), Some(987654321));

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("API connection successful"));
    assert!(printed.contains("Status: SUCCESS"));
    assert!(printed.contains("Limit Price: 50000.00"));
    assert!(printed.contains("Order Status: NEW"));
}

#[tokio::test]
async fn test_exchange_rejection_is_reported_not_raised() {
    let server = MockServer::start().await;
    mount_account_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -4164,
            "msg": "Order's notional must be no smaller than 100 (unless you choose reduce only).",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = validate_order("BTCUSDT", "BUY", "MARKET", "0.0001", None).unwrap();
    let manager = OrderManager::new(client_for(&server));
    let mut out = Vec::new();

    let outcome = assert_ok!(
        manager
            .execute(&order, flow_options(), &mut AlwaysYes, &mut out)
            .await
    );

    let FlowOutcome::Completed(result) = outcome else {
        panic!("order should have been sent");
    };
    assert_eq!(result.status(), ResultStatus::Failure);
    let error = result.raw_error().unwrap();
    assert!(error.contains("-4164"));
    assert!(error.contains("Order's notional must be no smaller than 100"));

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("Status: FAILED"));
}

#[tokio::test]
async fn test_failed_connection_check_stops_before_ordering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fapi/v1/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": -2014,
            "msg": "API-key format invalid.",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fapi/v1/order"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let order = validate_order("BTCUSDT", "BUY", "MARKET", "0.01", None).unwrap();
    let manager = OrderManager::new(client_for(&server));
    let mut out = Vec::new();

    let err = manager
        .execute(&order, flow_options(), &mut AlwaysYes, &mut out)
        .await
        .unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("could not connect"));
    assert!(chain.contains("API-key format invalid."));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = validate_order("BTCUSDT", "SELL", "LIMIT", "0.01", None).unwrap_err();
    assert_eq!(err, ValidationError::PriceRequired);
    assert!(err.to_string().contains("price required for LIMIT"));
}
