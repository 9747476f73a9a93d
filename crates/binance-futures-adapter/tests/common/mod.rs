/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-futures-adapter tests

use binance_futures_adapter::{BinanceClient, ClientConfig, Credentials, RequestSigner};
use secrecy::SecretString;
use wiremock::{Match, MockServer, Request};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server with test credentials
pub fn signed_client(server: &MockServer) -> BinanceClient {
    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    BinanceClient::with_config(config)
        .expect("client should build")
        .with_credentials(Credentials::new(TEST_API_KEY, TEST_API_SECRET))
}

/// Matches requests whose `signature` is the HMAC of everything before it
pub struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let Some(query) = request.url.query() else {
            return false;
        };
        let Some((unsigned, signature)) = query.rsplit_once("&signature=") else {
            return false;
        };
        let signer = RequestSigner::new(SecretString::from(TEST_API_SECRET));
        signer.sign(unsigned) == signature
    }
}

/// Exchange acknowledgement for a filled market order
pub fn filled_market_ack() -> serde_json::Value {
    serde_json::json!({
        "orderId": 4055934811i64,
        "symbol": "BTCUSDT",
        "status": "FILLED",
        "clientOrderId": "web_abc123",
        "price": "0.00",
        "avgPrice": "43250.50",
        "origQty": "0.010",
        "executedQty": "0.010",
        "cumQuote": "432.50500",
        "timeInForce": "GTC",
        "type": "MARKET",
        "reduceOnly": false,
        "side": "BUY",
        "positionSide": "BOTH",
        "updateTime": 1700000000123i64
    })
}
