/*
[INPUT]:  HTTP configuration (base URL, timeouts, recv window, credentials)
[OUTPUT]: Configured reqwest client ready for signed API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::{BinanceError, RequestSigner, Result};
use crate::types::requests::encode_params;

/// Base URL for the USDⓈ-M futures testnet
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Header carrying the API key on SIGNED and USER_DATA endpoints
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Milliseconds the exchange accepts the request after `timestamp`
    pub recv_window: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            recv_window: None,
        }
    }
}

/// Credentials for SIGNED requests
#[derive(Debug)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }
}

/// HTTP client for the futures REST API
#[derive(Debug)]
pub struct BinanceClient {
    http_client: Client,
    base_url: Url,
    recv_window: Option<u64>,
    credentials: Option<Credentials>,
    signer: Option<RequestSigner>,
}

impl BinanceClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: parse_base_url(&config.base_url)?,
            recv_window: config.recv_window,
            credentials: None,
            signer: None,
        })
    }

    /// Set credentials for SIGNED requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        let secret = SecretString::from(credentials.api_secret.expose_secret().to_owned());
        self.signer = Some(RequestSigner::new(secret));
        self.credentials = Some(credentials);
    }

    /// Builder-style variant of [`BinanceClient::set_credentials`]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a SIGNED request.
    ///
    /// Appends `recvWindow` (when configured) and `timestamp` to `params`,
    /// signs the encoded string and sends everything in the query.
    pub(crate) fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<RequestBuilder> {
        self.signed_request_at(method, endpoint, params, Utc::now().timestamp_millis())
    }

    pub(crate) fn signed_request_at(
        &self,
        method: Method,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        timestamp: i64,
    ) -> Result<RequestBuilder> {
        let (credentials, signer) = match (&self.credentials, &self.signer) {
            (Some(credentials), Some(signer)) => (credentials, signer),
            _ => {
                return Err(BinanceError::Authentication {
                    message: "API credentials not configured".to_string(),
                });
            }
        };

        if let Some(window) = self.recv_window {
            params.push(("recvWindow", window.to_string()));
        }
        params.push(("timestamp", timestamp.to_string()));

        let query = encode_params(params.iter().map(|(k, v)| (*k, v.as_str())));
        let mut url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        url.set_query(Some(&signer.signed_query(&query)));

        let api_key = HeaderValue::from_str(&credentials.api_key).map_err(|_| {
            BinanceError::Config("API key contains characters not allowed in a header".to_string())
        })?;

        debug!(%method, endpoint, "building signed request");
        Ok(self
            .http_client
            .request(method, url)
            .header(API_KEY_HEADER, api_key)
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            ))
    }

    /// Send a request and decode the JSON body.
    ///
    /// Non-2xx responses become [`BinanceError::Api`] or
    /// [`BinanceError::Authentication`] with the exchange text kept verbatim.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body = %body, "received response");

        if !status.is_success() {
            return Err(BinanceError::from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            BinanceError::InvalidResponse(format!("{err}; body: {body}"))
        })
    }
}

/// Parse `raw` so relative endpoints join under its path.
///
/// `http://proxy/binance` becomes `http://proxy/binance/`; without the
/// trailing slash `Url::join` would replace the last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
