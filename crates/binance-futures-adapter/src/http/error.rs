/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, configuration)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorBody;

/// Exchange error codes that mean the key, secret or signature was refused
const AUTH_ERROR_CODES: [i64; 3] = [
    -1022, // signature for this request is not valid
    -2014, // API-key format invalid
    -2015, // invalid API-key, IP, or permissions for action
];

/// Main error type for the Binance adapter
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Exchange rejected the request
    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// Credentials missing or refused by the exchange
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Request parameter could not be encoded or parsed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BinanceError {
    /// Credentials were missing or refused
    pub fn is_auth_error(&self) -> bool {
        matches!(self, BinanceError::Authentication { .. })
    }

    /// The exchange could not be reached or did not answer in time
    pub fn is_network_error(&self) -> bool {
        match self {
            BinanceError::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            _ => false,
        }
    }

    /// The exchange answered and refused the order (margin, size, filters, ...)
    pub fn is_exchange_rejection(&self) -> bool {
        matches!(self, BinanceError::Api { .. })
    }

    /// Exchange-provided error code, if any
    pub fn api_code(&self) -> Option<i64> {
        match self {
            BinanceError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify a non-success HTTP response.
    ///
    /// The body is kept verbatim when it is not the usual `{code, msg}` shape.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let (code, message) = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => (parsed.code, parsed.msg),
            Err(_) => (i64::from(status.as_u16()), body.trim().to_string()),
        };

        let refused = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;
        if refused || AUTH_ERROR_CODES.contains(&code) {
            return BinanceError::Authentication {
                message: format!("{message} (status {}, code {code})", status.as_u16()),
            };
        }

        BinanceError::Api {
            status: status.as_u16(),
            code,
            message,
        }
    }
}

/// Result type alias for Binance operations
pub type Result<T> = std::result::Result<T, BinanceError>;
