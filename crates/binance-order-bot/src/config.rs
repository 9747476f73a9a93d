/*
[INPUT]:  Optional YAML file, BINANCE_* environment variables (.env included)
[OUTPUT]: BotConfig with client settings and credentials
[POS]:    Configuration layer - connection and credential setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use binance_futures_adapter::http::client::TESTNET_BASE_URL;
use binance_futures_adapter::{ClientConfig, Credentials};
use config::{Config, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `BINANCE_API_KEY`
pub const ENV_PREFIX: &str = "BINANCE";

/// Runtime configuration for the order bot
#[derive(Debug)]
pub struct BotConfig {
    /// REST base URL (testnet by default)
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<SecretString>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Optional `recvWindow` in milliseconds
    pub recv_window: Option<u64>,
}

/// Shape on disk / in the environment, before the secret is wrapped
#[derive(Debug, Deserialize)]
struct RawBotConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_secret: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    connect_timeout_secs: u64,
    #[serde(default)]
    recv_window: Option<u64>,
}

fn default_base_url() -> String {
    TESTNET_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl BotConfig {
    /// Load configuration: defaults, then the YAML file (if given), then
    /// `BINANCE_*` environment variables.
    ///
    /// Environment values stay strings until deserialized, so numeric-looking
    /// keys and secrets keep their exact text.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
        }
        let raw: RawBotConfig = builder
            .add_source(env)
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        Ok(raw.into())
    }

    /// Both halves of the key pair, if configured and non-empty
    pub fn credentials(&self) -> Option<Credentials> {
        let api_key = self.api_key.as_ref()?;
        let api_secret = self.api_secret.as_ref()?;
        Some(Credentials {
            api_key: api_key.clone(),
            api_secret: SecretString::from(api_secret.expose_secret().to_owned()),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            recv_window: self.recv_window,
        }
    }
}

impl From<RawBotConfig> for BotConfig {
    fn from(raw: RawBotConfig) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            base_url: raw.base_url,
            api_key: non_empty(raw.api_key),
            api_secret: non_empty(raw.api_secret).map(SecretString::from),
            timeout_secs: raw.timeout_secs,
            connect_timeout_secs: raw.connect_timeout_secs,
            recv_window: raw.recv_window,
        }
    }
}
