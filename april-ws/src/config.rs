//! Client configuration

use std::time::Duration;

use soap_client::{service_endpoint, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use thiserror::Error;

/// WSDL of the April International demo platform
pub const DEMO_WSDL_URL: &str =
    "http://demo.aprilvoyage.com/webservice/services/CoreWebService2?wsdl";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
}

/// Where and how to reach the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WSDL or service URL; a `?wsdl` query is stripped before posting
    pub wsdl_url: String,
    /// Target namespace of the RPC operations; defaults to the service URL
    pub namespace: Option<String>,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wsdl_url: DEMO_WSDL_URL.to_string(),
            namespace: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(wsdl_url: impl Into<String>) -> Self {
        Self {
            wsdl_url: wsdl_url.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// Service address requests are posted to
    pub fn endpoint(&self) -> &str {
        service_endpoint(&self.wsdl_url)
    }

    /// Effective target namespace
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or_else(|| self.endpoint())
    }

    /// Defaults overridden by environment variables
    ///
    /// - `APRIL_WS_WSDL_URL`: service WSDL URL
    /// - `APRIL_WS_NAMESPACE`: target namespace
    /// - `APRIL_WS_CONNECT_TIMEOUT`: connect timeout in seconds
    /// - `APRIL_WS_READ_TIMEOUT`: read timeout in seconds
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("APRIL_WS_WSDL_URL") {
            config.wsdl_url = url;
        }

        if let Some(namespace) = lookup("APRIL_WS_NAMESPACE") {
            config.namespace = Some(namespace);
        }

        if let Some(secs) = lookup("APRIL_WS_CONNECT_TIMEOUT") {
            config.connect_timeout = parse_seconds("APRIL_WS_CONNECT_TIMEOUT", &secs)?;
        }

        if let Some(secs) = lookup("APRIL_WS_READ_TIMEOUT") {
            config.read_timeout = parse_seconds("APRIL_WS_READ_TIMEOUT", &secs)?;
        }

        Ok(config)
    }
}

fn parse_seconds(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnv {
            name,
            reason: format!("'{value}': {e}"),
        })
}
