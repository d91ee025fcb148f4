//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Error)]
pub enum SoapError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// SOAP fault returned by the server, carrying its `faultstring`
    #[error("{0}")]
    Fault(String),
}

impl SoapError {
    /// The bare message text, without the category prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            SoapError::Network(msg) | SoapError::Parse(msg) | SoapError::Fault(msg) => msg,
        }
    }
}
