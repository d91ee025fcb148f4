use soap_client::SoapError;
use thiserror::Error;

use crate::fault_messages;

/// Errors returned by [`QuoteClient`](crate::QuoteClient) operations
///
/// Remote faults and transport failures are kept apart so callers can branch on
/// them. `Display` for the three remote variants is the bare message, matching
/// what the service integration has always shown to end users.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The service returned a fault listed in the localization table
    #[error("{message}")]
    KnownRemote {
        /// Fault text as sent by the service
        code: String,
        /// Localized replacement
        message: String,
    },

    /// The service returned a fault with no localized wording
    #[error("{0}")]
    UnknownRemote(String),

    /// Network, HTTP or envelope failure below the application level
    #[error("{0}")]
    Transport(String),

    /// The response does not have the shape the operation expects
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Writing a document to the output channel failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl QuoteError {
    /// Classify a fault text against the localization table
    pub fn from_fault(fault: &str) -> Self {
        match fault_messages::localize(fault) {
            Some(message) => QuoteError::KnownRemote {
                code: fault.to_string(),
                message: message.to_string(),
            },
            None => QuoteError::UnknownRemote(fault.to_string()),
        }
    }

    /// The message string a caller shows to the user
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// True for faults raised by the service itself
    pub fn is_remote(&self) -> bool {
        matches!(self, QuoteError::KnownRemote { .. } | QuoteError::UnknownRemote(_))
    }
}

/// Convert from SoapError to QuoteError
impl From<SoapError> for QuoteError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Fault(message) => QuoteError::from_fault(&message),
            SoapError::Network(msg) | SoapError::Parse(msg) => QuoteError::Transport(msg),
        }
    }
}

/// Type alias for results that can return a QuoteError
pub type Result<T> = std::result::Result<T, QuoteError>;
