//! Client for the April International travel insurance web service
//!
//! [`QuoteClient`] collects the travellers and dates of a trip, requests
//! quotes, validates them into contracts and fetches voucher documents. Faults
//! reported by the service are mapped to [`QuoteError`], with known fault codes
//! replaced by their French wording.
//!
//! ```rust,no_run
//! use april_ws::{ClientConfig, Credentials, QuoteClient, BufferedResponse};
//!
//! let config = ClientConfig::from_env()?;
//! let client = QuoteClient::with_config(
//!     Credentials::new([("login", "agent"), ("password", "secret")]),
//!     &config,
//! );
//!
//! let contract = client.validate_devis(4411)?;
//! let mut response = BufferedResponse::new();
//! client.get_voucher_pdf(4411, &mut response)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fault_messages;
pub mod logging;
pub mod model;
pub mod transport;
pub mod voucher;

pub use client::QuoteClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{QuoteError, Result};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use model::{Credentials, Traveller, TripDate};
pub use transport::Transport;
pub use voucher::{BufferedResponse, OutputChannel, StreamOutput};

pub use soap_client::{ParamKey, Params, SoapClient, SoapError, SoapValue};
