use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Datelike;
use soap_client::{Params, SoapClient, SoapValue};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::model::{Credentials, Traveller, TripDate};
use crate::transport::Transport;
use crate::voucher::{self, OutputChannel};
use crate::{QuoteError, Result};

/// Destination country sent with every quote
pub const COUNTRY_CODE: &str = "FR";
/// Trip type sent with every quote
pub const TRIP_TYPE: &str = "OTH";

/// Client for the April International quote service
///
/// The client accumulates the travellers and dates of one quote flow, then
/// issues remote operations with that state. Credentials given at construction
/// are merged into every call, ahead of the operation's own parameters.
///
/// One instance is meant to serve one quote flow; [`reset_quote`] clears the
/// accumulated state when an instance is reused.
///
/// ```rust,no_run
/// use april_ws::{Credentials, QuoteClient};
/// use chrono::NaiveDate;
///
/// let mut client = QuoteClient::new(Credentials::new([("login", "agent"), ("password", "secret")]));
/// client
///     .add_traveler(true, "Martin", "Lea", 1200.0, true)
///     .add_departure_date(&NaiveDate::from_ymd_opt(2023, 4, 7).unwrap())
///     .add_arrival_date(&NaiveDate::from_ymd_opt(2023, 4, 21).unwrap());
///
/// let quote = client.get_devis(5, 12)?;
/// # Ok::<(), april_ws::QuoteError>(())
/// ```
///
/// [`reset_quote`]: QuoteClient::reset_quote
#[derive(Debug)]
pub struct QuoteClient<T: Transport = SoapClient> {
    credentials: Credentials,
    transport: T,
    travellers: Vec<Traveller>,
    departure_date: Option<TripDate>,
    arrival_date: Option<TripDate>,
}

impl QuoteClient<SoapClient> {
    /// Create a client for the default (demo) service
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, &ClientConfig::default())
    }

    /// Create a client for the service described by `config`
    pub fn with_config(credentials: Credentials, config: &ClientConfig) -> Self {
        let soap_client = SoapClient::with_timeouts(
            config.endpoint(),
            config.namespace(),
            config.connect_timeout,
            config.read_timeout,
        );
        Self::with_transport(credentials, soap_client)
    }
}

impl<T: Transport> QuoteClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
            travellers: Vec::new(),
            departure_date: None,
            arrival_date: None,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Travellers in the order they were added
    pub fn travellers(&self) -> &[Traveller] {
        &self.travellers
    }

    pub fn departure_date(&self) -> Option<&TripDate> {
        self.departure_date.as_ref()
    }

    pub fn arrival_date(&self) -> Option<&TripDate> {
        self.arrival_date.as_ref()
    }

    /// Add a traveller to the quote
    pub fn add_traveler(
        &mut self,
        is_insured: bool,
        last_name: &str,
        first_name: &str,
        trip_price: f64,
        is_subscriber: bool,
    ) -> &mut Self {
        self.travellers.push(Traveller::new(
            is_insured,
            last_name,
            first_name,
            trip_price,
            is_subscriber,
        ));
        self
    }

    /// Set the departure date, replacing any previous one
    pub fn add_departure_date<D: Datelike>(&mut self, date: &D) -> &mut Self {
        self.departure_date = Some(TripDate::from_date(date));
        self
    }

    /// Set the arrival date, replacing any previous one
    pub fn add_arrival_date<D: Datelike>(&mut self, date: &D) -> &mut Self {
        self.arrival_date = Some(TripDate::from_date(date));
        self
    }

    /// Forget travellers and dates to start a new quote flow
    pub fn reset_quote(&mut self) -> &mut Self {
        self.travellers.clear();
        self.departure_date = None;
        self.arrival_date = None;
        self
    }

    /// List the insurance products available to the account
    pub fn get_assurances(&self) -> Result<SoapValue> {
        self.call("getAssurances", Params::new())
    }

    /// List the formulas of an insurance product
    pub fn get_formules(&self, insurance_id: i64) -> Result<SoapValue> {
        self.call("getFormules", Params::new().with("id", insurance_id))
    }

    /// Request a quote for the accumulated travellers and dates
    ///
    /// Unset dates are sent as nil.
    pub fn get_devis(&self, insurance_id: i64, formula_id: i64) -> Result<SoapValue> {
        self.call("getDevis", self.devis_params(insurance_id, formula_id))
    }

    fn devis_params(&self, insurance_id: i64, formula_id: i64) -> Params {
        let travellers = self.travellers.iter().map(Traveller::to_soap_value).collect::<Vec<_>>();

        Params::new()
            .with("idAssurance", insurance_id)
            .with("idFormule", formula_id)
            .with("extensions", SoapValue::List(Vec::new()))
            .with("dateDepart", self.departure_date.as_ref().map(TripDate::to_soap_value))
            .with("dateRetour", self.arrival_date.as_ref().map(TripDate::to_soap_value))
            .with("idPays", COUNTRY_CODE)
            .with("idTypeVoyage", TRIP_TYPE)
            .with("assures", travellers)
            // Trailing unnamed arguments required by the remote signature
            .with_positional("")
            .with_positional("")
            .with_positional("")
            .with_positional("")
            .with_positional(false)
            .with_positional("")
    }

    /// Turn a quote into a contract; returns the contract number
    pub fn validate_devis(&self, quote_id: i64) -> Result<SoapValue> {
        self.call("validerDevis", Params::new().with("idDevis", quote_id))
    }

    /// Fetch the voucher PDF of a quote
    pub fn fetch_voucher_pdf(&self, quote_id: i64) -> Result<Vec<u8>> {
        let value = self.call("getVoucherPdf", Params::new().with("noDevis", quote_id))?;
        decode_document(&value)
    }

    /// Fetch the voucher PDF of a quote and write it to `out`
    ///
    /// The PDF headers are emitted first unless output has already started.
    /// Nothing is written when the call fails.
    pub fn get_voucher_pdf<O: OutputChannel + ?Sized>(
        &self,
        quote_id: i64,
        out: &mut O,
    ) -> Result<Vec<u8>> {
        let document = self.fetch_voucher_pdf(quote_id)?;
        voucher::emit_pdf(out, &document)?;
        Ok(document)
    }

    fn call(&self, operation: &str, params: Params) -> Result<SoapValue> {
        let params = self.credentials.to_params().union(params);

        debug!(operation, parts = params.len(), "calling April web service");

        self.transport.invoke(operation, &params).map_err(|e| {
            let error = QuoteError::from(e);
            warn!(operation, error = %error, "April web service call failed");
            error
        })
    }
}

/// Bytes of a `base64Binary` document
fn decode_document(value: &SoapValue) -> Result<Vec<u8>> {
    match value {
        SoapValue::String(encoded) => {
            let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map_err(|e| QuoteError::UnexpectedResponse(format!("voucher is not base64: {e}")))
        }
        other => Err(QuoteError::UnexpectedResponse(format!(
            "voucher is not a document: {other:?}"
        ))),
    }
}
