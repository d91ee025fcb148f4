//! Private SOAP client for the April International web service
//!
//! This crate provides a minimal SOAP 1.1 RPC/encoded client: it serializes an
//! ordered parameter list into an envelope, posts it to a fixed service
//! endpoint and hands back the response element or the fault message. It does
//! not read WSDL documents; the endpoint and target namespace are supplied by
//! the caller.

mod error;
mod params;
mod value;

pub use error::SoapError;
pub use params::{ParamKey, Params};
pub use value::SoapValue;

use std::time::Duration;
use tracing::{debug, warn};
use xmltree::Element;

/// Default connect timeout applied by [`SoapClient::new`]
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default read timeout applied by [`SoapClient::new`]
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// A minimal SOAP client bound to one service endpoint
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
    endpoint: String,
    namespace: String,
}

impl SoapClient {
    /// Create a new SOAP client with default timeouts
    ///
    /// `endpoint` may be given as a WSDL URL (`...?wsdl`); the query is dropped
    /// to obtain the service address.
    pub fn new(endpoint: &str, namespace: &str) -> Self {
        Self::with_timeouts(endpoint, namespace, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    /// Create a SOAP client with explicit connect and read timeouts
    pub fn with_timeouts(
        endpoint: &str,
        namespace: &str,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect_timeout)
                .timeout_read(read_timeout)
                .build(),
            endpoint: service_endpoint(endpoint).to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// Service address requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Target namespace of the RPC operations
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Build the RPC/encoded envelope for `action`
    pub fn build_envelope(&self, action: &str, params: &Params) -> String {
        let mut parts = String::new();
        params.write_xml(&mut parts);

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="{namespace}" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:SOAP-ENC="http://schemas.xmlsoap.org/soap/encoding/" SOAP-ENV:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><SOAP-ENV:Body><ns1:{action}>{parts}</ns1:{action}></SOAP-ENV:Body></SOAP-ENV:Envelope>"#,
            namespace = self.namespace,
            action = action,
            parts = parts
        )
    }

    /// Send a SOAP request and return the parsed `{action}Response` element
    pub fn call(&self, action: &str, params: &Params) -> Result<Element, SoapError> {
        let envelope = self.send(action, params)?;
        self.extract_response(&envelope, action)
    }

    /// Send a SOAP request and decode the returned part into a [`SoapValue`]
    ///
    /// Multi-reference values elsewhere in the Body are resolved.
    pub fn invoke(&self, action: &str, params: &Params) -> Result<SoapValue, SoapError> {
        let envelope = self.send(action, params)?;
        let response = self.extract_response(&envelope, action)?;
        let body = envelope.get_child("Body")
            .ok_or_else(|| SoapError::Parse("Missing SOAP Body".to_string()))?;
        SoapValue::from_response(&response, body)
    }

    /// Post the envelope and parse the reply, keeping fault bodies of HTTP errors
    fn send(&self, action: &str, params: &Params) -> Result<Element, SoapError> {
        let body = self.build_envelope(action, params);
        let soap_action = format!("\"{}#{}\"", self.namespace, action);

        debug!(action, endpoint = %self.endpoint, parts = params.len(), "sending SOAP request");

        let xml_text = match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .set("SOAPAction", &soap_action)
            .send_string(&body)
        {
            Ok(response) => response
                .into_string()
                .map_err(|e| SoapError::Network(e.to_string()))?,
            // Faults are delivered with HTTP 500; keep the body so the fault
            // message can be extracted.
            Err(ureq::Error::Status(code, response)) => {
                let text = response
                    .into_string()
                    .map_err(|e| SoapError::Network(e.to_string()))?;
                match Element::parse(text.as_bytes()) {
                    Ok(xml) if find_fault(&xml).is_some() => text,
                    _ => return Err(SoapError::Network(format!("HTTP {code} from {}", self.endpoint))),
                }
            }
            Err(e) => return Err(SoapError::Network(e.to_string())),
        };

        Element::parse(xml_text.as_bytes())
            .map_err(|e| SoapError::Parse(e.to_string()))
    }

    fn extract_response(&self, xml: &Element, action: &str) -> Result<Element, SoapError> {
        let body = xml.get_child("Body")
            .ok_or_else(|| SoapError::Parse("Missing SOAP Body".to_string()))?;

        // Check for SOAP fault first
        if let Some(fault) = body.get_child("Fault") {
            let message = fault_message(fault);
            warn!(action, fault = %message, "SOAP fault");
            return Err(SoapError::Fault(message));
        }

        let response_name = format!("{}Response", action);
        body.get_child(response_name.as_str())
            .cloned()
            .ok_or_else(|| SoapError::Parse(format!("Missing {} element", response_name)))
    }
}

/// Drop a trailing `?wsdl` query from a service URL
pub fn service_endpoint(url: &str) -> &str {
    match url.rfind('?') {
        Some(index) if url[index + 1..].eq_ignore_ascii_case("wsdl") => &url[..index],
        _ => url,
    }
}

fn find_fault(xml: &Element) -> Option<&Element> {
    xml.get_child("Body").and_then(|body| body.get_child("Fault"))
}

/// `faultstring` text of a fault, falling back to `faultcode`
fn fault_message(fault: &Element) -> String {
    fault
        .get_child("faultstring")
        .or_else(|| fault.get_child("faultcode"))
        .and_then(|e| e.get_text())
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| "Unknown SOAP fault".to_string())
}
