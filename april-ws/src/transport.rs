//! Seam between the quote client and the SOAP stack

use soap_client::{Params, SoapClient, SoapError, SoapValue};

/// Something able to invoke a named remote operation
///
/// Implemented by [`SoapClient`]; tests and hosts with their own SOAP stack
/// can provide another implementation.
pub trait Transport {
    /// Invoke `operation` with `params` and return the decoded result
    fn invoke(&self, operation: &str, params: &Params) -> Result<SoapValue, SoapError>;
}

impl Transport for SoapClient {
    fn invoke(&self, operation: &str, params: &Params) -> Result<SoapValue, SoapError> {
        SoapClient::invoke(self, operation, params)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn invoke(&self, operation: &str, params: &Params) -> Result<SoapValue, SoapError> {
        (**self).invoke(operation, params)
    }
}
