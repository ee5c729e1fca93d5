use crate::errors::MarketoError;
use serde_json::{Map, Value};
use std::future::Future;

/// A fully constructed SOAP request: wire method name plus named parameters.
///
/// Parameters are keyed by the exact field names the API expects; absent
/// optional fields are omitted entirely, never sent as null.
#[derive(Debug, Clone, PartialEq)]
pub struct SoapRequest {
    pub method: &'static str,
    pub params: Map<String, Value>,
}

/// Transport collaborator that carries a request to the SOAP endpoint.
///
/// Implementations own connection handling, authentication, and retry
/// policy. The response body is returned verbatim; this crate never
/// inspects it.
pub trait SoapTransport {
    /// Invokes `method` on the remote API with the given parameters.
    fn call(
        &self,
        method: &str,
        params: Map<String, Value>,
    ) -> impl Future<Output = Result<Value, MarketoError>> + Send;
}
