use crate::campaigns::Campaigns;
use crate::soap::SoapTransport;

/// Client for the Marketo SOAP API.
///
/// Owns the transport collaborator and hands out operation groups bound
/// to it. The client itself holds no session state; every call is
/// independent.
pub struct MarketoClient<T> {
    transport: T,
}

impl<T: SoapTransport> MarketoClient<T> {
    /// Creates a new `MarketoClient` around a transport implementation.
    pub fn new(transport: T) -> Self {
        tracing::debug!("Marketo client initialized");
        Self { transport }
    }

    /// Campaign lookup, request, and scheduling operations.
    pub fn campaigns(&self) -> Campaigns<'_, T> {
        Campaigns::new(&self.transport)
    }

    /// The transport collaborator this client dispatches through.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
