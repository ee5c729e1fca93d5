//! Marketo SOAP API Client Library
//!
//! Client-side binding for the Marketo SOAP marketing-automation API,
//! covering campaign lookup, lead-to-campaign requests, and campaign
//! scheduling. This crate builds and validates the request shapes; the
//! network call itself is delegated to a [`soap::SoapTransport`]
//! implementation supplied by the caller.
//!
//! # Modules
//!
//! - `campaigns`: campaign request builders and transport-bound operations.
//! - `client`: client wrapper owning the transport collaborator.
//! - `config`: configuration management.
//! - `errors`: error handling types.
//! - `soap`: SOAP request value and the transport seam.

pub mod campaigns;
pub mod client;
pub mod config;
pub mod errors;
pub mod soap;
