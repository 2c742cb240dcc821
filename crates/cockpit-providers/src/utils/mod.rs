//! Provider Utilities
//!
//! Shared utilities used by provider implementations.

#[cfg(feature = "source-http")]
mod http_response;

#[cfg(feature = "source-http")]
pub use http_response::HttpResponseUtils;
