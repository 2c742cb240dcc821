//! HTTP Response Utilities
//!
//! Helper functions for processing responses of the backend monitor API.
//! These are shared utilities, not ports.

use cockpit_domain::error::{Error, Result};
use reqwest::Response;

/// Format error message for a data source
fn source_error(provider: &str, context: &str, details: &str) -> Error {
    Error::data_source(format!("{provider} {context}: {details}"))
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_name` - Name of the provider for error messages
    ///
    /// # Returns
    /// Parsed JSON value on success, a `DataSource` error for non-2xx
    /// statuses and an `InvalidResponse` error for unparseable bodies
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                404 => source_error(provider_name, "monitor route not found (404)", &error_text),
                500..=599 => source_error(
                    provider_name,
                    &format!("server error ({code})"),
                    &error_text,
                ),
                _ => source_error(
                    provider_name,
                    &format!("request failed ({code})"),
                    &error_text,
                ),
            });
        }

        response.json().await.map_err(|e| {
            Error::invalid_response(format!("{provider_name} response parse failed: {e}"))
        })
    }
}
