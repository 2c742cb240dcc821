//! HTTP Metric Data Source
//!
//! Implements the `MetricDataSource` port against the backend monitor API.
//! Snapshot requests hit the metric's endpoint as-is; historic requests
//! append the window as `startts`, `endts` and `precision` (nanoseconds).

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use cockpit_domain::error::{Error, Result};
use cockpit_domain::ports::MetricDataSource;
use cockpit_domain::{FetchParams, FetchRequest, RawSample};

use super::extract::extract_sample;
use crate::constants::{CONTENT_TYPE_JSON, QUERY_END_TS, QUERY_PRECISION, QUERY_START_TS};
use crate::utils::HttpResponseUtils;

/// Data source reading the backend monitor API over HTTP
///
/// Receives its HTTP client via constructor injection.
///
/// ## Example
///
/// ```rust,no_run
/// use cockpit_providers::data_source::HttpMetricDataSource;
/// use cockpit_providers::http::{HttpClientConfig, build_client};
///
/// fn example() -> cockpit_domain::Result<()> {
///     let config = HttpClientConfig::default();
///     let source = HttpMetricDataSource::new(build_client(&config)?, config.timeout);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpMetricDataSource {
    http_client: Client,
    timeout: Duration,
}

impl HttpMetricDataSource {
    /// Create a new HTTP data source
    ///
    /// # Arguments
    /// * `http_client` - Reqwest HTTP client for making API requests
    /// * `timeout` - Per-request timeout
    pub fn new(http_client: Client, timeout: Duration) -> Self {
        Self {
            http_client,
            timeout,
        }
    }

    /// URL requested for `request`
    pub fn request_url(request: &FetchRequest) -> Result<Url> {
        let mut url = Url::parse(&request.endpoint).map_err(|e| {
            Error::configuration_with_source(format!("Invalid endpoint '{}'", request.endpoint), e)
        })?;
        if let Some(FetchParams {
            range,
            precision_ns,
        }) = request.params
        {
            url.query_pairs_mut()
                .append_pair(QUERY_START_TS, &range.start_ns.to_string())
                .append_pair(QUERY_END_TS, &range.end_ns.to_string())
                .append_pair(QUERY_PRECISION, &precision_ns.to_string());
        }
        Ok(url)
    }
}

#[async_trait]
impl MetricDataSource for HttpMetricDataSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<RawSample> {
        let url = Self::request_url(request)?;
        debug!(metric = %request.metric, database = %request.database, url = %url, "Fetching metric");

        let response = self
            .http_client
            .get(url)
            .header("Accept", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(format!("{} request", request.metric), self.timeout)
                } else {
                    Error::data_source_with_source(
                        format!("HTTP request for {} failed", request.metric),
                        e,
                    )
                }
            })?;

        let body = HttpResponseUtils::check_and_parse(response, self.provider_name()).await?;
        extract_sample(request.metric, &request.database, &body)
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
