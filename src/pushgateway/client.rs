//! # Pushgateway Client
//!
//! Sends a rendered sample batch to the Pushgateway in a single POST.

use crate::constants::{EXPOSITION_CONTENT_TYPE, PUSH_PREVIEW_LINES};
use crate::extract::Sample;
use crate::observability;
use crate::pushgateway::exposition;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PushError {
    #[error("invalid Pushgateway URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to send metrics to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The Pushgateway answered with a non-2xx status
    #[error("Pushgateway at {url} rejected the push: HTTP {} {reason}", status.as_u16())]
    Rejected {
        url: String,
        status: StatusCode,
        reason: String,
        body: String,
    },
}

/// Outcome of a successful push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSummary {
    /// Number of samples pushed (header lines excluded)
    pub samples: usize,
    /// First rendered sample lines, for operator confirmation
    pub preview: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PushgatewayClient {
    http_client: Client,
    url: String,
}

impl PushgatewayClient {
    /// Create a client pushing to `url`
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute URL or the HTTP client
    /// cannot be built.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, PushError> {
        let parsed = url::Url::parse(url).map_err(|e| PushError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PushError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(PushError::Client)?;

        Ok(Self {
            http_client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Push `samples` as one exposition-format body
    ///
    /// On a non-2xx response the status, response body and the full payload
    /// are logged before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the Pushgateway rejects it.
    pub async fn push(&self, samples: &[Sample]) -> Result<PushSummary, PushError> {
        let body = exposition::render(samples);
        info!("Pushing {} samples to {}", samples.len(), self.url);

        let response = self
            .http_client
            .post(&self.url)
            .header(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)
            .body(body.clone())
            .send()
            .await
            .map_err(|source| {
                observability::metrics::increment_push_errors_total();
                PushError::Request {
                    url: self.url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            observability::metrics::increment_push_errors_total();
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            // The body is only diagnostic here; a read failure leaves it empty.
            let response_body = response.text().await.unwrap_or_default();
            error!(
                "Error pushing results to {}: HTTP {} {}",
                self.url,
                status.as_u16(),
                reason
            );
            error!("Pushgateway response: {}", response_body);
            error!("Rejected payload:\n{}", body);
            return Err(PushError::Rejected {
                url: self.url.clone(),
                status,
                reason,
                body: response_body,
            });
        }

        observability::metrics::add_samples_pushed(samples.len());
        let preview = samples
            .iter()
            .take(PUSH_PREVIEW_LINES)
            .map(exposition::render_sample)
            .collect();

        Ok(PushSummary {
            samples: samples.len(),
            preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Labels, MetricName};

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(
                MetricName::ScrapeDurationSeconds,
                Labels::instance("https://example.com"),
                1234.0,
            ),
            Sample::new(
                MetricName::CategoryScore,
                Labels::instance("https://example.com").with("category", "performance"),
                0.9,
            ),
        ]
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = PushgatewayClient::new("prometheus/metrics/job/lighthouse", None).unwrap_err();
        assert!(matches!(err, PushError::InvalidUrl { .. }));
    }

    #[test]
    fn test_url_without_http_scheme_is_rejected() {
        // Parses with "prometheus" as the scheme
        let err = PushgatewayClient::new("prometheus:9091/metrics/job/lighthouse", None).unwrap_err();
        match err {
            PushError::InvalidUrl { reason, .. } => assert!(reason.contains("unsupported scheme")),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_push_posts_rendered_body() {
        let mut server = mockito::Server::new_async().await;
        let expected = exposition::render(&samples());
        let mock = server
            .mock("POST", "/metrics/job/lighthouse")
            .match_header("content-type", EXPOSITION_CONTENT_TYPE)
            .match_body(mockito::Matcher::Exact(expected))
            .with_status(200)
            .create_async()
            .await;

        let client =
            PushgatewayClient::new(&format!("{}/metrics/job/lighthouse", server.url()), None)
                .unwrap();
        let summary = client.push(&samples()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(summary.samples, 2);
        assert_eq!(
            summary.preview[0],
            r#"scrape_duration_seconds{instance="https://example.com"} 1234"#
        );
    }

    #[tokio::test]
    async fn test_push_accepts_any_2xx() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/metrics/job/lighthouse")
            .with_status(202)
            .create_async()
            .await;

        let client =
            PushgatewayClient::new(&format!("{}/metrics/job/lighthouse", server.url()), None)
                .unwrap();
        assert!(client.push(&samples()).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_push_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/metrics/job/lighthouse")
            .with_status(400)
            .with_body("text format parsing error in line 7")
            .create_async()
            .await;

        let client =
            PushgatewayClient::new(&format!("{}/metrics/job/lighthouse", server.url()), None)
                .unwrap();
        let err = client.push(&samples()).await.unwrap_err();

        mock.assert_async().await;
        match err {
            PushError::Rejected {
                status,
                reason,
                body,
                ..
            } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(reason, "Bad Request");
                assert_eq!(body, "text format parsing error in line 7");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
