//! Single dispatch point for outbound API calls.
//!
//! [`Transport`] applies the base URL, default headers and timeout, runs the
//! [`RetryConfig`] policy, and folds every failure into an [`ApiError`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::retry::RetryConfig;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// A failed attempt before normalization.
#[derive(Debug)]
enum Failure {
    Network(HttpError),
    Status(HttpResponse),
}

impl Failure {
    fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::Status(response) => Some(response.status),
        }
    }
}

#[derive(Clone)]
pub struct Transport {
    config: ClientConfig,
    retry: RetryConfig,
    http_client: Arc<dyn HttpClient>,
}

impl Transport {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            retry: RetryConfig::default(),
            http_client,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET request for `path` with the default headers and timeout.
    pub fn get(&self, path: &str) -> HttpRequest {
        self.prepare(HttpRequest::get(self.config.url(path)))
    }

    /// POST request for `path` with the default headers and timeout.
    pub fn post(&self, path: &str) -> HttpRequest {
        self.prepare(HttpRequest::post(self.config.url(path)))
    }

    fn prepare(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header("content-type", "application/json")
            .with_timeout_ms(self.config.timeout_ms)
    }

    /// Dispatches `request` and decodes the JSON body into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(|error| {
            ApiError::new(
                format!("failed to decode response: {error}"),
                Some(response.status),
            )
        })
    }

    /// Dispatches `request`, retrying eligible failures, and returns the 2xx response.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request.retry_count = 0;

        loop {
            debug!(
                method = %request.method,
                url = %request.url,
                retry_count = request.retry_count,
                "dispatching request"
            );

            let failure = match self.http_client.execute(request.clone()).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => Failure::Status(response),
                Err(error) => Failure::Network(error),
            };

            if self.retry.should_retry(request.method, failure.status())
                && self.retry.has_budget(request.retry_count)
            {
                request.retry_count += 1;
                warn!(
                    method = %request.method,
                    url = %request.url,
                    status = ?failure.status(),
                    retry_count = request.retry_count,
                    "retrying failed request"
                );
                continue;
            }

            let error = normalize(failure);
            debug!(status = ?error.status(), message = %error, "request failed");
            return Err(error);
        }
    }
}

/// Server `error` text, else the transport message, else [`ApiError::FALLBACK_MESSAGE`].
fn normalize(failure: Failure) -> ApiError {
    match failure {
        Failure::Network(error) => {
            ApiError::network(non_empty(error.message()).unwrap_or(ApiError::FALLBACK_MESSAGE))
        }
        Failure::Status(response) => {
            let server_message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.trim().is_empty());
            let message = server_message
                .unwrap_or_else(|| format!("Request failed with status code {}", response.status));
            ApiError::new(message, Some(response.status))
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::ScriptedHttpClient;

    fn transport(client: &Arc<ScriptedHttpClient>) -> Transport {
        Transport::with_http_client(ClientConfig::new("http://api.test/v1"), client.clone())
    }

    #[test]
    fn server_error_text_takes_precedence() {
        let error = normalize(Failure::Status(HttpResponse::with_status(
            404,
            r#"{"error":"Stock not found"}"#,
        )));

        assert_eq!(error.message(), "Stock not found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn status_message_used_when_body_has_no_error_text() {
        let error = normalize(Failure::Status(HttpResponse::with_status(
            502,
            "<html>bad gateway</html>",
        )));

        assert_eq!(error.message(), "Request failed with status code 502");
        assert_eq!(error.status(), Some(502));
    }

    #[test]
    fn blank_transport_message_falls_back_to_generic() {
        let error = normalize(Failure::Network(HttpError::new("")));

        assert_eq!(error.message(), "Request failed");
        assert_eq!(error.status(), None);
    }

    #[tokio::test]
    async fn requests_carry_default_header_and_timeout() {
        let client = Arc::new(ScriptedHttpClient::new());
        client.respond(200, "{}");
        let transport = transport(&client);

        transport
            .send(transport.get("/metadata"))
            .await
            .expect("scripted success");

        let sent = &client.requests()[0];
        assert_eq!(transport.base_url(), "http://api.test/v1");
        assert_eq!(sent.url, "http://api.test/v1/metadata");
        assert_eq!(
            sent.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(sent.timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn retry_counter_increments_on_retry() {
        let client = Arc::new(ScriptedHttpClient::new());
        client.fail("connection refused").respond(200, "{}");
        let transport = transport(&client);

        transport
            .send(transport.get("/stocks"))
            .await
            .expect("second attempt succeeds");

        let sent = client.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].retry_count, 0);
        assert_eq!(sent[1].retry_count, 1);
    }

    #[tokio::test]
    async fn undecodable_success_body_is_normalized() {
        let client = Arc::new(ScriptedHttpClient::new());
        client.respond(200, "not json");
        let transport = transport(&client);

        let error = transport
            .send_json::<serde_json::Value>(transport.get("/metadata"))
            .await
            .expect_err("body is not json");

        assert!(error.message().starts_with("failed to decode response"));
        assert_eq!(error.status(), Some(200));
    }
}
