use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use std::env;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ApiErrorBody, ChatCompletion, ChatCompletionRequest};

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const REFERER: &str = "https://github.com/yourusername/anonai-cli";
const TITLE: &str = "AnonAI";

/// Anything that can turn a request into a completion.
///
/// The chat session only talks to this trait, which keeps the loop
/// testable without a network.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Performs one request/response cycle.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion>;
}

/// Client for the OpenRouter chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouter {
    api_key: String,
    client: ReqwestClient,
    endpoint: String,
    timeout: Duration,
}

impl OpenRouter {
    /// Create a new client.
    ///
    /// The API key can be provided directly or read from the
    /// OPENROUTER_API_KEY environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        endpoint: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => api_key_from_env()?,
        };
        if api_key.trim().is_empty() {
            return Err(Error::authentication("API key is empty"));
        }
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::authentication("API key contains invalid header characters"))?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout,
        })
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| Error::authentication("API key contains invalid header characters"))?,
        );
        headers.insert("HTTP-Referer", HeaderValue::from_static(REFERER));
        headers.insert("X-Title", HeaderValue::from_static(TITLE));
        Ok(headers)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ApiErrorBody>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .unwrap_or(error_body);

        match status_code {
            408 => Error::timeout(error_message, None),
            _ => Error::api(status_code, error_message),
        }
    }

    /// Send one completion request and wait for the full response.
    pub async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        match &result {
            Ok(_) => tracing::debug!(model = %request.model, "completion received"),
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                tracing::debug!(model = %request.model, error = %err, "completion failed");
            }
        }
        result
    }

    async fn send(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.default_headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatCompletion>().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Request timed out: {}", e),
                    Some(self.timeout.as_secs_f64()),
                )
            } else {
                Error::serialization(
                    format!("Failed to parse response: {}", e),
                    Some(Box::new(e)),
                )
            }
        })
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenRouter {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
        OpenRouter::complete(self, request).await
    }
}

/// Reads the bearer token from the environment.
///
/// An unset or blank variable is an authentication error.
pub fn api_key_from_env() -> Result<String> {
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(Error::authentication(format!(
            "API key not provided and {API_KEY_ENV} environment variable not set"
        ))),
    }
}
