//! LLM Client: the single point of entry for all language-model provider calls.
//!
//! No other module may call the provider directly. Embeddings go through the
//! [`Embedder`] trait and text extraction through the [`Extractor`] trait, both
//! implemented by [`LlmClient`] against an OpenAI-compatible HTTP API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

pub mod completion;
pub mod embedding;
pub mod prompts;

pub use completion::Extractor;
pub use embedding::Embedder;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider unavailable after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<LlmError>,
    },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// How many times a provider call is attempted and how long to wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): base, 2×base, 4×base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay * (1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// The single provider client shared by all handlers.
/// Wraps the embeddings and chat-completions endpoints with a fixed timeout and retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    embedding_model: String,
    completion_model: String,
    retry: RetryPolicy,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.provider_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            embedding_model: config.embedding_model.clone(),
            completion_model: config.completion_model.clone(),
            retry: RetryPolicy {
                max_attempts: config.provider_max_attempts,
                ..RetryPolicy::default()
            },
        })
    }

    #[cfg(test)]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn completion_model(&self) -> &str {
        &self.completion_model
    }

    /// POSTs `body` to `{base_url}/{path}` and deserializes the JSON reply.
    /// Retries on transport errors, 429 and 5xx with exponential backoff; when
    /// every attempt fails that way the last failure is wrapped in `RetriesExhausted`.
    /// Other non-success statuses fail immediately.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, LlmError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let failure = match self.send_once(&url, body).await {
                Ok(bytes) => return serde_json::from_slice(&bytes).map_err(LlmError::Parse),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retryable(e)) => e,
            };

            if attempt >= max_attempts {
                return Err(LlmError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(failure),
                });
            }

            let delay = self.retry.delay_for(attempt);
            warn!(
                "Provider call to /{} attempt {} failed ({}), retrying after {}ms...",
                path,
                attempt,
                failure,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One request/response round trip, classified for the retry loop.
    async fn send_once<B>(&self, url: &str, body: &B) -> Result<bytes::Bytes, Attempt>
    where
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Attempt::Retryable(LlmError::Http(e)))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Attempt::Retryable(LlmError::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(Attempt::Fatal(LlmError::Api {
                status: status.as_u16(),
                message,
            }));
        }

        response
            .bytes()
            .await
            .map_err(|e| Attempt::Fatal(LlmError::Http(e)))
    }
}

/// Outcome of a failed attempt: worth retrying or not.
enum Attempt {
    Retryable(LlmError),
    Fatal(LlmError),
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::Router;

    use super::*;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    pub(crate) async fn spawn_fake_provider(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub(crate) fn client_for(base_url: &str, max_attempts: u32) -> LlmClient {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://unused".to_string()),
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "OPENAI_BASE_URL" => Some(base_url.to_string()),
            "PROVIDER_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        LlmClient::new(&config)
            .unwrap()
            .with_retry_policy(RetryPolicy {
                max_attempts,
                base_delay: Duration::from_millis(1),
            })
    }

    #[test]
    fn test_retry_delay_doubles() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_client_uses_configured_models() {
        let client = client_for("http://localhost:1", 1);
        assert_eq!(client.embedding_model(), "text-embedding-ada-002");
        assert_eq!(client.completion_model(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_unreachable_provider_exhausts_attempts() {
        // Port 1 is never listening locally; every attempt is a transport error.
        let client = client_for("http://127.0.0.1:1", 2);
        let err = client.embed("anything").await.unwrap_err();
        match err {
            LlmError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, LlmError::Http(_)), "{last:?}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
