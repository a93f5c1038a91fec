//! OpenAI-compatible client
//!
//! Chat completions back the list prompts; the images endpoint backs the
//! destination images. Point `base-url` at any compatible server.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    CompletionRequest, CompletionResponse, GeneratedImage, ImageRequest, LlmClient, LlmError, Role, StopReason, TokenUsage,
};
use crate::config::LlmConfig;

const CHAT_PATH: &str = "/v1/chat/completions";
const IMAGES_PATH: &str = "/v1/images/generations";

/// Retries after the first attempt, for network errors, 408 and 5xx
const MAX_RETRIES: u32 = 3;

const INITIAL_BACKOFF_MS: u64 = 1000;

/// A 429 asking us to wait longer than this fails straight away
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(10);

/// Delay before retry number `retry` (1-based): 1s, 2s, 4s, ...
fn backoff_delay(retry: u32) -> Duration {
    Duration::from_millis(INITIAL_BACKOFF_MS << retry.saturating_sub(1).min(16))
}

/// `Retry-After` in seconds; HTTP-date values and garbage fall back to a minute
fn parse_retry_after(value: Option<&str>) -> Duration {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(60))
}

/// Outcome of a single POST
enum Attempt {
    Done(reqwest::Response),
    Retry(LlmError, Duration),
    Fail(LlmError),
}

/// Client for one OpenAI-compatible provider
pub struct OpenAIClient {
    model: String,
    image_model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIClient {
    /// Fails when the API key environment variable is unset
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = config.get_api_key().map_err(|e| LlmError::Config(e.to_string()))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            image_model: config.image_model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the chat completions endpoint
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages = vec![serde_json::json!({
            "role": Role::System.as_str(),
            "content": request.system_prompt,
        })];
        messages.extend(request.messages.iter().map(|msg| {
            serde_json::json!({
                "role": msg.role.as_str(),
                "content": msg.content,
            })
        }));

        let max_tokens = request.max_tokens.min(self.max_tokens);

        // GPT-5.x and o-series models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    fn build_image_body(&self, request: &ImageRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.image_model,
            "prompt": request.prompt,
            "n": 1,
            "size": request.size,
        });
        // gpt-image models always return base64 and reject response_format
        if !self.image_model.starts_with("gpt-image") {
            body["response_format"] = serde_json::json!("b64_json");
        }
        body
    }

    fn parse_response(&self, api_response: OpenAIResponse) -> CompletionResponse {
        let choice = api_response.choices.into_iter().next();

        let (content, stop_reason) = match choice {
            Some(c) => {
                let stop_reason = match c.finish_reason.as_deref() {
                    Some("length") => StopReason::MaxTokens,
                    Some("content_filter") => StopReason::ContentFilter,
                    _ => StopReason::EndTurn,
                };
                (c.message.content, stop_reason)
            }
            None => (None, StopReason::EndTurn),
        };

        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        CompletionResponse {
            content,
            stop_reason,
            usage,
        }
    }

    fn parse_image(api_response: OpenAIImageResponse) -> Result<GeneratedImage, LlmError> {
        let data = api_response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("Image response contained no data".to_string()))?;

        match (data.b64_json, data.url) {
            (Some(b64), _) => Ok(GeneratedImage {
                source: format!("data:image/png;base64,{}", b64),
            }),
            (None, Some(url)) => Ok(GeneratedImage { source: url }),
            (None, None) => Err(LlmError::InvalidResponse(
                "Image response had neither b64_json nor url".to_string(),
            )),
        }
    }

    /// POST `body` to `path` and decode the JSON reply
    ///
    /// Transient failures are retried up to `MAX_RETRIES` times. A short
    /// `Retry-After` on a 429 is honoured; a long one is returned as
    /// `RateLimited` for the caller to report.
    async fn post_json<R: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<R, LlmError> {
        let url = format!("{}{}", self.base_url, path);

        let mut retries = 0;
        loop {
            match self.send_once(&url, body, retries + 1).await {
                Attempt::Done(response) => return Ok(response.json::<R>().await?),
                Attempt::Fail(e) => return Err(e),
                Attempt::Retry(e, _) if retries >= MAX_RETRIES => return Err(e),
                Attempt::Retry(e, delay) => {
                    retries += 1;
                    warn!(%path, retries, delay_ms = delay.as_millis() as u64, error = %e, "post_json: retrying");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_once(&self, url: &str, body: &serde_json::Value, next_retry: u32) -> Attempt {
        let response = match self.http.post(url).bearer_auth(&self.api_key).json(body).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "send_once: request failed");
                return Attempt::Retry(LlmError::Network(e), backoff_delay(next_retry));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Attempt::Done(response);
        }

        if status.as_u16() == 429 {
            let header = response.headers().get(RETRY_AFTER).and_then(|v| v.to_str().ok());
            let retry_after = parse_retry_after(header);
            let error = LlmError::RateLimited { retry_after };
            return if retry_after <= MAX_RATE_LIMIT_WAIT {
                Attempt::Retry(error, retry_after)
            } else {
                Attempt::Fail(error)
            };
        }

        let error = LlmError::Api {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        };
        debug!(status = status.as_u16(), "send_once: provider error");
        if error.is_retryable() {
            Attempt::Retry(error, backoff_delay(next_retry))
        } else {
            Attempt::Fail(error)
        }
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(model = %self.model, max_tokens = request.max_tokens, "complete: called");
        let reply: OpenAIResponse = self.post_json(CHAT_PATH, &self.build_request_body(&request)).await?;
        Ok(self.parse_response(reply))
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError> {
        debug!(model = %self.image_model, size = %request.size, "generate_image: called");
        let reply: OpenAIImageResponse = self.post_json(IMAGES_PATH, &self.build_image_body(&request)).await?;
        Self::parse_image(reply)
    }
}

// Wire types for the two endpoints

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct OpenAIImageResponse {
    data: Vec<OpenAIImageData>,
}

#[derive(Debug, Deserialize)]
struct OpenAIImageData {
    b64_json: Option<String>,
    url: Option<String>,
}
