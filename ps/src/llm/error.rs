//! LLM error types

use std::time::Duration;
use thiserror::Error;

use super::types::StopReason;

/// Errors from talking to a model provider
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Provider rate limited the request, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("Provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request to provider failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),

    /// The reply had text, but no list of item names could be read from it
    #[error("Reply was not a list of item names: {0}")]
    NotAList(String),

    #[error("Model produced no text (stop reason: {0:?})")]
    EmptyReply(StopReason),

    #[error("LLM backend misconfigured: {0}")]
    Config(String),
}

impl LlmError {
    /// HTTP status behind this error, if the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::RateLimited { .. } => Some(429),
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Transient provider trouble; a model that answered badly is not retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } | LlmError::Network(_) => true,
            LlmError::Api { status, .. } => *status == 408 || *status >= 500,
            LlmError::EmptyReply(reason) => *reason == StopReason::MaxTokens,
            LlmError::InvalidResponse(_) | LlmError::NotAList(_) | LlmError::Config(_) => false,
        }
    }
}
