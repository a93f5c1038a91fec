//! LLM Client module for PackSmart
//!
//! Provides completion and image requests plus reply parsing.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod parse;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use parse::parse_string_list;
pub use types::{
    CompletionRequest, CompletionResponse, GeneratedImage, ImageRequest, Message, Role, StopReason, TokenUsage,
};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "openai" (and any server speaking the same API via `base-url`).
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAIClient::from_config(config)?)),
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::Config(format!(
                "Unknown LLM provider: '{}'. Supported: openai",
                other
            )))
        }
    }
}
