//! LLM backend
//!
//! List generation and the forgotten-item check render a prompt template and
//! parse a JSON string array out of the reply. Images are generated one
//! request per prompt.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    CollaboratorError, ForgottenCheckInput, ForgottenItemCheck, ImageLookup, ListGenerationInput, ListGenerator,
};
use crate::domain::{IMAGE_SET_SIZE, ImageResource};
use crate::llm::{CompletionRequest, ImageRequest, LlmClient, LlmError, Message, parse_string_list};
use crate::prompts::{FORGOTTEN_ITEMS, PACKING_LIST, PromptLoader};

const SYSTEM_PROMPT: &str = "You are a travel packing assistant. Reply with a JSON array of strings only.";

/// Render `template`, send it, and parse the reply as a list of names
async fn complete_list<T: Serialize + Sync>(
    client: &dyn LlmClient,
    prompts: &PromptLoader,
    max_tokens: u32,
    template: &str,
    context: &T,
) -> Result<Vec<String>, CollaboratorError> {
    let prompt = prompts
        .render(template, context)
        .map_err(|e| CollaboratorError::Prompt(e.to_string()))?;

    let request = CompletionRequest {
        system_prompt: SYSTEM_PROMPT.to_string(),
        messages: vec![Message::user(prompt)],
        max_tokens,
    };
    let response = client.complete(request).await?;
    debug!(
        %template,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        stop_reason = ?response.stop_reason,
        "complete_list: reply received"
    );
    let Some(text) = response.content else {
        return Err(LlmError::EmptyReply(response.stop_reason).into());
    };

    parse_string_list(&text).map_err(|e| CollaboratorError::InvalidOutput(e.to_string()))
}

/// Packing list from the `packing-list` prompt
pub struct LlmListGenerator {
    client: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl LlmListGenerator {
    pub fn new(client: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self {
            client,
            prompts,
            max_tokens,
        }
    }
}

#[async_trait]
impl ListGenerator for LlmListGenerator {
    async fn generate_list(&self, input: &ListGenerationInput) -> Result<Vec<String>, CollaboratorError> {
        debug!(trip_type = %input.trip_type, duration = input.duration, "generate_list: called");
        let names = complete_list(self.client.as_ref(), &self.prompts, self.max_tokens, PACKING_LIST, input).await?;
        info!(count = names.len(), "Generated packing list");
        Ok(names)
    }
}

/// Forgotten items from the `forgotten-items` prompt
pub struct LlmForgottenCheck {
    client: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
}

impl LlmForgottenCheck {
    pub fn new(client: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, max_tokens: u32) -> Self {
        Self {
            client,
            prompts,
            max_tokens,
        }
    }
}

#[async_trait]
impl ForgottenItemCheck for LlmForgottenCheck {
    async fn check_forgotten(&self, input: &ForgottenCheckInput) -> Result<Vec<String>, CollaboratorError> {
        debug!(trip_type = %input.trip_type, packed = input.packed_items.len(), "check_forgotten: called");
        complete_list(self.client.as_ref(), &self.prompts, self.max_tokens, FORGOTTEN_ITEMS, input).await
    }
}

/// One prompt per image slot
fn image_prompts(destination: &str) -> [String; IMAGE_SET_SIZE] {
    [
        format!("A stunning, high-quality, travel-style photograph of an iconic landmark in {destination}."),
        format!(
            "A beautiful, high-quality, travel-style photograph capturing the natural scenery or landscape of {destination}."
        ),
        format!(
            "A vibrant, high-quality, travel-style photograph of a bustling street view or local life in {destination}."
        ),
        format!(
            "An inviting, high-quality, travel-style photograph showcasing local cuisine or a colorful market in {destination}."
        ),
        format!("A breathtaking, high-quality, travel-style panoramic view or cityscape of {destination}."),
    ]
}

const IMAGE_SUBJECTS: [&str; IMAGE_SET_SIZE] = ["landmark", "scenery", "street life", "local cuisine", "panorama"];

/// Destination imagery from the images endpoint
///
/// Each slot is requested independently. A failed slot is logged and left
/// out, so this never fails as a whole.
pub struct LlmImageGenerator {
    client: Arc<dyn LlmClient>,
    size: String,
}

impl LlmImageGenerator {
    pub fn new(client: Arc<dyn LlmClient>, size: String) -> Self {
        Self { client, size }
    }
}

#[async_trait]
impl ImageLookup for LlmImageGenerator {
    async fn generate_images(&self, destination: &str) -> Result<Vec<ImageResource>, CollaboratorError> {
        debug!(%destination, "generate_images: called");
        let requests = image_prompts(destination).into_iter().map(|prompt| {
            self.client.generate_image(ImageRequest {
                prompt,
                size: self.size.clone(),
            })
        });
        let results = join_all(requests).await;

        let mut images = Vec::with_capacity(IMAGE_SET_SIZE);
        for (index, (result, subject)) in results.into_iter().zip(IMAGE_SUBJECTS).enumerate() {
            match result {
                Ok(image) => images.push(ImageResource::new(image.source, format!("{destination} {subject}"))),
                Err(e) => warn!(
                    %destination,
                    index = index + 1,
                    status = ?e.status(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Image generation failed, skipping"
                ),
            }
        }
        info!(%destination, generated = images.len(), "Generated destination images");
        Ok(images)
    }
}
