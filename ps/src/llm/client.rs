//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, GeneratedImage, ImageRequest, LlmError};

/// Stateless LLM client - each call is independent
///
/// The packing prompts are single-shot: every request carries the full trip
/// context, so no conversation state is kept between calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Generate one image from a text prompt
    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::llm::{StopReason, TokenUsage};

    /// Mock LLM client for unit tests
    ///
    /// Text replies are handed out in order; image prompts containing any of
    /// `failing_image_markers` fail, every other image prompt succeeds.
    pub struct MockLlmClient {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        failing_image_markers: Vec<String>,
        prompts: Mutex<Vec<CompletionRequest>>,
        image_calls: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                failing_image_markers: Vec::new(),
                prompts: Mutex::new(Vec::new()),
                image_calls: AtomicUsize::new(0),
            }
        }

        pub fn with_failing_images(mut self, markers: &[&str]) -> Self {
            self.failing_image_markers = markers.iter().map(|m| m.to_string()).collect();
            self
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn image_calls(&self) -> usize {
            self.image_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.prompts.lock().unwrap().push(request);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LlmError::InvalidResponse("No more mock responses".to_string())))?;
            Ok(CompletionResponse {
                content: Some(reply),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        }

        async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, LlmError> {
            let n = self.image_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_image_markers.iter().any(|m| request.prompt.contains(m.as_str())) {
                return Err(LlmError::Api {
                    status: 500,
                    message: "image failed".to_string(),
                });
            }
            Ok(GeneratedImage {
                source: format!("data:image/png;base64,MOCK{n}"),
            })
        }
    }

    mod tests {
        use super::*;

        fn request() -> CompletionRequest {
            CompletionRequest {
                system_prompt: "Test".to_string(),
                messages: vec![],
                max_tokens: 100,
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockLlmClient::new(vec![Ok("one".to_string()), Ok("two".to_string())]);

            let first = client.complete(request()).await.unwrap();
            assert_eq!(first.content.as_deref(), Some("one"));
            let second = client.complete(request()).await.unwrap();
            assert_eq!(second.content.as_deref(), Some("two"));
            assert_eq!(client.requests().len(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            assert!(client.complete(request()).await.is_err());
        }
    }
}
