//! CompletionClient trait definition
//!
//! Defines the abstract interface for single-turn text completion against a
//! hosted model. Follows the same pattern as `NoteStore`: async trait +
//! Send + Sync for `Arc<dyn CompletionClient>` usage.

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a completion client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The model call failed: credentials, transport, API error or an
    /// unusable response body.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
}

impl From<anyhow::Error> for CompletionError {
    fn from(err: anyhow::Error) -> Self {
        CompletionError::ModelUnavailable(format!("{:#}", err))
    }
}

/// Abstract interface for sending one user message to a hosted model.
///
/// # Implementations
///
/// - [`BedrockCompletionClient`](super::BedrockCompletionClient): Anthropic
///   Claude models on the AWS Bedrock runtime
/// - [`MockCompletionClient`](super::MockCompletionClient): records messages
///   and returns scripted replies (for tests)
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `message` as a single user turn and return the text of the
    /// first content block of the reply.
    ///
    /// No retries: any failure is reported as
    /// [`CompletionError::ModelUnavailable`].
    async fn complete(&self, message: &str) -> Result<String, CompletionError>;

    /// Identifier of the model answering requests.
    fn model_name(&self) -> &str;
}
