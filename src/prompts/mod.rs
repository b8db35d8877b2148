//! Canned prompts
//!
//! Four fixed templates, each forwarded to the completion client as a single
//! user message. The input is substituted verbatim.

use crate::completion::{CompletionClient, CompletionError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The four supported prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Summarize,
    Ideas,
    Improve,
    Answer,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Summarize,
        PromptKind::Ideas,
        PromptKind::Improve,
        PromptKind::Answer,
    ];

    /// Text placed in front of the user's input.
    pub fn preamble(self) -> &'static str {
        match self {
            PromptKind::Summarize => "Please summarize the following text in a concise manner: ",
            PromptKind::Ideas => "Generate 5 creative ideas related to the following topic: ",
            PromptKind::Improve => {
                "Please improve the following text by making it more clear, concise, and engaging: "
            }
            PromptKind::Answer => {
                "Please answer the following question in a helpful and informative way: "
            }
        }
    }

    /// Build the message sent to the model.
    pub fn render(self, input: &str) -> String {
        format!("{}{}", self.preamble(), input)
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PromptKind::Summarize => "summarize",
            PromptKind::Ideas => "ideas",
            PromptKind::Improve => "improve",
            PromptKind::Answer => "answer",
        };
        f.write_str(name)
    }
}

/// Runs the canned prompts against a completion client.
#[derive(Clone)]
pub struct PromptService {
    client: Arc<dyn CompletionClient>,
}

impl PromptService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Render `kind` with `input`, make exactly one model call and return the
    /// reply unchanged.
    pub async fn run(&self, kind: PromptKind, input: &str) -> Result<String, CompletionError> {
        let message = kind.render(input);
        tracing::debug!(
            prompt = %kind,
            model = %self.client.model_name(),
            input_len = input.len(),
            "Sending prompt"
        );
        self.client.complete(&message).await
    }

    pub async fn summarize(&self, text: &str) -> Result<String, CompletionError> {
        self.run(PromptKind::Summarize, text).await
    }

    pub async fn ideate(&self, topic: &str) -> Result<String, CompletionError> {
        self.run(PromptKind::Ideas, topic).await
    }

    pub async fn improve(&self, text: &str) -> Result<String, CompletionError> {
        self.run(PromptKind::Improve, text).await
    }

    pub async fn answer(&self, question: &str) -> Result<String, CompletionError> {
        self.run(PromptKind::Answer, question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::MockCompletionClient;

    fn service(client: MockCompletionClient) -> (PromptService, Arc<MockCompletionClient>) {
        let client = Arc::new(client);
        (PromptService::new(client.clone()), client)
    }

    #[tokio::test]
    async fn test_each_prompt_sends_exact_message() {
        let (service, client) = service(MockCompletionClient::with_reply("ok"));

        service.summarize("Long text").await.unwrap();
        service.ideate("gardening").await.unwrap();
        service.improve("me write good").await.unwrap();
        service.answer("Why is the sky blue?").await.unwrap();

        assert_eq!(
            client.messages(),
            vec![
                "Please summarize the following text in a concise manner: Long text".to_string(),
                "Generate 5 creative ideas related to the following topic: gardening".to_string(),
                "Please improve the following text by making it more clear, concise, and engaging: me write good".to_string(),
                "Please answer the following question in a helpful and informative way: Why is the sky blue?".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_reply_is_returned_unchanged() {
        let reply = "  Summary:\n- point one\n- point two\n";
        let (service, _) = service(MockCompletionClient::with_reply(reply));
        assert_eq!(service.summarize("x").await.unwrap(), reply);
    }

    #[tokio::test]
    async fn test_input_is_not_sanitized() {
        let (service, client) = service(MockCompletionClient::new());
        let input = "{text} \"quoted\"\n\tand ünïcode";
        let result = service.answer(input).await.unwrap();
        assert_eq!(result, PromptKind::Answer.render(input));
        assert!(client.messages()[0].ends_with(input));
    }

    #[tokio::test]
    async fn test_failure_propagates_after_one_call() {
        for kind in PromptKind::ALL {
            let (service, client) = service(MockCompletionClient::failing("throttled"));
            let err = service.run(kind, "input").await.unwrap_err();
            assert_eq!(
                err,
                CompletionError::ModelUnavailable("throttled".to_string())
            );
            assert_eq!(client.call_count(), 1, "{} retried", kind);
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PromptKind::Ideas.to_string(), "ideas");
        assert_eq!(
            serde_json::from_str::<PromptKind>("\"summarize\"").unwrap(),
            PromptKind::Summarize
        );
    }
}
