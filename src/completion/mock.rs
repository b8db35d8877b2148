//! Mock completion client for tests
//!
//! Records every message it is asked to complete and answers from a script:
//! either a fixed reply, an echo of the message, or a `ModelUnavailable`
//! failure. No network access.

use super::traits::{CompletionClient, CompletionError};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Echo,
    Fail(String),
}

/// Scripted completion client.
///
/// # Example
///
/// ```rust
/// use note_assistant::completion::{CompletionClient, MockCompletionClient};
///
/// # tokio_test::block_on(async {
/// let client = MockCompletionClient::with_reply("42");
/// assert_eq!(client.complete("What is the answer?").await.unwrap(), "42");
/// assert_eq!(client.messages(), vec!["What is the answer?".to_string()]);
/// # });
/// ```
#[derive(Debug)]
pub struct MockCompletionClient {
    script: Mutex<Script>,
    messages: Mutex<Vec<String>>,
}

impl MockCompletionClient {
    /// Client that echoes each message back.
    pub fn new() -> Self {
        Self::scripted(Script::Echo)
    }

    /// Client that always answers `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::scripted(Script::Reply(reply.into()))
    }

    /// Client whose every call fails with `ModelUnavailable(reason)`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(Script::Fail(reason.into()))
    }

    fn scripted(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Switch to a fixed reply for subsequent calls.
    pub fn set_reply(&self, reply: impl Into<String>) {
        *self.script.lock().unwrap_or_else(|e| e.into_inner()) = Script::Reply(reply.into());
    }

    /// Switch to failing for subsequent calls.
    pub fn set_failure(&self, reason: impl Into<String>) {
        *self.script.lock().unwrap_or_else(|e| e.into_inner()) = Script::Fail(reason.into());
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());

        let script = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match script {
            Script::Reply(reply) => Ok(reply),
            Script::Echo => Ok(message.to_string()),
            Script::Fail(reason) => Err(CompletionError::ModelUnavailable(reason)),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_by_default() {
        let client = MockCompletionClient::new();
        assert_eq!(client.complete("ping").await.unwrap(), "ping");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_too() {
        let client = MockCompletionClient::failing("offline");
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err, CompletionError::ModelUnavailable("offline".to_string()));
        assert_eq!(client.messages(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_script_can_change() {
        let client = MockCompletionClient::with_reply("a");
        assert_eq!(client.complete("1").await.unwrap(), "a");

        client.set_failure("down");
        assert!(client.complete("2").await.is_err());

        client.set_reply("b");
        assert_eq!(client.complete("3").await.unwrap(), "b");
        assert_eq!(client.call_count(), 3);
    }
}
