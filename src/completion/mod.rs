//! Text completion against a hosted model
//!
//! Follows the project pattern (trait + impl + mock):
//! - `CompletionClient` trait: one user message in, reply text out
//! - `BedrockCompletionClient`: Anthropic Claude on the AWS Bedrock runtime
//!   through the AWS SDK, with an explicit key pair or the default chain
//! - `MockCompletionClient`: scripted replies for tests

pub mod bedrock;
pub mod mock;
pub mod traits;

pub use bedrock::{BedrockCompletionClient, BedrockConfig};
pub use mock::MockCompletionClient;
pub use traits::{CompletionClient, CompletionError};
