//! Bedrock completion client
//!
//! Implements `CompletionClient` against the Bedrock runtime `InvokeModel`
//! API using the Anthropic messages body format. Signing and credentials come
//! from the AWS SDK: an explicit key pair when both halves are configured,
//! otherwise the SDK default chain (environment, shared config/credentials
//! files, web identity, SSO, container and instance-profile credentials).

use super::traits::{CompletionClient, CompletionError};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::{Credentials, Region};
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_bedrockruntime::primitives::Blob;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Settings for [`BedrockCompletionClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockConfig {
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    /// Overrides the regional Bedrock runtime endpoint.
    pub endpoint_url: Option<String>,
    /// Total operation timeout; `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            access_key: None,
            secret_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            endpoint_url: None,
            request_timeout_secs: None,
        }
    }
}

impl BedrockConfig {
    /// The explicit key pair, when both halves are non-blank.
    pub fn static_credentials(&self) -> Option<Credentials> {
        let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        match (non_blank(&self.access_key), non_blank(&self.secret_key)) {
            (Some(access), Some(secret)) => {
                Some(Credentials::new(access, secret, None, None, "static"))
            }
            _ => None,
        }
    }

    fn endpoint_override(&self) -> Option<String> {
        self.endpoint_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

/// Anthropic messages request as accepted by Bedrock.
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<TextBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct TextBlock<'a> {
    r#type: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Completion client for Anthropic Claude models hosted on AWS Bedrock.
///
/// Cheap to clone (shares the SDK client).
#[derive(Clone)]
pub struct BedrockCompletionClient {
    client: aws_sdk_bedrockruntime::Client,
    config: BedrockConfig,
}

impl BedrockCompletionClient {
    /// Build the SDK client. Credentials are not resolved until the first call.
    pub async fn new(config: BedrockConfig) -> Result<Self> {
        let static_credentials = config.static_credentials();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());
        if let Some(credentials) = static_credentials.clone() {
            loader = loader.credentials_provider(credentials);
        }
        if let Some(secs) = config.request_timeout_secs {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }
        let sdk_config = loader.load().await;

        let mut client_config = aws_sdk_bedrockruntime::config::Builder::from(&sdk_config);
        if let Some(endpoint) = config.endpoint_override() {
            client_config = client_config.endpoint_url(endpoint);
        }
        let client = aws_sdk_bedrockruntime::Client::from_conf(client_config.build());

        tracing::info!(
            model = %config.model_id,
            region = %config.region,
            static_credentials = static_credentials.is_some(),
            "Bedrock completion client configured"
        );

        Ok(Self { client, config })
    }

    async fn invoke(&self, message: &str) -> Result<String> {
        let body = serde_json::to_vec(&InvokeRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content: vec![TextBlock {
                    r#type: "text",
                    text: message,
                }],
            }],
        })
        .context("Failed to serialize Bedrock request")?;

        let output = self
            .client
            .invoke_model()
            .model_id(&self.config.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| match e.as_service_error() {
                Some(service) => anyhow!(
                    "Bedrock error ({}): {}",
                    service.code().unwrap_or("unknown"),
                    service.message().unwrap_or_default()
                ),
                None => anyhow!("Bedrock request failed: {}", DisplayErrorContext(&e)),
            })?;

        let resp: InvokeResponse = serde_json::from_slice(output.body().as_ref())
            .context("Failed to parse Bedrock response")?;

        resp.content
            .into_iter()
            .find(|block| block.r#type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| anyhow!("Bedrock response contained no text block"))
    }
}

#[async_trait]
impl CompletionClient for BedrockCompletionClient {
    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        self.invoke(message).await.map_err(|e| {
            tracing::warn!(model = %self.config.model_id, error = %format!("{:#}", e), "Model call failed");
            CompletionError::from(e)
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model_id
    }
}
