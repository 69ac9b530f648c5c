//! Upstream language-model providers behind one capability trait.
//!
//! The chat assistant only ever talks to [`LanguageModelClient`]. One
//! adapter exists per hosted provider and [`client_from_config`] picks it
//! once at startup:
//!
//! - [`groq::GroqClient`] via rig-core's Groq provider
//! - [`huggingface::HuggingFaceClient`] via the OpenAI-compatible router
//! - [`bedrock::BedrockClient`] via the Bedrock Converse API
//!
//! # Example
//! ```no_run
//! use scolaia_rs::llm::{CompletionRequest, LanguageModelClient, groq::GroqClient};
//! use scolaia_rs::model::chat::ChatTurn;
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), scolaia_rs::llm::UpstreamError> {
//! let key = SecretString::from("gsk_...");
//! let client = GroqClient::new(&key, "llama-3.3-70b-versatile")?;
//! let request = CompletionRequest {
//!     system: "You are a planning assistant.".to_string(),
//!     messages: vec![ChatTurn::user("How can I improve fractions?")],
//!     max_tokens: 500,
//!     temperature: 0.7,
//! };
//! let completion = client.generate(&request).await?;
//! println!("{}", completion.text);
//! # Ok(())
//! # }
//! ```

pub mod bedrock;
pub mod groq;
pub mod huggingface;

use crate::config::{LlmConfig, ProviderConfig};
use crate::model::chat::{ChatTurn, Role};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Why an upstream call produced no usable text.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("provider error: {0}")]
    Provider(String),
}

impl UpstreamError {
    /// Short label for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Malformed(_) => "malformed",
            UpstreamError::Provider(_) => "provider",
        }
    }
}

/// One generation request: system instruction plus the conversation so far.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

/// Text produced by a provider, as returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, input: u64, output: u64) -> Self {
        self.usage = Some(TokenUsage { input, output });
        self
    }
}

/// A hosted language model able to continue a conversation.
#[async_trait]
pub trait LanguageModelClient: Send + Sync {
    /// Provider name reported in telemetry (e.g. `"groq"`).
    fn provider(&self) -> &str;

    /// Model identifier sent upstream.
    fn model(&self) -> &str;

    /// Make exactly one generation call.
    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, UpstreamError>;
}

/// Build the configured provider adapter, or `None` in fallback-only mode.
///
/// # Errors
/// Returns an error if the adapter's HTTP client cannot be constructed.
pub fn client_from_config(
    config: &LlmConfig,
) -> Result<Option<Arc<dyn LanguageModelClient>>, UpstreamError> {
    let Some(provider) = &config.provider else {
        return Ok(None);
    };

    let client: Arc<dyn LanguageModelClient> = match provider {
        ProviderConfig::Groq { api_key, model } => Arc::new(groq::GroqClient::new(api_key, model)?),
        ProviderConfig::HuggingFace {
            api_key,
            model,
            base_url,
        } => Arc::new(huggingface::HuggingFaceClient::new(
            api_key, model, base_url,
        )?),
        ProviderConfig::Bedrock {
            api_key,
            region,
            model_id,
            endpoint,
        } => Arc::new(bedrock::BedrockClient::new(
            api_key,
            region,
            model_id,
            endpoint.as_deref(),
        )?),
    };
    Ok(Some(client))
}

/// Split a conversation into the latest user prompt and the turns before it.
///
/// Turns after the last user turn are dropped. With no user turn at all the
/// prompt is empty and the whole conversation is history.
pub(crate) fn split_last_user(turns: &[ChatTurn]) -> (&str, &[ChatTurn]) {
    match turns.iter().rposition(|t| t.role == Role::User) {
        Some(idx) => (turns[idx].content.as_str(), &turns[..idx]),
        None => ("", turns),
    }
}

fn http_client() -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .user_agent(concat!("scolaia-rs/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(UpstreamError::from)
}

/// Read a response body, turning non-2xx statuses into [`UpstreamError::Status`].
async fn read_success_body(response: reqwest::Response) -> Result<String, UpstreamError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_uses_last_user_turn() {
        let turns = vec![
            ChatTurn::user("first"),
            ChatTurn::assistant("reply"),
            ChatTurn::user("second"),
            ChatTurn::assistant("dangling"),
        ];
        let (prompt, history) = split_last_user(&turns);
        assert_eq!(prompt, "second");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content, "reply");
    }

    #[test]
    fn split_without_user_turn_has_empty_prompt() {
        let turns = vec![ChatTurn::assistant("hello")];
        let (prompt, history) = split_last_user(&turns);
        assert_eq!(prompt, "");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn unconfigured_provider_builds_no_client() {
        let client = client_from_config(&LlmConfig::default()).unwrap();
        assert!(client.is_none());
    }
}
