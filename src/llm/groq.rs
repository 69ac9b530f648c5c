//! Groq adapter via rig-core.

use super::{Completion, CompletionRequest, LanguageModelClient, UpstreamError, split_last_user};
use crate::model::chat::{ChatTurn, Role};
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::{Chat, Message};
use secrecy::{ExposeSecret, SecretString};

pub struct GroqClient {
    client: rig::providers::groq::Client,
    model: String,
}

impl GroqClient {
    /// Create a Groq client from a secret API key.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api_key: &SecretString, model: impl Into<String>) -> Result<Self, UpstreamError> {
        let client = rig::providers::groq::Client::new(api_key.expose_secret())
            .map_err(|e| UpstreamError::Provider(format!("failed to build Groq client: {e}")))?;
        Ok(Self {
            client,
            model: model.into(),
        })
    }
}

fn to_rig_message(turn: &ChatTurn) -> Message {
    match turn.role {
        Role::User => Message::user(turn.content.clone()),
        Role::Assistant => Message::assistant(turn.content.clone()),
    }
}

#[async_trait]
impl LanguageModelClient for GroqClient {
    fn provider(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, UpstreamError> {
        let (prompt, history) = split_last_user(&request.messages);
        let history: Vec<Message> = history.iter().map(to_rig_message).collect();

        let agent = self
            .client
            .agent(&self.model)
            .preamble(&request.system)
            .max_tokens(u64::from(request.max_tokens))
            .temperature(f64::from(request.temperature))
            .build();

        let text = agent
            .chat(prompt.to_string(), history)
            .await
            .map_err(|e| UpstreamError::Provider(e.to_string()))?;
        Ok(Completion::new(text))
    }
}
