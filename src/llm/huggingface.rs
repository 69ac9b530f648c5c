//! Hugging Face adapter.
//!
//! Talks to the OpenAI-compatible chat completions route of the Hugging Face
//! inference router (`{base_url}/chat/completions`).

use super::{
    Completion, CompletionRequest, LanguageModelClient, UpstreamError, http_client,
    read_success_body,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
}

impl HuggingFaceClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        api_key: &SecretString,
        model: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: http_client()?,
            api_key: SecretString::from(api_key.expose_secret()),
            model: model.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[async_trait]
impl LanguageModelClient for HuggingFaceClient {
    fn provider(&self) -> &str {
        "huggingface"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, UpstreamError> {
        let messages = std::iter::once(WireMessage {
            role: "system",
            content: &request.system,
        })
        .chain(request.messages.iter().map(|turn| WireMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        }))
        .collect();

        let body = ChatCompletionBody {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let raw = read_success_body(response).await?;

        let reply: ChatCompletionReply =
            serde_json::from_str(&raw).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        let text = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| UpstreamError::Malformed("no message content in choices".to_string()))?;

        let completion = Completion::new(text);
        Ok(match reply.usage {
            Some(usage) => completion.with_usage(usage.prompt_tokens, usage.completion_tokens),
            None => completion,
        })
    }
}
