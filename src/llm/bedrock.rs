//! AWS Bedrock adapter.
//!
//! Uses the Converse API with a Bedrock API key sent as a bearer token, so no
//! request signing is needed. Bedrock requires a conversation to open with a
//! user turn; leading assistant turns are dropped.

use super::{
    Completion, CompletionRequest, LanguageModelClient, UpstreamError, http_client,
    read_success_body,
};
use crate::model::chat::Role;
use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub struct BedrockClient {
    http: reqwest::Client,
    api_key: SecretString,
    model_id: String,
    endpoint: Url,
}

impl BedrockClient {
    /// `endpoint` overrides the regional runtime host
    /// (`https://bedrock-runtime.{region}.amazonaws.com`).
    ///
    /// `model_id` may be a plain model id or an inference-profile ARN; it is
    /// sent as a single percent-encoded path segment.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid base URL or the HTTP
    /// client cannot be constructed.
    pub fn new(
        api_key: &SecretString,
        region: &str,
        model_id: impl Into<String>,
        endpoint: Option<&str>,
    ) -> Result<Self, UpstreamError> {
        let base = match endpoint {
            Some(url) => url.to_string(),
            None => format!("https://bedrock-runtime.{region}.amazonaws.com"),
        };
        let model_id = model_id.into();
        Ok(Self {
            http: http_client()?,
            api_key: SecretString::from(api_key.expose_secret()),
            endpoint: converse_url(&base, &model_id)?,
            model_id,
        })
    }

    /// The Converse URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn converse_url(base: &str, model_id: &str) -> Result<Url, UpstreamError> {
    let invalid = || UpstreamError::Provider(format!("invalid Bedrock endpoint '{base}'"));

    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(["model", model_id, "converse"]);
    Ok(url)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConverseBody<'a> {
    system: Vec<TextBlock<'a>>,
    messages: Vec<ConverseMessage<'a>>,
    inference_config: InferenceConfig,
}

#[derive(Serialize)]
struct TextBlock<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct ConverseMessage<'a> {
    role: &'a str,
    content: Vec<TextBlock<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InferenceConfig {
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ConverseReply {
    output: ConverseOutput,
    usage: Option<ConverseUsage>,
}

#[derive(Deserialize)]
struct ConverseOutput {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Vec<ReplyBlock>,
}

#[derive(Deserialize)]
struct ReplyBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConverseUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[async_trait]
impl LanguageModelClient for BedrockClient {
    fn provider(&self) -> &str {
        "aws.bedrock"
    }

    fn model(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, UpstreamError> {
        let messages = request
            .messages
            .iter()
            .skip_while(|turn| turn.role == Role::Assistant)
            .map(|turn| ConverseMessage {
                role: turn.role.as_str(),
                content: vec![TextBlock {
                    text: &turn.content,
                }],
            })
            .collect();

        let body = ConverseBody {
            system: vec![TextBlock {
                text: &request.system,
            }],
            messages,
            inference_config: InferenceConfig {
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let raw = read_success_body(response).await?;

        let reply: ConverseReply =
            serde_json::from_str(&raw).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        let text: String = reply
            .output
            .message
            .ok_or_else(|| UpstreamError::Malformed("converse output has no message".to_string()))?
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect();

        let completion = Completion::new(text);
        Ok(match reply.usage {
            Some(usage) => completion.with_usage(usage.input_tokens, usage.output_tokens),
            None => completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_model_id_builds_regional_url() {
        let url = converse_url(
            "https://bedrock-runtime.eu-central-1.amazonaws.com",
            "anthropic.claude-3-haiku-20240307-v1:0",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://bedrock-runtime.eu-central-1.amazonaws.com/model/anthropic.claude-3-haiku-20240307-v1:0/converse"
        );
    }

    #[test]
    fn profile_arn_stays_one_segment() {
        let url = converse_url(
            "http://localhost:9000/",
            "arn:aws:bedrock:eu-central-1:123456789012:inference-profile/eu.amazon.nova-lite-v1:0",
        )
        .unwrap();
        assert_eq!(
            url.path(),
            "/model/arn:aws:bedrock:eu-central-1:123456789012:inference-profile%2Feu.amazon.nova-lite-v1:0/converse"
        );
    }

    #[test]
    fn garbage_endpoint_is_rejected() {
        assert!(converse_url("not a url", "model").is_err());
    }
}
