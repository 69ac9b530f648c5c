//! Chat Response Builder for the planning assistant.
//!
//! Per call: with no upstream client configured the reply comes straight
//! from the [`FallbackGenerator`]. Otherwise one upstream call is made; a
//! non-blank result is returned verbatim and anything else (error, blank
//! text) is logged and replaced by the fallback. Nothing is retried and no
//! error reaches the caller.

pub mod conversation;
pub mod fallback;
pub mod language;

pub use conversation::{Clock, Conversation, IdGenerator, MessageFactory, SystemClock, UuidIds};
pub use fallback::{FallbackGenerator, RandomPicker, StrategyPicker};
pub use language::Language;

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, LlmConfig};
use crate::llm::{CompletionRequest, LanguageModelClient};
use crate::model::chat::{ChatResponse, ChatTurn, last_user_content};
use crate::telemetry::{genai, metrics};
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

const ASSISTANT_PERSONA: &str = "You are Scolaia AI, an AI assistant for the Scolaia educational platform in Germany. Provide helpful, concise, and actionable recommendations.";

const LANGUAGE_RULE: &str = "Always respond in the SAME language as the user's question. If asked in English, answer in English. If asked in German, answer in German.";

const FORMATTING_RULES: &str = "FORMATTING INSTRUCTIONS:
- Use **bold** (markdown format with double asterisks) for key sentences, important concepts, or emphasized words
- Bold the most important takeaways and action items
- Use bold to highlight specific terms, strategies, or recommendations";

/// System instruction sent ahead of the conversation.
pub fn system_prompt(language: Language) -> String {
    format!(
        "{ASSISTANT_PERSONA}\n\n{}\n\n{LANGUAGE_RULE}\n\n{FORMATTING_RULES}",
        language.instruction()
    )
}

/// Produces assistant replies, preferring the upstream model.
#[derive(Clone)]
pub struct ChatResponseBuilder {
    client: Option<Arc<dyn LanguageModelClient>>,
    fallback: FallbackGenerator,
    ids: Arc<dyn IdGenerator>,
    max_tokens: u32,
    temperature: f32,
}

impl ChatResponseBuilder {
    /// `None` means fallback-only mode: no network call is ever attempted.
    pub fn new(client: Option<Arc<dyn LanguageModelClient>>) -> Self {
        Self {
            client,
            fallback: FallbackGenerator::default(),
            ids: Arc::new(UuidIds),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Builder using the output limits from `config`.
    pub fn from_config(client: Option<Arc<dyn LanguageModelClient>>, config: &LlmConfig) -> Self {
        Self::new(client).with_limits(config.max_tokens, config.temperature)
    }

    pub fn with_picker(mut self, picker: Arc<dyn StrategyPicker>) -> Self {
        self.fallback = FallbackGenerator::new(picker);
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_limits(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Reply to a single prompt.
    pub async fn respond_to_prompt(&self, prompt: &str) -> ChatResponse {
        self.respond(&[ChatTurn::user(prompt)]).await
    }

    /// Reply to a conversation ending in the latest user turn.
    pub async fn respond(&self, turns: &[ChatTurn]) -> ChatResponse {
        let prompt = last_user_content(turns);
        let language = Language::detect(prompt);

        let Some(client) = &self.client else {
            tracing::debug!("no upstream model configured, using fallback");
            return self.fallback_response(prompt, language, "unconfigured");
        };

        let request = CompletionRequest {
            system: system_prompt(language),
            messages: turns.to_vec(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let span = genai::start_chat_span(client.model(), client.provider());
        tracing::info!(
            parent: &span,
            language = language.as_str(),
            turns = turns.len(),
            "calling upstream model"
        );

        let started = Instant::now();
        let result = client.generate(&request).instrument(span.clone()).await;
        metrics::upstream_duration_ms().record(
            started.elapsed().as_secs_f64() * 1000.0,
            &[KeyValue::new("provider", client.provider().to_string())],
        );

        match result {
            Ok(completion) if !completion.text.trim().is_empty() => {
                if let Some(usage) = completion.usage {
                    genai::record_token_usage(&span, usage.input, usage.output);
                }
                genai::record_outcome(&span, "success");
                tracing::info!(
                    parent: &span,
                    reply_chars = completion.text.chars().count(),
                    "upstream reply received"
                );
                metrics::chat_requests().add(
                    1,
                    &[
                        KeyValue::new("outcome", "upstream"),
                        KeyValue::new("reason", "ok"),
                    ],
                );
                ChatResponse {
                    id: self.ids.next_id("assistant"),
                    reply: completion.text,
                }
            }
            Ok(_) => {
                genai::record_outcome(&span, "empty");
                tracing::warn!(parent: &span, "upstream reply was blank, using fallback");
                self.fallback_response(prompt, language, "empty")
            }
            Err(e) => {
                genai::record_outcome(&span, "error");
                tracing::warn!(
                    parent: &span,
                    error = %e,
                    reason = e.reason(),
                    "upstream call failed, using fallback"
                );
                self.fallback_response(prompt, language, e.reason())
            }
        }
    }

    fn fallback_response(
        &self,
        prompt: &str,
        language: Language,
        reason: &'static str,
    ) -> ChatResponse {
        metrics::chat_requests().add(
            1,
            &[
                KeyValue::new("outcome", "fallback"),
                KeyValue::new("reason", reason),
            ],
        );
        ChatResponse {
            id: self.ids.next_id("assistant"),
            reply: self.fallback.generate(prompt, language),
        }
    }
}
