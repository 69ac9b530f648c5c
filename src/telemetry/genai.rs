//! Span helpers for upstream chat calls.
//!
//! Attribute names follow the OpenTelemetry GenAI conventions; the extra
//! `scolaia.chat.outcome` field is "success", "empty" or "error".

use tracing::Span;

/// Start a span for one upstream chat completion.
///
/// Token usage and outcome are declared empty and filled in later via
/// [`record_token_usage`] and [`record_outcome`].
pub fn start_chat_span(model: &str, provider: &str) -> Span {
    tracing::info_span!(
        "gen_ai.chat",
        "gen_ai.operation.name" = "chat",
        "gen_ai.request.model" = model,
        "gen_ai.provider.name" = provider,
        "gen_ai.usage.input_tokens" = tracing::field::Empty,
        "gen_ai.usage.output_tokens" = tracing::field::Empty,
        "scolaia.chat.outcome" = tracing::field::Empty,
    )
}

/// Record token usage on a span from [`start_chat_span`].
pub fn record_token_usage(span: &Span, input: u64, output: u64) {
    span.record("gen_ai.usage.input_tokens", input);
    span.record("gen_ai.usage.output_tokens", output);
}

/// Record how the upstream call ended.
pub fn record_outcome(span: &Span, outcome: &str) {
    span.record("scolaia.chat.outcome", outcome);
}
