//! Metric instrument factories for scolaia-rs.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without an OTLP endpoint the global provider is a no-op.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("scolaia-rs")
}

/// Counter: chat replies produced.
/// Labels: `outcome` ("upstream" | "fallback"), `reason`.
pub fn chat_requests() -> Counter<u64> {
    meter()
        .u64_counter("scolaia.chat.requests")
        .with_description("Number of chat replies produced")
        .build()
}

/// Histogram: upstream model call duration in milliseconds.
/// Labels: `provider`.
pub fn upstream_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("scolaia.chat.upstream_duration_ms")
        .with_description("Upstream language model call duration in milliseconds")
        .with_unit("ms")
        .build()
}

/// Counter: search queries served.
/// Labels: `surface` ("global" | collection name), `matched` ("true" | "false").
pub fn search_queries() -> Counter<u64> {
    meter()
        .u64_counter("scolaia.search.queries")
        .with_description("Number of search queries served")
        .build()
}
