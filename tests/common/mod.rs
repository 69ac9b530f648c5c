//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use scolaia_rs::chat::{Clock, IdGenerator, StrategyPicker};
use scolaia_rs::llm::{Completion, CompletionRequest, LanguageModelClient, UpstreamError};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// What a [`ScriptedClient`] does when called.
pub enum Script {
    Reply(String),
    Fail,
    Panic,
}

/// Language model double that records every call.
pub struct ScriptedClient {
    script: Script,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(Script::Fail)
    }

    pub fn panicking() -> Self {
        Self::new(Script::Panic)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModelClient for ScriptedClient {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(Completion::new(text.clone()).with_usage(42, 7)),
            Script::Fail => Err(UpstreamError::Provider("upstream exploded".to_string())),
            Script::Panic => panic!("scripted client panicked"),
        }
    }
}

/// Always picks the first `count` strategies of the pool.
pub struct FirstPicker;

impl StrategyPicker for FirstPicker {
    fn pick(&self, pool: &[&'static str], count: usize) -> Vec<&'static str> {
        pool.iter().take(count).copied().collect()
    }
}

/// `{prefix}-1`, `{prefix}-2`, ... shared across prefixes.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_noon() -> Self {
        Self(Utc.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
