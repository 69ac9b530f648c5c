//! Conversation history and the capabilities that stamp messages.
//!
//! Identifiers and timestamps come from injected [`IdGenerator`] and
//! [`Clock`] implementations so callers can make them deterministic.

use crate::model::chat::{ChatMessage, ChatTurn, Role};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Greeting shown before the user has asked anything.
pub const DEFAULT_GREETING: &str = "Describe a classroom challenge and Scolaia AI will suggest a few strategies you can remix straight away.";

pub trait IdGenerator: Send + Sync {
    /// A fresh identifier starting with `prefix`.
    fn next_id(&self, prefix: &str) -> String;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// `{prefix}-{uuid v4}` identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Builds [`ChatMessage`]s with identity and creation time.
#[derive(Clone)]
pub struct MessageFactory {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new(Arc::new(UuidIds), Arc::new(SystemClock))
    }
}

impl MessageFactory {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    pub fn message(&self, role: Role, content: impl Into<String>) -> ChatMessage {
        ChatMessage {
            id: self.ids.next_id(role.as_str()),
            role,
            content: content.into(),
            timestamp: self.clock.now(),
        }
    }

    pub fn user(&self, content: impl Into<String>) -> ChatMessage {
        self.message(Role::User, content)
    }

    pub fn assistant(&self, content: impl Into<String>) -> ChatMessage {
        self.message(Role::Assistant, content)
    }
}

/// Ordered, append-only chat history for one session.
pub struct Conversation {
    factory: MessageFactory,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(factory: MessageFactory) -> Self {
        Self {
            factory,
            messages: Vec::new(),
        }
    }

    /// A conversation opened by the assistant's [`DEFAULT_GREETING`].
    pub fn with_greeting(factory: MessageFactory) -> Self {
        let mut conversation = Self::new(factory);
        conversation.push_assistant(DEFAULT_GREETING);
        conversation
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        let message = self.factory.user(content);
        self.push(message)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        let message = self.factory.assistant(content);
        self.push(message)
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Role + content pairs, in order, for replaying upstream.
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.messages.iter().map(ChatMessage::turn).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
