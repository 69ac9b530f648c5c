//! Core data model.
//!
//! Content records are the curated catalogs the platform exposes (activities,
//! blog posts, community topics, partner resources, teacher profiles,
//! events). They are loaded once and never mutated. Chat types describe the
//! planning-assistant conversation.

pub mod chat;
pub mod content;

/// Free-form label attached to a content record.
pub type Tag = String;
