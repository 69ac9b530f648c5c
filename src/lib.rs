//! # scolaia-rs
//!
//! Backend for the Scolaia education platform.
//!
//! Serves the curated content catalog (activities, community topics,
//! partner resources, teacher profiles, events), keyword search across it,
//! and a planning assistant that asks a hosted language model (Groq,
//! Hugging Face, or AWS Bedrock) and falls back to canned suggestions.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod search;
pub mod server;
pub mod telemetry;
