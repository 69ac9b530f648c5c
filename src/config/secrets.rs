//! Secret handling utilities.
//!
//! Re-exports secrecy types and provides helpers for reporting secrets
//! in diagnostics without leaking them.

pub use secrecy::{ExposeSecret, SecretString};

/// Describe whether a secret is present, for startup logging.
///
/// Never reveals any part of the value.
pub fn presence(secret: Option<&SecretString>) -> &'static str {
    match secret {
        Some(s) if !s.expose_secret().is_empty() => "set",
        _ => "not set",
    }
}
