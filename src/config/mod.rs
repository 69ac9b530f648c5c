//! Typed configuration from environment variables.
//!
//! Loads once at startup. Everything has a default: missing language-model
//! credentials put the chat assistant in fallback-only mode rather than
//! failing. Only malformed values (an unknown provider name, a port that
//! does not parse) are errors.
//! Sensitive values wrapped in secrecy::SecretString to prevent log leaks.

pub mod secrets;

use crate::error::{Error, Result};
use secrecy::SecretString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_HF_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";
pub const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/v1";

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub api_prefix: String,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
    /// JSON catalog replacing the built-in content when set.
    pub catalog_path: Option<PathBuf>,
    pub llm: LlmConfig,
}

/// Settings for the upstream language model used by the chat assistant.
#[derive(Debug)]
pub struct LlmConfig {
    /// `None` means fallback-only mode.
    pub provider: Option<ProviderConfig>,
    /// Provider named by `LLM_PROVIDER` whose credentials were incomplete.
    /// Loading never logs; the caller reports this.
    pub incomplete_provider: Option<ProviderKind>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            incomplete_provider: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Which hosted provider to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    HuggingFace,
    Bedrock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Groq => write!(f, "groq"),
            ProviderKind::HuggingFace => write!(f, "huggingface"),
            ProviderKind::Bedrock => write!(f, "bedrock"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            "bedrock" | "aws-bedrock" => Ok(ProviderKind::Bedrock),
            other => Err(Error::Config(format!(
                "unknown LLM_PROVIDER '{other}' (expected groq, huggingface or bedrock)"
            ))),
        }
    }
}

/// Credentials and model selection for one provider.
#[derive(Debug)]
pub enum ProviderConfig {
    Groq {
        api_key: SecretString,
        model: String,
    },
    HuggingFace {
        api_key: SecretString,
        model: String,
        base_url: String,
    },
    Bedrock {
        api_key: SecretString,
        region: String,
        model_id: String,
        /// Overrides the regional runtime endpoint.
        endpoint: Option<String>,
    },
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Groq { .. } => ProviderKind::Groq,
            ProviderConfig::HuggingFace { .. } => ProviderKind::HuggingFace,
            ProviderConfig::Bedrock { .. } => ProviderKind::Bedrock,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderConfig::Groq { model, .. } => model,
            ProviderConfig::HuggingFace { model, .. } => model,
            ProviderConfig::Bedrock { model_id, .. } => model_id,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("invalid PORT '{raw}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let max_tokens = match var("LLM_MAX_TOKENS") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| Error::Config(format!("invalid LLM_MAX_TOKENS '{raw}': {e}")))?,
            None => DEFAULT_MAX_TOKENS,
        };

        let temperature = match var("LLM_TEMPERATURE") {
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|e| Error::Config(format!("invalid LLM_TEMPERATURE '{raw}': {e}")))?,
            None => DEFAULT_TEMPERATURE,
        };

        let (provider, incomplete_provider) = match var("LLM_PROVIDER") {
            Some(raw) => {
                let kind: ProviderKind = raw.parse()?;
                match provider_from_vars(kind, &var) {
                    Some(provider) => (Some(provider), None),
                    None => (None, Some(kind)),
                }
            }
            None => {
                let provider = [
                    ProviderKind::Groq,
                    ProviderKind::HuggingFace,
                    ProviderKind::Bedrock,
                ]
                .into_iter()
                .find_map(|kind| provider_from_vars(kind, &var));
                (provider, None)
            }
        };

        Ok(Self {
            port,
            api_prefix: var("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
            otel_endpoint: var("OTEL_ENDPOINT"),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
            llm: LlmConfig {
                provider,
                incomplete_provider,
                max_tokens,
                temperature,
            },
        })
    }
}

/// Build a provider config if every credential it needs is present.
fn provider_from_vars<V>(kind: ProviderKind, var: &V) -> Option<ProviderConfig>
where
    V: Fn(&str) -> Option<String>,
{
    match kind {
        ProviderKind::Groq => Some(ProviderConfig::Groq {
            api_key: SecretString::from(var("GROQ_API_KEY")?),
            model: var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
        }),
        ProviderKind::HuggingFace => {
            let key = var("HF_API_KEY").or_else(|| var("HUGGINGFACE_API_KEY"))?;
            Some(ProviderConfig::HuggingFace {
                api_key: SecretString::from(key),
                model: var("HF_MODEL").unwrap_or_else(|| DEFAULT_HF_MODEL.to_string()),
                base_url: var("HF_BASE_URL").unwrap_or_else(|| DEFAULT_HF_BASE_URL.to_string()),
            })
        }
        ProviderKind::Bedrock => Some(ProviderConfig::Bedrock {
            api_key: SecretString::from(var("AWS_BEARER_TOKEN_BEDROCK")?),
            region: var("AWS_REGION")?,
            model_id: var("BEDROCK_MODEL_ID")?,
            endpoint: var("BEDROCK_ENDPOINT"),
        }),
    }
}
