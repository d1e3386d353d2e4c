use std::env;

/// Model used when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat-completions endpoint base used when `OPENAI_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Settings for the external text-generation service, read once at
/// startup and handed to the client constructor.
///
/// A missing `OPENAI_API_KEY` is not an error here: the outbound call
/// will be rejected by the service and the summary endpoint serves its
/// fallback string instead.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl AiConfig {
    pub fn from_env() -> AiConfig {
        AiConfig {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            api_base: env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}
