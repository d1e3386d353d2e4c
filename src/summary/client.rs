use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AiConfig;

/// Sampling temperature for summary generation.
const TEMPERATURE: f64 = 0.7;

/// Output-length cap for the generated summary.
const MAX_TOKENS: u32 = 150;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request to text-generation service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text-generation service returned no choices")]
    EmptyResponse,
}

/// Client for an external text-generation service.
///
/// Implementations must be `Send + Sync`; handlers hold them behind an
/// `Arc` in managed state. Tests substitute a stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one two-message exchange and returns the reply text.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, GenerationError>;
}

/// OpenAI-compatible chat-completions client.
#[derive(Debug)]
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(config: &AiConfig) -> OpenAiGenerator {
        OpenAiGenerator {
            client: Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
struct Request {
    model: String,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize, Debug)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

fn build_request(model: &str, system_prompt: &str, user_prompt: &str) -> Request {
    Request {
        model: model.to_string(),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        messages: vec![
            Message {
                role: "system",
                content: system_prompt.to_string(),
            },
            Message {
                role: "user",
                content: user_prompt.to_string(),
            },
        ],
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, GenerationError> {
        let request = build_request(&self.model, system_prompt, user_prompt);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Response>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_fixed_sampling_parameters() {
        let request = build_request("gpt-4o-mini", "You are a helpful assistant.", "Summarize.");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 150);
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Summarize.");
    }

    #[test]
    fn response_parses_first_choice() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "All done!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "All done!");
    }

    #[test]
    fn response_without_choices_field_is_malformed() {
        let result: Result<Response, _> = serde_json::from_str(r#"{"model": "gpt-4o-mini"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = AiConfig {
            api_key: "key".to_string(),
            api_base: "http://localhost:8080/v1/".to_string(),
            model: "gpt-4o-mini".to_string(),
        };

        let generator = OpenAiGenerator::new(&config);
        assert_eq!(generator.api_base, "http://localhost:8080/v1");
    }
}
