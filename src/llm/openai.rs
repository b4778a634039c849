//! OpenAI-compatible chat-completions client.
//!
//! Any endpoint speaking the `/v1/chat/completions` request/response shape
//! works (OpenAI, Azure-style proxies, local servers); the URL and model come
//! from `LlmConfig`.

use super::{LanguageModel, LlmError};
use crate::config::LlmConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Transport attempts for transient failures (network, 5xx, 429).
const MAX_TRANSPORT_RETRIES: u32 = 3;

pub struct OpenAiClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.provider_url.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Build a client whose API key is read from `config.api_key_env`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => Ok(Self::new(config, key)),
            _ => Err(LlmError::NotConfigured(config.api_key_env.clone())),
        }
    }

    fn request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = self.request(prompt);
        let mut last_error = None;

        for attempt in 0..MAX_TRANSPORT_RETRIES {
            if attempt > 0 {
                // 2s, 4s
                let delay = Duration::from_secs(1 << attempt);
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    warn!(attempt = attempt + 1, error = %e, "chat request failed");
                    last_error = Some(LlmError::Network(e.to_string()));
                    continue;
                },
            };

            let status = response.status();
            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                warn!(attempt = attempt + 1, status = status.as_u16(), "transient API error");
                last_error = Some(LlmError::Status {
                    status: status.as_u16(),
                    body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| LlmError::Network(e.to_string()))?;
            let content = completion_text(&body)?;
            debug!(model = %self.model, chars = content.len(), "completion received");
            return Ok(content);
        }

        Err(last_error.unwrap_or_else(|| LlmError::Network("max retries exceeded".to_string())))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Extract the first choice's message text from a response body.
fn completion_text(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(LlmError::EmptyCompletion)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let client = OpenAiClient::new(&LlmConfig::default(), "sk-test".to_string());
        let json = serde_json::to_value(client.request("Outline a deck")).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Outline a deck");
        assert_eq!(json["max_tokens"], 4096);
    }

    #[test]
    fn test_completion_text() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  [{\"title\":\"A\"}]\n"}}]}"#;
        assert_eq!(completion_text(body).unwrap(), r#"[{"title":"A"}]"#);
    }

    #[test]
    fn test_empty_or_malformed_completion() {
        assert!(matches!(
            completion_text(r#"{"choices":[]}"#),
            Err(LlmError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_text(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(LlmError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_text("<html>bad gateway</html>"),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_api_key() {
        let config = LlmConfig {
            api_key_env: "SLIDEWRIGHT_TEST_UNSET_KEY".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            OpenAiClient::from_config(&config),
            Err(LlmError::NotConfigured(_))
        ));
    }
}
