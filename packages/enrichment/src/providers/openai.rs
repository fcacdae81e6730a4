//! OpenAI implementation of the completion provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use enrichment::providers::OpenAI;
//! use enrichment::security::ProviderCredentials;
//!
//! let provider = OpenAI::new(ProviderCredentials::from_env("OPENAI_API_KEY"))
//!     .with_model("gpt-4o");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::providers::{CompletionProvider, ProviderKind};
use crate::security::ProviderCredentials;

/// Chat model used unless overridden.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature, pinned low for reproducible extraction.
const TEMPERATURE: f32 = 0.1;

/// OpenAI chat-completions client.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    credentials: ProviderCredentials,
    model: String,
    base_url: String,
}

impl OpenAI {
    /// Create a client with the given credentials.
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    ///
    /// An unset or placeholder key still yields a client; it reports
    /// itself unusable and every call fails with `MissingCredential`.
    pub fn from_env() -> Self {
        Self::new(ProviderCredentials::from_env("OPENAI_API_KEY"))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl CompletionProvider for OpenAI {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_usable()
    }

    async fn complete(&self, system: &str, user: &str) -> ProviderResult<String> {
        let api_key = self.credentials.usable_key().ok_or_else(|| {
            ProviderError::MissingCredential {
                provider: self.kind().as_str().to_string(),
            }
        })?;

        let request = ChatRequest {
            model: self.model.clone(),
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(ProviderError::QuotaExceeded {
                    provider: self.kind().as_str().to_string(),
                });
            }
            return Err(ProviderError::Http {
                status: status.as_u16(),
                message: snippet(&body),
            });
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(|e| ProviderError::Parse {
                reason: format!("malformed chat response: {e}"),
            })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Parse {
                reason: "no choices in response".to_string(),
            })
    }
}

/// First part of a (possibly long) error body, enough to classify it.
fn snippet(body: &str) -> String {
    body.chars().take(300).collect()
}

// Request/Response types

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let provider = OpenAI::new(ProviderCredentials::new("sk-test"))
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.example/v1");

        assert_eq!(provider.model, "gpt-4o");
        assert_eq!(provider.base_url, "https://custom.api.example/v1");
        assert!(provider.is_configured());
        assert_eq!(provider.kind(), ProviderKind::OpenAI);
    }

    #[test]
    fn test_placeholder_key_reports_unconfigured() {
        let provider = OpenAI::new(ProviderCredentials::new("your_openai_api_key_here"));
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_complete_without_key_fails_fast() {
        let provider = OpenAI::new(ProviderCredentials::unconfigured());
        let err = provider.complete("system", "user").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential { .. }));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            temperature: TEMPERATURE,
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: "be brief".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
    }
}
