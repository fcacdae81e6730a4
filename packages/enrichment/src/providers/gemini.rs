//! Google Gemini implementation of the completion provider.
//!
//! Secondary provider, used when OpenAI reports quota exhaustion.
//! Talks to the `generateContent` REST endpoint directly; no SDK.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::providers::{CompletionProvider, ProviderKind};
use crate::security::ProviderCredentials;

/// Model used unless overridden.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Sampling temperature, pinned low for reproducible extraction.
const TEMPERATURE: f32 = 0.1;

/// Gemini generateContent client.
#[derive(Clone)]
pub struct Gemini {
    client: Client,
    credentials: ProviderCredentials,
    model: String,
    base_url: String,
}

impl Gemini {
    /// Create a client with the given credentials.
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self::new(ProviderCredentials::from_env("GEMINI_API_KEY"))
    }

    /// Set the model (default: gemini-1.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl CompletionProvider for Gemini {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
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

        let request = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: user.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        // Key goes in a header, not the query string, to keep URLs loggable
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", api_key.expose())
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

        let generated: GenerateResponse =
            response.json().await.map_err(|e| ProviderError::Parse {
                reason: format!("malformed generateContent response: {e}"),
            })?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| ProviderError::Parse {
                reason: "no candidates in response".to_string(),
            })
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(300).collect()
}

// Request/Response types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
