//! Gemini implementation of the `TextModel` trait.
//!
//! Talks to the `generateContent` endpoint. Structured calls set
//! `generationConfig.responseMimeType` to JSON and attach the caller's
//! schema; the reply text is then parsed before being handed back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::security::SecretString;
use crate::traits::model::TextModel;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini-backed text model.
///
/// The API key travels as a request parameter, per the service's
/// authentication scheme.
#[derive(Clone)]
pub struct GeminiModel {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl GeminiModel {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the generation model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Make a generateContent request and extract the first candidate's
    /// text.
    async fn call(
        &self,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> ModelResult<String> {
        if self.api_key.expose().is_empty() {
            return Err(ModelError::MissingKey);
        }

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Http(format!("HTTP {status}: {body}")));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Http(e.to_string()))?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(ModelError::EmptyReply)
    }
}

#[async_trait]
impl TextModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> ModelResult<String> {
        self.call(prompt, None).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> ModelResult<serde_json::Value> {
        let config = GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema.clone(),
        };

        let text = self.call(prompt, Some(config)).await?;
        serde_json::from_str(&text)
            .map_err(|e| ModelError::MalformedReply(format!("{e}: {}", snippet(&text))))
    }
}

/// First 200 chars of a reply, for error messages.
fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}

// Wire types for the generateContent endpoint.

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
