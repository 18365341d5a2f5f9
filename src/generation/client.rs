use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::QuizGenerator;
use super::prompt::{SYSTEM_INSTRUCTION, TEMPERATURE, USER_PROMPT, response_schema};
use crate::document::DocumentPayload;
use crate::error::GenerationError;
use crate::models::Question;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiClient {
    /// Fails with [`GenerationError::MissingApiKey`] when no key is configured.
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn request(&self, payload: &DocumentPayload) -> Result<Vec<Question>, GenerationError> {
        info!(
            model = %self.model,
            mime_type = %payload.mime_type,
            payload_length = payload.data.len(),
            "Requesting quiz generation"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&build_request(payload))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status { status, body });
        }

        let response: GeminiResponse = response.json().await?;
        let text = response_text(&response).ok_or(GenerationError::EmptyResponse)?;

        parse_questions(&text)
    }
}

#[async_trait]
impl QuizGenerator for GeminiClient {
    async fn generate(&self, payload: &DocumentPayload) -> Result<Vec<Question>, GenerationError> {
        match self.request(payload).await {
            Ok(questions) => {
                info!(
                    model = %self.model,
                    question_count = questions.len(),
                    "Quiz generated"
                );
                Ok(questions)
            }
            Err(err) => {
                error!(
                    model = %self.model,
                    code = err.code(),
                    error = %err,
                    "Quiz generation failed"
                );
                Err(err)
            }
        }
    }
}

fn build_request(payload: &DocumentPayload) -> GeminiRequest {
    GeminiRequest {
        system_instruction: GeminiContent {
            role: None,
            parts: vec![text_part(SYSTEM_INSTRUCTION)],
        },
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![
                GeminiPart {
                    text: None,
                    inline_data: Some(GeminiInlineData {
                        mime_type: payload.mime_type.clone(),
                        data: payload.data.clone(),
                    }),
                },
                text_part(USER_PROMPT),
            ],
        }],
        generation_config: GeminiGenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
            temperature: TEMPERATURE,
        },
    }
}

fn text_part(text: &str) -> GeminiPart {
    GeminiPart {
        text: Some(text.to_string()),
        inline_data: None,
    }
}

/// Concatenated text parts of the first candidate, if any.
fn response_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    (!text.trim().is_empty()).then_some(text)
}

/// Parses the model's JSON text into questions. An empty list is an error.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, GenerationError> {
    let questions: Vec<Question> = serde_json::from_str(text)?;
    if questions.is_empty() {
        return Err(GenerationError::NoQuestions);
    }
    Ok(questions)
}
