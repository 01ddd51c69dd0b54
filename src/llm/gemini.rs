//! Gemini transport — non-streaming `generateContent` via Google AI API.
//!
//! - API key in the `x-goog-api-key` header; the URL never carries it, so
//!   `reqwest::Error` messages (which include the URL) are safe to log
//! - `responseMimeType` + `responseSchema` constrain output to a JSON array
//! - Response text is the concatenation of `candidates[0].content.parts[*].text`
//! - Token usage in `usageMetadata`

use super::transport::ModelTransport;
use super::types::{AnalysisRequest, RequestPart};
use crate::error::TransportError;
use crate::settings::Settings;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Gemini Flash pricing (as of mid 2025):
/// Input:  $0.30 per 1M tokens
/// Output: $2.50 per 1M tokens
const INPUT_COST_PER_MILLION: f64 = 0.30;
const OUTPUT_COST_PER_MILLION: f64 = 2.50;

pub struct GeminiTransport {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiTransport {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl fmt::Debug for GeminiTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiTransport")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .finish()
    }
}

#[async_trait]
impl ModelTransport for GeminiTransport {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, TransportError> {
        log::info!("[LLM] Provider: gemini");
        log::info!("[LLM] Model: {}", self.model);
        log::info!(
            "[LLM] Parts: {} (image: {})",
            request.parts.len(),
            request.has_image()
        );

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&build_request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let body: Value = response.json().await?;
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());
        log_usage(&body);

        extract_response_text(&body).ok_or(TransportError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Build the `generateContent` JSON body.
pub fn build_request_body(request: &AnalysisRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|part| match part {
            RequestPart::InlineImage { mime_type, data } => serde_json::json!({
                "inlineData": {
                    "mimeType": mime_type,
                    "data": data
                }
            }),
            RequestPart::Text(text) => serde_json::json!({ "text": text }),
        })
        .collect();

    serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": parts
            }
        ],
        "systemInstruction": {
            "parts": [
                {
                    "text": request.system_instruction
                }
            ]
        },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema
        }
    })
}

/// Extract the response text from a `generateContent` body.
///
/// Text parts of the first candidate are concatenated; `None` when the
/// candidate carries no text at all (e.g. blocked by safety filters).
pub fn extract_response_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

fn log_usage(body: &Value) {
    let Some(usage) = body.get("usageMetadata") else {
        return;
    };
    let input_tokens = usage["promptTokenCount"].as_u64().unwrap_or(0);
    let output_tokens = usage["candidatesTokenCount"].as_u64().unwrap_or(0);
    log::info!("[LLM] Input tokens: {}", input_tokens);
    log::info!("[LLM] Output tokens: {}", output_tokens);
    let cost = (input_tokens as f64 * INPUT_COST_PER_MILLION
        + output_tokens as f64 * OUTPUT_COST_PER_MILLION)
        / 1_000_000.0;
    log::info!("[LLM] Estimated cost: ${:.6}", cost);
}
