//! OpenAI provider: Whisper transcription, chat completions, and the
//! Responses API for vision questions.
//!
//! Model quirk handled here: some chat models reject an explicit sampling
//! temperature with HTTP 400. When the error body names `temperature`, the
//! request is retried once without it.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{GreenroomError, Result};

use super::{AudioClip, CompletionRequest, LlmProvider, VisionRequest};

/// OpenAI REST API base.
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Whisper model used for all transcriptions.
const WHISPER_MODEL: &str = "whisper-1";

/// Returned when a vision response carries no extractable text.
const NO_TEXT_FALLBACK: &str = "Unable to extract response from model.";

/// Provider backed by the hosted OpenAI API.
pub struct OpenAiProvider {
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Build a chat-completions request body.
    fn build_chat_body(request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    /// Build a Responses API body with `input_text`/`input_image` blocks.
    fn build_vision_body(request: &VisionRequest) -> Value {
        let mut user_blocks = Vec::new();
        if let Some(instruction) = &request.extra_instruction {
            user_blocks.push(json!({ "type": "input_text", "text": instruction }));
        }
        user_blocks.push(json!({ "type": "input_text", "text": request.question }));
        if let Some(options) = &request.option_block {
            user_blocks.push(json!({ "type": "input_text", "text": options }));
        }
        user_blocks.push(json!({
            "type": "input_image",
            "image_url": request.image_data_url,
        }));

        json!({
            "model": request.model,
            "input": [
                {
                    "role": "system",
                    "content": [{ "type": "input_text", "text": request.system }],
                },
                { "role": "user", "content": user_blocks },
            ],
        })
    }

    /// Extract answer text from a Responses API payload.
    ///
    /// Walks `output[].content[].text` and falls back to `output_text`.
    /// Always returns *something* so a quiet model does not turn into an
    /// error on the primary path.
    fn extract_response_text(response: &Value) -> String {
        if let Some(output) = response["output"].as_array() {
            for block in output {
                if let Some(contents) = block["content"].as_array() {
                    for entry in contents {
                        if let Some(text) = entry["text"].as_str() {
                            if !text.is_empty() {
                                return text.to_string();
                            }
                        }
                    }
                }
            }
        }
        if let Some(text) = response["output_text"].as_str() {
            if !text.is_empty() {
                return text.to_string();
            }
        }
        warn!("model response did not include text output");
        NO_TEXT_FALLBACK.to_string()
    }

    /// Turn a non-2xx response into a provider error, preferring the
    /// `error.message` field of the body when it parses.
    async fn response_error(context: &str, response: reqwest::Response) -> GreenroomError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or(body);
        GreenroomError::Provider(format!("{} failed ({}): {}", context, status, message))
    }

    async fn send_chat(&self, body: &Value) -> Result<reqwest::Response> {
        self.client
            .post(format!("{}/chat/completions", OPENAI_API_BASE))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GreenroomError::Provider(format!("chat request failed: {}", e)))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        debug!(filename = %clip.filename, "transcribing audio clip");

        let part = reqwest::multipart::Part::bytes(clip.bytes.clone())
            .file_name(clip.filename.clone())
            .mime_str(&clip.content_type)
            .map_err(|e| GreenroomError::Provider(format!("invalid audio MIME type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", WHISPER_MODEL)
            .text("response_format", "json");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", OPENAI_API_BASE))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GreenroomError::Provider(format!("transcription request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::response_error("transcription", response).await);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GreenroomError::Provider(format!("failed to parse transcription: {}", e)))?;
        debug!("transcription completed");
        Ok(json["text"].as_str().unwrap_or_default().to_string())
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        debug!(model = %request.model, "chat completion request");
        let body = Self::build_chat_body(&request);

        let mut response = self.send_chat(&body).await?;
        if response.status() == reqwest::StatusCode::BAD_REQUEST && request.temperature.is_some() {
            let error_body = response.text().await.unwrap_or_default();
            if error_body.to_lowercase().contains("temperature") {
                warn!(
                    model = %request.model,
                    "model rejected explicit temperature, retrying with default"
                );
                let mut retry_body = body;
                if let Some(obj) = retry_body.as_object_mut() {
                    obj.remove("temperature");
                }
                response = self.send_chat(&retry_body).await?;
            } else {
                return Err(GreenroomError::Provider(format!(
                    "chat completion failed (400): {}",
                    error_body
                )));
            }
        }

        if !response.status().is_success() {
            return Err(Self::response_error("chat completion", response).await);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GreenroomError::Provider(format!("failed to parse completion: {}", e)))?;
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                GreenroomError::Provider("completion response had no message content".to_string())
            })
    }

    async fn vision(&self, request: VisionRequest) -> Result<String> {
        debug!(model = %request.model, "vision request");
        let body = Self::build_vision_body(&request);

        let response = self
            .client
            .post(format!("{}/responses", OPENAI_API_BASE))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GreenroomError::Provider(format!("vision request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::response_error("vision", response).await);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GreenroomError::Provider(format!("failed to parse vision response: {}", e)))?;
        Ok(Self::extract_response_text(&json))
    }
}
