//! Model provider abstraction.
//!
//! The answer flows talk to a [`LlmProvider`] trait object so tests can
//! substitute a stub; [`OpenAiProvider`] is the real implementation.

pub mod openai;
#[cfg(test)]
pub mod testing;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::error::Result;

/// An uploaded audio clip to transcribe.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Original filename from the upload, used as the multipart filename.
    pub filename: String,
    /// MIME type of the clip (`audio/webm`, `audio/wav`, ...).
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One chat-completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    /// Sampling temperature. Some models reject an explicit temperature;
    /// providers retry without it when that happens.
    pub temperature: Option<f32>,
}

/// One vision call against an uploaded image.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    pub system: String,
    /// The question text shown alongside the image.
    pub question: String,
    /// Pre-formatted `Option A: ...` lines, when the client supplied choices.
    pub option_block: Option<String>,
    /// The image as a base64 `data:` URL.
    pub image_data_url: String,
    /// Prepended instruction for follow-up calls that demand a full answer
    /// instead of a classification.
    pub extra_instruction: Option<String>,
}

/// Boundary to the hosted model API.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Transcribe an audio clip to text.
    async fn transcribe(&self, clip: &AudioClip) -> Result<String>;

    /// Generate a text answer from a system/user prompt pair.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Answer a question about an image.
    async fn vision(&self, request: VisionRequest) -> Result<String>;
}
