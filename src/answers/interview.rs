//! Interview flow: transcribe an audio snippet, then generate a quick and a
//! full answer with the candidate's context folded into the system prompt.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::providers::{AudioClip, CompletionRequest, LlmProvider};

use super::prompt::build_context_prompt;

/// Free-text context the candidate filled into the UI. Empty sections are
/// skipped when the reference block is assembled.
#[derive(Debug, Clone, Default)]
pub struct ContextSections {
    pub job_description: String,
    pub company_info: String,
    pub about_you: String,
    pub resume: String,
}

impl ContextSections {
    /// Merge the non-empty sections into one labelled reference block.
    pub fn merged(&self) -> String {
        let labelled = [
            ("Job Description", &self.job_description),
            ("Company Info", &self.company_info),
            ("About You", &self.about_you),
            ("Resume", &self.resume),
        ];
        labelled
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(label, value)| format!("{}: {}", label, value.trim()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// One interview-answer request.
#[derive(Debug, Clone)]
pub struct InterviewRequest {
    pub clip: AudioClip,
    pub position: String,
    pub model: String,
    pub context: ContextSections,
}

/// The generated answers, returned to the UI verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewAnswer {
    /// Verbatim transcription of the question audio.
    pub transcript: String,
    /// Concise response, roughly 50 words.
    pub quick_answer: String,
    /// Detailed response, roughly 150 words.
    pub full_answer: String,
}

/// Run the full interview flow against the provider.
///
/// The quick answer is sampled at temperature 0.0 so repeated snippets give
/// stable phrasing; the full answer at 0.7 for some variety.
pub async fn process_interview(
    provider: &dyn LlmProvider,
    request: InterviewRequest,
) -> Result<InterviewAnswer> {
    let transcript = provider.transcribe(&request.clip).await?;
    let context = request.context.merged();
    debug!(position = %request.position, "generating interview answers");

    let quick_answer = provider
        .complete(CompletionRequest {
            model: request.model.clone(),
            system: build_context_prompt(&request.position, &context, true),
            user: transcript.clone(),
            temperature: Some(0.0),
        })
        .await?;

    let full_answer = provider
        .complete(CompletionRequest {
            model: request.model,
            system: build_context_prompt(&request.position, &context, false),
            user: transcript.clone(),
            temperature: Some(0.7),
        })
        .await?;

    Ok(InterviewAnswer {
        transcript,
        quick_answer,
        full_answer,
    })
}
