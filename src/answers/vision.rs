//! Vision flow: answer a question captured as a screenshot or photo.
//!
//! The model sometimes replies with a classification ("this is a system
//! design question") instead of an answer. [`answer_from_image`] detects
//! that and retries once with an instruction demanding the full solution.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::providers::{LlmProvider, VisionRequest};

use super::prompt::{DEFAULT_VISION_QUESTION, FOLLOW_UP_INSTRUCTION, VISION_SYSTEM_PROMPT};

/// Replies shorter than this that name a question type are treated as
/// classifications rather than answers.
const CLASSIFICATION_LENGTH_CUTOFF: usize = 120;

/// Reply fragments that mean the model classified instead of answering.
const CLASSIFICATION_SNIPPETS: &[&str] = &[
    "system design question",
    "this is a system design",
    "not coding/dsa",
    "not multiple-choice",
    "multiple choice question",
    "this screenshot lists prompts",
    "identify the question type",
];

/// One image question.
#[derive(Debug, Clone)]
pub struct VisionQuestion {
    /// MIME type of the uploaded image.
    pub content_type: String,
    pub image: Vec<u8>,
    /// Optional question text when the screenshot lacks context.
    pub prompt: Option<String>,
    /// Answer choices, already split and trimmed.
    pub options: Vec<String>,
    pub model: String,
}

/// The solved question, returned to the UI verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct VisionAnswer {
    /// The model's answer or explanation.
    pub answer: String,
    /// Which `Option <letter>` label the answer picked, when choices were given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
}

/// Split a raw options form field into individual choices.
///
/// Semicolons win over newlines when both are present; blank fragments drop.
pub fn parse_options(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = if raw.contains(';') {
        raw.split(';').collect()
    } else {
        raw.lines().collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Wrap raw image bytes as a base64 `data:` URL.
pub fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64.encode(bytes))
}

/// Render choices as an `Option A: ...` block. Labels stop at `Z`; a form
/// with more than 26 options is not a real multiple-choice question.
fn format_option_block(options: &[String]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let block = options
        .iter()
        .take(26)
        .enumerate()
        .map(|(idx, value)| format!("Option {}: {}", option_letter(idx), value))
        .collect::<Vec<_>>()
        .join("\n");
    Some(block)
}

fn option_letter(idx: usize) -> char {
    char::from(b'A' + idx as u8)
}

/// Does the reply look like a classification instead of an answer?
fn needs_follow_up(text: &str) -> bool {
    let cleaned = text.trim().to_lowercase();
    if cleaned.is_empty() {
        return true;
    }
    if CLASSIFICATION_SNIPPETS
        .iter()
        .any(|snippet| cleaned.contains(snippet))
    {
        return true;
    }
    cleaned.len() < CLASSIFICATION_LENGTH_CUTOFF
        && (cleaned.contains("system design") || cleaned.contains("coding question"))
}

/// Find the first `Option <letter>` label the answer mentions.
fn detect_selected_option(answer: &str, option_count: usize) -> Option<String> {
    let lowered = answer.to_lowercase();
    (0..option_count.min(26))
        .map(|idx| format!("Option {}", option_letter(idx)))
        .find(|label| lowered.contains(&label.to_lowercase()))
}

/// Run the vision flow against the provider.
pub async fn answer_from_image(
    provider: &dyn LlmProvider,
    question: VisionQuestion,
) -> Result<VisionAnswer> {
    let data_url = to_data_url(&question.content_type, &question.image);

    let question_text = question
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_VISION_QUESTION)
        .to_string();
    let option_block = format_option_block(&question.options);

    let request = VisionRequest {
        model: question.model.clone(),
        system: VISION_SYSTEM_PROMPT.to_string(),
        question: question_text,
        option_block,
        image_data_url: data_url,
        extra_instruction: None,
    };

    let mut answer = provider.vision(request.clone()).await?;

    if needs_follow_up(&answer) {
        debug!("vision reply looked like a classification, requesting full solution");
        answer = provider
            .vision(VisionRequest {
                extra_instruction: Some(FOLLOW_UP_INSTRUCTION.to_string()),
                ..request
            })
            .await?;
    }

    let selected_option = detect_selected_option(&answer, question.options.len());
    Ok(VisionAnswer {
        answer,
        selected_option,
    })
}
