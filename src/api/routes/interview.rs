//! Interview answer endpoint.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use tracing::info;

use crate::answers::{process_interview, ContextSections, InterviewAnswer, InterviewRequest};
use crate::api::server::AppState;
use crate::api::session::SessionId;
use crate::api::ApiError;
use crate::error::GreenroomError;
use crate::history::AnswerDraft;
use crate::providers::AudioClip;

/// Fields of the interview form; everything but the audio blob is optional.
#[derive(Default)]
struct InterviewForm {
    clip: Option<AudioClip>,
    position: String,
    model: String,
    context: ContextSections,
}

fn bad_part(err: MultipartError) -> GreenroomError {
    GreenroomError::InvalidRequest(format!("unreadable multipart field: {}", err))
}

async fn parse_form(mut multipart: Multipart) -> Result<InterviewForm, GreenroomError> {
    let mut form = InterviewForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_part)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("audio.webm").to_string();
                let content_type = field.content_type().unwrap_or("audio/webm").to_string();
                let bytes = field.bytes().await.map_err(bad_part)?;
                form.clip = Some(AudioClip {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "position" => form.position = field.text().await.map_err(bad_part)?,
            "model" => form.model = field.text().await.map_err(bad_part)?,
            "job_description" => {
                form.context.job_description = field.text().await.map_err(bad_part)?
            }
            "company_info" => form.context.company_info = field.text().await.map_err(bad_part)?,
            "about_you" => form.context.about_you = field.text().await.map_err(bad_part)?,
            "resume" => form.context.resume = field.text().await.map_err(bad_part)?,
            _ => {}
        }
    }
    Ok(form)
}

/// POST /api/interview — transcribe a recorded question and answer it.
///
/// On success the result is also appended to the caller's history; that
/// write is best-effort and cannot fail the response.
pub async fn post_interview(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    multipart: Multipart,
) -> Result<Json<InterviewAnswer>, ApiError> {
    let form = parse_form(multipart).await?;
    let clip = form.clip.ok_or_else(|| {
        GreenroomError::InvalidRequest("missing file field with the recorded audio".to_string())
    })?;
    if clip.bytes.is_empty() {
        return Err(GreenroomError::InvalidRequest("uploaded audio is empty".to_string()).into());
    }

    let position = if form.position.is_empty() {
        state.settings.default_position.clone()
    } else {
        form.position
    };
    let model = if form.model.is_empty() {
        state.settings.default_model.clone()
    } else {
        form.model
    };
    info!(position = %position, "processing interview snippet");

    let answer = process_interview(
        state.provider.as_ref(),
        InterviewRequest {
            clip,
            position: position.clone(),
            model: model.clone(),
            context: form.context,
        },
    )
    .await?;

    state.history.put(
        session.as_str(),
        AnswerDraft::Interview {
            transcript: answer.transcript.clone(),
            quick_answer: answer.quick_answer.clone(),
            full_answer: answer.full_answer.clone(),
            position: Some(position),
            model: Some(model),
        },
    );

    Ok(Json(answer))
}
