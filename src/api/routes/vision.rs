//! Image question endpoint.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use tracing::info;

use crate::answers::{answer_from_image, parse_options, VisionAnswer, VisionQuestion};
use crate::api::server::AppState;
use crate::api::session::SessionId;
use crate::api::ApiError;
use crate::error::GreenroomError;
use crate::history::AnswerDraft;

#[derive(Default)]
struct VisionForm {
    image: Option<(String, Vec<u8>)>,
    prompt: String,
    options: String,
    model: String,
}

fn bad_part(err: MultipartError) -> GreenroomError {
    GreenroomError::InvalidRequest(format!("unreadable multipart field: {}", err))
}

async fn parse_form(mut multipart: Multipart) -> Result<VisionForm, GreenroomError> {
    let mut form = VisionForm::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_part)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let content_type = field.content_type().unwrap_or("image/png").to_string();
                let bytes = field.bytes().await.map_err(bad_part)?;
                form.image = Some((content_type, bytes.to_vec()));
            }
            "prompt" => form.prompt = field.text().await.map_err(bad_part)?,
            "options" => form.options = field.text().await.map_err(bad_part)?,
            "model" => form.model = field.text().await.map_err(bad_part)?,
            _ => {}
        }
    }
    Ok(form)
}

/// POST /api/image-question — solve a question captured as a screenshot.
///
/// On success the result is also appended to the caller's history; that
/// write is best-effort and cannot fail the response.
pub async fn post_image_question(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    multipart: Multipart,
) -> Result<Json<VisionAnswer>, ApiError> {
    let form = parse_form(multipart).await?;
    let (content_type, image) = form.image.ok_or_else(|| {
        GreenroomError::InvalidRequest("missing image field with the screenshot".to_string())
    })?;
    if image.is_empty() {
        return Err(GreenroomError::InvalidRequest("uploaded image is empty".to_string()).into());
    }

    let options = parse_options(&form.options);
    let model = if form.model.is_empty() {
        state.settings.vision_model.clone()
    } else {
        form.model
    };
    let prompt = {
        let trimmed = form.prompt.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    info!(options = options.len(), "processing image question");

    let answer = answer_from_image(
        state.provider.as_ref(),
        VisionQuestion {
            content_type,
            image,
            prompt: prompt.clone(),
            options: options.clone(),
            model,
        },
    )
    .await?;

    state.history.put(
        session.as_str(),
        AnswerDraft::Vision {
            answer: answer.answer.clone(),
            selected_option: answer.selected_option.clone(),
            prompt,
            options: (!options.is_empty()).then_some(options),
        },
    );

    Ok(Json(answer))
}
