//! Request handlers for the upload form and JSON API.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use super::templates::IndexTemplate;
use super::web_server::AppState;
use crate::core::models::{OcrLanguage, UploadedImage};
use crate::core::orchestrators::{OcrSearchOrchestrator, ProcessOutcome};
use crate::global_constants;

/// Fields read from a multipart form submission.
#[derive(Debug, Default)]
pub struct Submission {
    pub image_bytes: Option<(Option<String>, Vec<u8>)>,
    pub language: Option<OcrLanguage>,
    pub keyword: String,
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    render_page(IndexTemplate::empty(state.default_language))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn process_form(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let language = submission.language.unwrap_or(state.default_language);
    let outcome = run_submission(&state, submission, language).await;

    render_page(IndexTemplate::build(
        language,
        &outcome.keyword,
        &outcome.result.extracted_text,
        &outcome.result.result_text,
    ))
    .into_response()
}

pub async fn api_process(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response()
        }
    };

    let language = submission.language.unwrap_or(state.default_language);
    let outcome = run_submission(&state, submission, language).await;

    Json(outcome.result).into_response()
}

struct SubmissionOutcome {
    keyword: String,
    result: ProcessOutcome,
}

async fn run_submission(
    state: &AppState,
    submission: Submission,
    language: OcrLanguage,
) -> SubmissionOutcome {
    let keyword = submission.keyword;

    let image = match submission.image_bytes {
        Some((file_name, bytes)) => match UploadedImage::decode_from_bytes(file_name, &bytes) {
            Ok(image) => Some(image),
            Err(error) => {
                log::warn!("[WEB] Rejecting unreadable upload: {:#}", error);
                let message = format!("{}{:#}", global_constants::MESSAGE_OCR_ERROR_PREFIX, error);
                let result = OcrSearchOrchestrator::outcome_for_text(message, &keyword);
                return SubmissionOutcome { keyword, result };
            }
        },
        None => None,
    };

    let result = state
        .orchestrator
        .process_submission(image.as_ref(), language, &keyword)
        .await;

    SubmissionOutcome { keyword, result }
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, String> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid form submission: {}", e))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "image" => {
                let file_name = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read uploaded image: {}", e))?;

                // Browsers send an empty file part when nothing was chosen
                if !bytes.is_empty() {
                    log::debug!("[WEB] Received image {:?} ({} bytes)", file_name, bytes.len());
                    submission.image_bytes = Some((file_name, bytes.to_vec()));
                }
            }
            "language" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read language: {}", e))?;
                submission.language = match value.parse() {
                    Ok(language) => Some(language),
                    Err(error) => {
                        log::warn!("[WEB] {}, falling back to default", error);
                        None
                    }
                };
            }
            "keyword" => {
                submission.keyword = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read keyword: {}", e))?;
            }
            other => {
                log::debug!("[WEB] Ignoring unexpected form field: {}", other);
            }
        }
    }

    Ok(submission)
}

fn render_page(template: IndexTemplate<'_>) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}
