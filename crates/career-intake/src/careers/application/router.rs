use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use mime::Mime;
use serde_json::json;
use tracing::error;

use super::domain::{
    Attachment, SubmissionDraft, FIELD_EMAIL, FIELD_LINK, FIELD_NAME, FIELD_PHONE, FIELD_POSITION,
    FIELD_RECAPTCHA_TOKEN, FIELD_RESUME,
};
use super::service::{ApplicationError, ApplicationService};
use super::validation::MAX_ATTACHMENT_BYTES;
use super::verification::BotVerifier;

/// Request bodies may exceed the attachment cap so an oversized resume
/// reaches the validator and earns the size message, not a framework 413.
pub const MAX_REQUEST_BYTES: usize = 2 * MAX_ATTACHMENT_BYTES;

/// Router builder exposing the submission endpoint.
pub fn career_router<V>(service: Arc<ApplicationService<V>>) -> Router
where
    V: BotVerifier + 'static,
{
    Router::new()
        .route("/api/career/apply", post(apply_handler::<V>))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(service)
}

pub(crate) async fn apply_handler<V>(
    State(service): State<Arc<ApplicationService<V>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    V: BotVerifier + 'static,
{
    // Parse faults are unanticipated outcomes; detail stays in the log.
    let draft = match multipart {
        Ok(multipart) => match read_submission(multipart).await {
            Ok(draft) => draft,
            Err(err) => {
                error!(error = %err, "failed to read application submission");
                return internal_error();
            }
        },
        Err(rejection) => {
            error!(error = %rejection, "malformed application submission");
            return internal_error();
        }
    };

    match service.submit(draft).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Application submitted successfully",
            })),
        )
            .into_response(),
        Err(error) => {
            let status = match &error {
                ApplicationError::Rejected(_) => StatusCode::BAD_REQUEST,
                ApplicationError::DispatchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(json!({ "error": error.to_string() }))).into_response()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

async fn read_submission(mut multipart: Multipart) -> Result<SubmissionDraft, MultipartError> {
    let mut draft = SubmissionDraft::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            FIELD_NAME => draft.name = field.text().await?,
            FIELD_EMAIL => draft.email = field.text().await?,
            FIELD_PHONE => draft.phone = field.text().await?,
            FIELD_LINK => draft.link = field.text().await?,
            FIELD_POSITION => draft.position = field.text().await?,
            FIELD_RECAPTCHA_TOKEN => draft.recaptcha_token = field.text().await?,
            FIELD_RESUME => {
                let filename = field.file_name().unwrap_or_default().to_string();
                // An unparseable declared type falls back to octet-stream and
                // is rejected by the type check downstream.
                let content_type = field
                    .content_type()
                    .and_then(|raw| raw.parse::<Mime>().ok())
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM);
                let bytes = field.bytes().await?;

                // An empty file input submits an empty part; treat as absent.
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }

                draft.attachment = Some(Attachment {
                    filename,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(draft)
}
