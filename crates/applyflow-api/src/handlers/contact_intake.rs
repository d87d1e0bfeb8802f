use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorBody, HttpAppError};
use crate::services::email::MailError;
use crate::services::intake::{IntakeReceipt, NotifyOutcome};
use crate::state::AppState;
use crate::utils::multipart::extract_submission;

#[derive(Debug, Serialize, ToSchema)]
pub struct IntakeResponse {
    pub success: bool,
    pub contact_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present when the record was saved but email delivery failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<IntakeReceipt> for IntakeResponse {
    fn from(receipt: IntakeReceipt) -> Self {
        let (message, warning) = match receipt.outcome {
            NotifyOutcome::Sent => (
                Some(
                    "Contact saved, emailed manager and confirmation sent to applicant."
                        .to_string(),
                ),
                None,
            ),
            NotifyOutcome::Skipped => (
                Some("Contact saved (email not configured, so no emails sent).".to_string()),
                None,
            ),
            NotifyOutcome::Failed(MailError::Authentication(_)) => (
                None,
                Some("Contact saved, but email authentication failed.".to_string()),
            ),
            NotifyOutcome::Failed(err) => {
                (None, Some(format!("Contact saved, but email failed: {}", err)))
            }
        };

        IntakeResponse {
            success: true,
            contact_id: receipt.contact.id,
            message,
            warning,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contacts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Contact saved; body notes whether emails went out", body = IntakeResponse),
        (status = 400, description = "Missing resume or required fields", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_submission(multipart)
        .await
        .map_err(HttpAppError::from)?;

    let receipt = state
        .intake()
        .handle(form)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(IntakeResponse::from(receipt))))
}
