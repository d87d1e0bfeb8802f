use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use applyflow_core::AppError;

use crate::error::{ErrorBody, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TestEmailResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/test-email",
    tag = "diagnostics",
    responses(
        (status = 200, description = "Test email sent", body = TestEmailResponse),
        (status = 400, description = "Email not configured", body = ErrorBody),
        (status = 500, description = "Send failed", body = ErrorBody)
    )
)]
pub async fn send_test_email(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Unconfigured mail is a client-visible configuration problem; no
    // network call is attempted.
    let notifier = state
        .notifier
        .as_ref()
        .ok_or_else(|| AppError::Validation("Email not configured".to_string()))?;

    notifier
        .send_diagnostic()
        .await
        .map_err(|e| AppError::Internal(format!("Test email failed: {}", e)))?;

    Ok(Json(TestEmailResponse {
        success: true,
        message: "Test email sent!".to_string(),
    }))
}
