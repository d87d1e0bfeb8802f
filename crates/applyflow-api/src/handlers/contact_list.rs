use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use applyflow_core::models::ContactResponse;

use crate::error::HttpAppError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "contacts",
    responses(
        (status = 200, description = "Every contact, newest first", body = [ContactResponse])
    )
)]
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let contacts = state.contacts.list_all().await.map_err(HttpAppError::from)?;

    let response: Vec<ContactResponse> = contacts.into_iter().map(ContactResponse::from).collect();

    Ok(Json(response))
}
