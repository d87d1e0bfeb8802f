//! Multipart form extraction for the intake endpoint.

use axum::extract::multipart::{Field, Multipart};

use applyflow_core::AppError;

use crate::services::intake::{Resume, SubmissionForm};

/// Read the submission fields and the resume file out of a multipart form.
/// Unknown fields are ignored; validation happens in the intake service.
pub async fn extract_submission(mut multipart: Multipart) -> Result<SubmissionForm, AppError> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart form: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "first_name" => form.first_name = text(field).await?,
            "last_name" => form.last_name = text(field).await?,
            "email" => form.email = text(field).await?,
            "phone" => form.phone = text(field).await?,
            "resume" => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::Validation(format!("Failed to read resume data: {}", e))
                    })?
                    .to_vec();
                form.resume = Some(Resume { filename, bytes });
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {}", e)))
}
