//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use applyflow_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Applyflow API",
        version = "0.1.0",
        description = "Application intake API: accepts a contact submission with an attached resume, persists it, and notifies the hiring team and the applicant by email."
    ),
    paths(
        handlers::contact_intake::submit_contact,
        handlers::contact_list::list_contacts,
        handlers::test_email::send_test_email,
        handlers::health::health,
    ),
    components(schemas(
        models::ContactResponse,
        handlers::contact_intake::IntakeResponse,
        handlers::test_email::TestEmailResponse,
        error::ErrorBody,
    )),
    tags(
        (name = "contacts", description = "Intake submissions"),
        (name = "diagnostics", description = "Mail configuration checks")
    )
)]
pub struct ApiDoc;
