//! Intake orchestration: validate → persist → notify → outcome.
//!
//! The service is a plain function over explicit inputs (parsed form fields
//! and file bytes), independent of the HTTP layer, so it can be exercised in
//! tests without a running server.
//!
//! Ordering contract: the record must be durably saved before any
//! notification attempt, and a notification failure must never be reported
//! as an overall failure — by the time email runs, the write is committed.

use std::sync::Arc;

use applyflow_core::models::{Contact, NewContact};
use applyflow_core::{AppError, ContactStore};

use crate::services::email::{ApplicantDetails, MailError, Notifier};

/// The uploaded file, held in memory for the duration of one request. Used
/// only to build the email attachment; never written to durable storage.
#[derive(Debug, Clone)]
pub struct Resume {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Raw fields extracted from one multipart submission.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub resume: Option<Resume>,
}

/// What happened on the notification leg of an accepted submission.
#[derive(Debug)]
pub enum NotifyOutcome {
    /// Manager notification and applicant confirmation both sent.
    Sent,
    /// No credentials configured; no send attempted.
    Skipped,
    /// A send failed after the record was committed.
    Failed(MailError),
}

/// Result of an accepted submission: the persisted record plus the
/// notification outcome. Every receipt maps to an HTTP success.
#[derive(Debug)]
pub struct IntakeReceipt {
    pub contact: Contact,
    pub outcome: NotifyOutcome,
}

pub struct IntakeService {
    contacts: Arc<dyn ContactStore>,
    notifier: Option<Arc<dyn Notifier>>,
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl IntakeService {
    pub fn new(contacts: Arc<dyn ContactStore>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { contacts, notifier }
    }

    pub async fn handle(&self, form: SubmissionForm) -> Result<IntakeReceipt, AppError> {
        // File presence is checked before the required fields: when both are
        // missing, the resume error is the one the client sees.
        let resume = match form.resume {
            Some(resume) if !resume.filename.trim().is_empty() => resume,
            _ => {
                return Err(AppError::Validation("Resume file is required.".to_string()));
            }
        };

        let first_name = form.first_name.trim();
        let email = form.email.trim();
        if first_name.is_empty() || email.is_empty() {
            return Err(AppError::Validation(
                "First name and email are required.".to_string(),
            ));
        }

        let contact = self
            .contacts
            .create(NewContact {
                first_name: first_name.to_string(),
                last_name: none_if_empty(&form.last_name),
                email: email.to_string(),
                phone: none_if_empty(&form.phone),
                message: format!("Resume uploaded: {}", resume.filename),
            })
            .await?;

        let outcome = match &self.notifier {
            None => {
                tracing::warn!(
                    contact_id = contact.id,
                    "Email credentials not configured - skipping email sending"
                );
                NotifyOutcome::Skipped
            }
            Some(notifier) => {
                let applicant = ApplicantDetails {
                    first_name: contact.first_name.clone(),
                    last_name: contact.last_name.clone(),
                    email: contact.email.clone(),
                    phone: contact.phone.clone(),
                };
                match Self::notify(notifier.as_ref(), &applicant, &resume).await {
                    Ok(()) => NotifyOutcome::Sent,
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            contact_id = contact.id,
                            "Email sending failed after contact was saved"
                        );
                        NotifyOutcome::Failed(err)
                    }
                }
            }
        };

        Ok(IntakeReceipt { contact, outcome })
    }

    /// Single failure-isolation boundary for both sends. The confirmation is
    /// not attempted once the manager send has failed.
    async fn notify(
        notifier: &dyn Notifier,
        applicant: &ApplicantDetails,
        resume: &Resume,
    ) -> Result<(), MailError> {
        notifier.send_manager_notification(applicant, resume).await?;
        tracing::info!("Manager notification sent");

        notifier
            .send_applicant_confirmation(applicant, &resume.filename)
            .await?;
        tracing::info!(recipient = %applicant.email, "Applicant confirmation sent");

        Ok(())
    }
}
