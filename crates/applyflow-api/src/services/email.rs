//! Outbound email via SMTP.
//!
//! Each send opens a plaintext connection, upgrades it with STARTTLS, logs
//! in with the configured credentials, and transmits one message. Failures
//! are classified into authentication rejections vs generic delivery faults
//! so the intake flow can report them distinctly; none of them are fatal
//! once the record is saved.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Severity};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use applyflow_core::Config;

use crate::services::intake::Resume;

pub const NOT_PROVIDED: &str = "(not provided)";

/// Submitted applicant fields, as persisted (trimmed, optionals absent
/// rather than empty).
#[derive(Debug, Clone)]
pub struct ApplicantDetails {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP authentication failed: {0}")]
    Authentication(String),

    #[error("email delivery failed: {0}")]
    Delivery(String),

    #[error("failed to build message: {0}")]
    Compose(String),
}

/// Notification surface used by the intake and diagnostic handlers. A trait
/// so tests can substitute a recording or failing implementation.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Email to the fixed recipient summarizing the submission, with the
    /// resume attached and Reply-To set to the applicant.
    async fn send_manager_notification(
        &self,
        applicant: &ApplicantDetails,
        resume: &Resume,
    ) -> Result<(), MailError>;

    /// Receipt acknowledgment to the applicant, naming the uploaded file.
    /// No attachment.
    async fn send_applicant_confirmation(
        &self,
        applicant: &ApplicantDetails,
        resume_filename: &str,
    ) -> Result<(), MailError>;

    /// Fixed-content test message to the fixed recipient, to verify the
    /// mail configuration.
    async fn send_diagnostic(&self) -> Result<(), MailError>;
}

/// SMTP-backed notifier. Constructed only when credentials are configured.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    recipient: String,
}

impl SmtpNotifier {
    /// Create the notifier from config. Returns `None` when SMTP credentials
    /// are missing: the caller then skips notification rather than failing.
    pub fn from_config(config: &Config) -> Option<Self> {
        let (username, password) = config.smtp.credentials()?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp.server)
            .ok()?
            .port(config.smtp.port)
            .credentials(Credentials::new(
                username.to_string(),
                password.to_string(),
            ))
            .build();

        tracing::info!(
            host = %config.smtp.server,
            port = config.smtp.port,
            recipient = %config.smtp.recipient,
            "Email configured (SMTP with STARTTLS)"
        );

        Some(Self {
            mailer,
            from: username.to_string(),
            recipient: config.smtp.recipient.clone(),
        })
    }

    fn from_mailbox(&self) -> Result<Mailbox, MailError> {
        self.from
            .parse()
            .map_err(|e| MailError::Compose(format!("invalid sender address: {}", e)))
    }

    fn recipient_mailbox(&self) -> Result<Mailbox, MailError> {
        self.recipient
            .parse()
            .map_err(|e| MailError::Compose(format!("invalid recipient address: {}", e)))
    }

    async fn deliver(&self, email: Message) -> Result<(), MailError> {
        self.mailer
            .send(email)
            .await
            .map(|_| ())
            .map_err(classify_smtp_error)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_manager_notification(
        &self,
        applicant: &ApplicantDetails,
        resume: &Resume,
    ) -> Result<(), MailError> {
        let reply_to: Mailbox = applicant
            .email
            .parse()
            .map_err(|e| MailError::Compose(format!("invalid applicant address: {}", e)))?;

        let attachment = Attachment::new(resume.filename.clone()).body(
            resume.bytes.clone(),
            attachment_content_type(&resume.filename)?,
        );

        let email = Message::builder()
            .from(self.from_mailbox()?)
            .to(self.recipient_mailbox()?)
            .reply_to(reply_to)
            .subject(manager_subject(applicant))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(manager_body(
                        applicant,
                        &resume.filename,
                    )))
                    .singlepart(attachment),
            )
            .map_err(|e| MailError::Compose(e.to_string()))?;

        self.deliver(email).await
    }

    async fn send_applicant_confirmation(
        &self,
        applicant: &ApplicantDetails,
        resume_filename: &str,
    ) -> Result<(), MailError> {
        let to: Mailbox = applicant
            .email
            .parse()
            .map_err(|e| MailError::Compose(format!("invalid applicant address: {}", e)))?;

        let email = Message::builder()
            .from(self.from_mailbox()?)
            .to(to)
            .subject("Thank you for your application!")
            .header(ContentType::TEXT_PLAIN)
            .body(confirmation_body(&applicant.first_name, resume_filename))
            .map_err(|e| MailError::Compose(e.to_string()))?;

        self.deliver(email).await
    }

    async fn send_diagnostic(&self) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from_mailbox()?)
            .to(self.recipient_mailbox()?)
            .subject("Applyflow test email")
            .header(ContentType::TEXT_PLAIN)
            .body("This is a test email to verify the SMTP configuration.".to_string())
            .map_err(|e| MailError::Compose(e.to_string()))?;

        self.deliver(email).await
    }
}

/// Permanent 53x responses are credential rejections; everything else is a
/// generic delivery fault.
fn classify_smtp_error(err: lettre::transport::smtp::Error) -> MailError {
    let auth_rejected = err
        .status()
        .map(|code| {
            code.severity == Severity::PermanentNegativeCompletion
                && code.category == Category::Unspecified3
        })
        .unwrap_or(false);

    if auth_rejected {
        MailError::Authentication(err.to_string())
    } else {
        MailError::Delivery(err.to_string())
    }
}

fn manager_subject(applicant: &ApplicantDetails) -> String {
    match applicant.last_name.as_deref() {
        Some(last) => format!("New Application from {} {}", applicant.first_name, last),
        None => format!("New Application from {}", applicant.first_name),
    }
}

fn manager_body(applicant: &ApplicantDetails, resume_filename: &str) -> String {
    format!(
        "A new application has arrived.\n\
         \n\
         First name:  {}\n\
         Last name:   {}\n\
         Email:       {}\n\
         Phone:       {}\n\
         \n\
         Resume filename: {}\n",
        applicant.first_name,
        applicant.last_name.as_deref().unwrap_or(NOT_PROVIDED),
        applicant.email,
        applicant.phone.as_deref().unwrap_or(NOT_PROVIDED),
        resume_filename,
    )
}

fn confirmation_body(first_name: &str, resume_filename: &str) -> String {
    format!(
        "Hi {},\n\
         \n\
         Thank you for submitting your application. We have received your \
         resume (\"{}\") and our team will review it shortly.\n\
         \n\
         Best regards,\n\
         The Hiring Team\n",
        first_name, resume_filename,
    )
}

/// Content type for the attachment, inferred from the filename extension.
/// Unknown extensions fall back to a generic binary type.
fn attachment_content_type(filename: &str) -> Result<ContentType, MailError> {
    let mime = mime_guess::from_path(filename).first_or_octet_stream();
    ContentType::parse(mime.essence_str())
        .or_else(|_| ContentType::parse("application/octet-stream"))
        .map_err(|e| MailError::Compose(format!("invalid attachment content type: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use applyflow_core::SmtpSettings;

    fn applicant() -> ApplicantDetails {
        ApplicantDetails {
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            email: "ada@example.com".to_string(),
            phone: None,
        }
    }

    fn config_with_credentials(username: Option<&str>, password: Option<&str>) -> Config {
        Config {
            server_port: 5000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            database_url: "postgresql://localhost/applyflow_test".to_string(),
            db_max_connections: 20,
            db_timeout_seconds: 30,
            max_resume_size_bytes: 10 * 1024 * 1024,
            smtp: SmtpSettings {
                server: "smtp.example.com".to_string(),
                port: 587,
                username: username.map(String::from),
                password: password.map(String::from),
                recipient: "hiring@example.com".to_string(),
            },
        }
    }

    #[test]
    fn from_config_returns_none_without_credentials() {
        assert!(SmtpNotifier::from_config(&config_with_credentials(None, None)).is_none());
        assert!(
            SmtpNotifier::from_config(&config_with_credentials(Some("mailer@example.com"), None))
                .is_none()
        );
    }

    #[test]
    fn from_config_builds_notifier_with_credentials() {
        let config = config_with_credentials(Some("mailer@example.com"), Some("hunter2"));
        let notifier = SmtpNotifier::from_config(&config).expect("notifier configured");
        assert_eq!(notifier.from, "mailer@example.com");
        assert_eq!(notifier.recipient, "hiring@example.com");
    }

    #[test]
    fn manager_subject_includes_full_name() {
        assert_eq!(
            manager_subject(&applicant()),
            "New Application from Ada Lovelace"
        );
    }

    #[test]
    fn manager_subject_omits_absent_last_name() {
        let mut a = applicant();
        a.last_name = None;
        assert_eq!(manager_subject(&a), "New Application from Ada");
    }

    #[test]
    fn manager_body_marks_absent_fields() {
        let mut a = applicant();
        a.last_name = None;
        let body = manager_body(&a, "cv.pdf");

        assert!(body.contains("First name:  Ada"));
        assert!(body.contains("Last name:   (not provided)"));
        assert!(body.contains("Phone:       (not provided)"));
        assert!(body.contains("Email:       ada@example.com"));
        assert!(body.contains("Resume filename: cv.pdf"));
    }

    #[test]
    fn manager_body_prints_present_fields() {
        let mut a = applicant();
        a.phone = Some("+1 555 0100".to_string());
        let body = manager_body(&a, "cv.pdf");
        assert!(body.contains("Last name:   Lovelace"));
        assert!(body.contains("Phone:       +1 555 0100"));
        assert!(!body.contains(NOT_PROVIDED));
    }

    #[test]
    fn confirmation_body_names_the_file() {
        let body = confirmation_body("Ada", "cv.pdf");
        assert!(body.starts_with("Hi Ada,"));
        assert!(body.contains("(\"cv.pdf\")"));
    }

    #[test]
    fn attachment_content_type_from_extension() {
        let ct = attachment_content_type("cv.pdf").expect("content type");
        assert_eq!(ct, ContentType::parse("application/pdf").unwrap());
    }

    #[test]
    fn attachment_content_type_falls_back_to_octet_stream() {
        let ct = attachment_content_type("payload.zzz-unknown").expect("content type");
        assert_eq!(ct, ContentType::parse("application/octet-stream").unwrap());
    }
}
