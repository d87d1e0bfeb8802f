//! Test helpers: build the application router over an in-memory store and a
//! substitutable notifier, so the full HTTP surface can be exercised without
//! PostgreSQL or an SMTP server.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;

use applyflow_api::services::email::{ApplicantDetails, MailError, Notifier};
use applyflow_api::services::intake::Resume;
use applyflow_api::setup::routes::setup_routes;
use applyflow_api::state::AppState;
use applyflow_core::models::{Contact, NewContact};
use applyflow_core::{AppError, Config, ContactStore, SmtpSettings};

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "development".to_string(),
        database_url: "postgresql://localhost/applyflow_test".to_string(),
        db_max_connections: 5,
        db_timeout_seconds: 5,
        max_resume_size_bytes: 10 * 1024 * 1024,
        smtp: SmtpSettings {
            server: "smtp.example.com".to_string(),
            port: 587,
            username: None,
            password: None,
            recipient: "hiring@example.com".to_string(),
        },
    }
}

/// Contact store backed by a Vec, with the same ordering contract as the
/// PostgreSQL store (created_at descending, id descending tie-break).
pub struct InMemoryContactStore {
    contacts: Mutex<Vec<Contact>>,
    next_id: AtomicI64,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn create(&self, contact: NewContact) -> Result<Contact, AppError> {
        let contact = Contact {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            created_at: Utc::now(),
        };
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, AppError> {
        let mut contacts = self.contacts.lock().unwrap().clone();
        contacts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(contacts)
    }
}

#[derive(Clone, Copy)]
pub enum NotifierMode {
    Recording,
    AuthRejected,
    DeliveryFails,
}

/// Notifier that records sends, or fails in a configurable way.
pub struct TestNotifier {
    mode: NotifierMode,
    sent: Mutex<Vec<&'static str>>,
}

impl TestNotifier {
    pub fn new(mode: NotifierMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().clone()
    }

    fn fail(&self) -> Option<MailError> {
        match self.mode {
            NotifierMode::Recording => None,
            NotifierMode::AuthRejected => {
                Some(MailError::Authentication("535 5.7.8 rejected".to_string()))
            }
            NotifierMode::DeliveryFails => {
                Some(MailError::Delivery("connection refused".to_string()))
            }
        }
    }
}

#[async_trait]
impl Notifier for TestNotifier {
    async fn send_manager_notification(
        &self,
        _applicant: &ApplicantDetails,
        _resume: &Resume,
    ) -> Result<(), MailError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        self.sent.lock().unwrap().push("manager");
        Ok(())
    }

    async fn send_applicant_confirmation(
        &self,
        _applicant: &ApplicantDetails,
        _resume_filename: &str,
    ) -> Result<(), MailError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        self.sent.lock().unwrap().push("confirmation");
        Ok(())
    }

    async fn send_diagnostic(&self) -> Result<(), MailError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        self.sent.lock().unwrap().push("diagnostic");
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryContactStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app(notifier: Option<Arc<dyn Notifier>>) -> TestApp {
    let config = test_config();
    let store = Arc::new(InMemoryContactStore::new());
    let state = Arc::new(AppState::new(
        config.clone(),
        store.clone() as Arc<dyn ContactStore>,
        notifier,
    ));
    let router = setup_routes(&config, state).expect("router builds");
    TestApp {
        server: TestServer::new(router).expect("test server"),
        store,
    }
}
