//! Record store contract.
//!
//! Handlers and services depend on this trait rather than a concrete
//! database type, so tests can substitute an in-memory store without a
//! running PostgreSQL instance.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Contact, NewContact};

/// Create/list access to persisted contacts.
///
/// `create` must persist synchronously: once it returns `Ok`, the record is
/// durable. On `Err` the caller must not treat the record as committed.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a new contact, assigning `id` and `created_at`.
    async fn create(&self, contact: NewContact) -> Result<Contact, AppError>;

    /// Every record, ordered newest first.
    async fn list_all(&self) -> Result<Vec<Contact>, AppError>;
}
