//! Contact repository
//!
//! Single-table persistence for intake submissions. `id` is a BIGSERIAL the
//! database assigns and never reuses; `created_at` defaults to the insert
//! time and is never updated. There is deliberately no uniqueness constraint
//! on `email` — repeat submissions from the same address are all retained.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use applyflow_core::models::{Contact, NewContact};
use applyflow_core::{AppError, ContactStore};

#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn create(&self, contact: NewContact) -> Result<Contact, AppError> {
        let row: Contact = sqlx::query_as::<Postgres, Contact>(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, phone, message, created_at
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(contact_id = row.id, "Contact saved to database");
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Contact>, AppError> {
        // id DESC tie-break keeps the ordering deterministic when two rows
        // share a created_at timestamp.
        let rows: Vec<Contact> = sqlx::query_as::<Postgres, Contact>(
            "SELECT id, first_name, last_name, email, phone, message, created_at \
             FROM contacts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
