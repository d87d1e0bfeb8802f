//! Applyflow database layer
//!
//! PostgreSQL-backed implementation of the record store contract.

mod contacts;

pub use contacts::PgContactStore;
