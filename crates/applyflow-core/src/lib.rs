//! Applyflow Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! record-store contract shared by the database and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::{Config, SmtpSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use store::ContactStore;
