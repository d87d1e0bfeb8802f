//! Applyflow API Library
//!
//! This crate provides the HTTP handlers, SMTP notifier, and application
//! setup for the application intake service.

mod api_doc;

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;

// Re-exports
pub use error::{ErrorBody, HttpAppError};
pub use state::AppState;
