//! Application setup and initialization
//!
//! All application initialization logic lives here rather than in main.rs,
//! so integration tests can build the same router against substituted
//! stores and notifiers.

pub mod database;
pub mod routes;
pub mod server;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};

use applyflow_core::{Config, ContactStore};
use applyflow_db::PgContactStore;

use crate::services::email::{Notifier, SmtpNotifier};
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    let pool = database::setup_database(&config).await?;
    let contacts: Arc<dyn ContactStore> = Arc::new(PgContactStore::new(pool));

    let notifier: Option<Arc<dyn Notifier>> =
        SmtpNotifier::from_config(&config).map(|n| Arc::new(n) as Arc<dyn Notifier>);
    if notifier.is_none() {
        tracing::warn!("Email NOT configured - set SMTP_USERNAME and SMTP_PASSWORD");
    }

    let state = Arc::new(AppState::new(config.clone(), contacts, notifier));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
