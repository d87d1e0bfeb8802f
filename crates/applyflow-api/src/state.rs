//! Application state shared by all handlers.

use std::sync::Arc;

use applyflow_core::{Config, ContactStore};

use crate::services::email::Notifier;
use crate::services::intake::IntakeService;

pub struct AppState {
    pub config: Config,
    pub contacts: Arc<dyn ContactStore>,
    /// `None` when SMTP credentials are absent; intake then skips
    /// notification instead of failing.
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl AppState {
    pub fn new(
        config: Config,
        contacts: Arc<dyn ContactStore>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            config,
            contacts,
            notifier,
        }
    }

    pub fn intake(&self) -> IntakeService {
        IntakeService::new(self.contacts.clone(), self.notifier.clone())
    }
}
