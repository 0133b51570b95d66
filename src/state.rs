//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::AppConfig;
use crate::status::StatusPanel;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration, the Tera template engine and the status panel
/// mounted at startup. The panel carries the resolved `FrontendEnv`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub status: Arc<StatusPanel>,
}

impl AppState {
    /// Creates a new application state from the given configuration, templates and mounted panel.
    pub fn new(config: AppConfig, tera: Tera, status: StatusPanel) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            status: Arc::new(status),
        }
    }
}
