//! Application state shared across handlers.

use std::sync::Arc;

use crate::{backend::Backend, config::AdminConfig, dashboard::Dashboard};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    backend: Arc<dyn Backend>,
    dashboard: Dashboard,
}

impl AppState {
    /// Build state over a backend. The dashboard starts empty; the first
    /// authorized page view triggers the initial load.
    #[must_use]
    pub fn new(config: AdminConfig, backend: Arc<dyn Backend>) -> Self {
        let dashboard = Dashboard::new(Arc::clone(&backend));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                dashboard,
            }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The injected backend service.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.inner.backend
    }

    /// The dashboard view-state service.
    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.inner.dashboard
    }
}
