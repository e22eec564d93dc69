//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::UserDataSource;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the user data source.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    user_data: Arc<dyn UserDataSource>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, user_data: Arc<dyn UserDataSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, user_data }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the user data source.
    #[must_use]
    pub fn user_data(&self) -> &dyn UserDataSource {
        self.inner.user_data.as_ref()
    }
}
