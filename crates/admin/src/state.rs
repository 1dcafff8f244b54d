//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::{RecordStore, StorageBackend};
use crate::remote::{ApiClient, ApiError};
use crate::services::{AuthError, AuthService};

/// Errors that can occur while building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build API client: {0}")]
    Api(#[from] ApiError),
    #[error("failed to seed admin credentials: {0}")]
    Auth(#[from] AuthError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: RecordStore,
    api: ApiClient,
    auth: AuthService,
}

impl AppState {
    /// Build state over the file-backed record store in `config.data_dir`,
    /// seeding the admin credential if none is stored.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the API client cannot be built or the
    /// credential cannot be written.
    pub async fn new(config: AdminConfig) -> Result<Self, StateError> {
        let store = RecordStore::new(StorageBackend::file(&config.data_dir));
        Self::with_store(config, store).await
    }

    /// Build state over an existing record store.
    ///
    /// # Errors
    ///
    /// See [`AppState::new`].
    pub async fn with_store(config: AdminConfig, store: RecordStore) -> Result<Self, StateError> {
        let api = ApiClient::new(&config.api)?;
        let auth = AuthService::new(store.clone(), config.login_delay);
        auth.ensure_credentials(&config.admin.username, &config.admin.password)
            .await?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                api,
                auth,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Local record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.inner.store
    }

    /// Remote storefront API.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
