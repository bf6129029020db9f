//! myFlix Core - client library for the myFlix movie catalog API
//!
//! This crate implements the client logic following hexagonal architecture:
//!
//! - **domain**: Wire-level records (User, Movie, Session) and the error type
//! - **ports**: Trait definitions for external dependencies (MovieApi, SessionStore)
//! - **services**: Auth, catalog, favorites and profile orchestration
//! - **adapters**: Concrete implementations (reqwest client, session files)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::file_session::FileSessionStore;
use adapters::http::HttpMovieApi;
use config::Config;
use ports::{MovieApi, SessionStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{
    Credentials, Director, Genre, Movie, ProfileUpdate, Registration, Session, User,
};
pub use services::{FavoriteChange, FavoriteState};

/// Main context for myFlix operations
///
/// This is the primary entry point for all client logic. It holds the
/// configuration, the session store and all services, sharing one API
/// client between them.
pub struct MyflixContext {
    pub config: Config,
    pub session: Arc<dyn SessionStore>,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub favorites_service: Arc<FavoritesService>,
    pub profile_service: ProfileService,
}

impl MyflixContext {
    /// Create a context backed by the data directory
    ///
    /// Loads `settings.json`, restores `session.json` and points the HTTP
    /// client at the configured base URL.
    pub fn new(data_dir: &Path) -> anyhow::Result<Self> {
        let config = Config::load(data_dir)?;
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(data_dir)?);
        let api: Arc<dyn MovieApi> = Arc::new(HttpMovieApi::with_timeout(
            &config.base_url,
            config.request_timeout(),
            Arc::clone(&session),
        )?);

        Ok(Self::with_parts(config, api, session))
    }

    /// Assemble a context from explicit parts
    pub fn with_parts(
        config: Config,
        api: Arc<dyn MovieApi>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        let favorites_service = Arc::new(FavoritesService::new(
            Arc::clone(&api),
            Arc::clone(&session),
        ));
        let auth_service = AuthService::new(
            Arc::clone(&api),
            Arc::clone(&session),
            Arc::clone(&favorites_service),
        );
        let catalog_service =
            CatalogService::new(Arc::clone(&api), Arc::clone(&favorites_service));
        let profile_service = ProfileService::new(
            api,
            Arc::clone(&session),
            Arc::clone(&favorites_service),
        );

        Self {
            config,
            session,
            auth_service,
            catalog_service,
            favorites_service,
            profile_service,
        }
    }
}
