//! Auth service - account registration and session lifecycle

use std::sync::Arc;

use tracing::info;

use crate::domain::result::Result;
use crate::domain::{Credentials, Registration, User};
use crate::ports::{MovieApi, SessionStore};
use crate::services::FavoritesService;

pub struct AuthService {
    api: Arc<dyn MovieApi>,
    session: Arc<dyn SessionStore>,
    favorites: Arc<FavoritesService>,
}

impl AuthService {
    pub fn new(
        api: Arc<dyn MovieApi>,
        session: Arc<dyn SessionStore>,
        favorites: Arc<FavoritesService>,
    ) -> Self {
        Self {
            api,
            session,
            favorites,
        }
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        let user = self.api.register(registration).await?;
        info!(username = %user.username, "registered new account");
        Ok(user)
    }

    /// Log in and store the session
    ///
    /// A failed login leaves any existing session untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let response = self.api.login(credentials).await?;
        self.session.set_session(&response.token, &response.user)?;
        self.favorites.initialize(&response.user);
        info!(username = %response.user.username, "logged in");
        Ok(response.user)
    }

    /// Drop the stored session and local favorites
    pub fn logout(&self) -> Result<()> {
        let username = self.session.user().map(|u| u.username);
        self.session.clear()?;
        self.favorites.clear();
        info!(username = ?username, "logged out");
        Ok(())
    }

    /// User cached in the session, without a network call
    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.session().is_authenticated()
    }
}
