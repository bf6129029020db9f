//! Profile service - the logged-in user's account and the user directory

use std::sync::Arc;

use tracing::info;

use crate::domain::result::{Error, Result};
use crate::domain::{ProfileUpdate, User};
use crate::ports::{MovieApi, SessionStore};
use crate::services::FavoritesService;

pub struct ProfileService {
    api: Arc<dyn MovieApi>,
    session: Arc<dyn SessionStore>,
    favorites: Arc<FavoritesService>,
}

impl ProfileService {
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

    /// Fetch the logged-in user from the server and refresh the session copy
    pub async fn profile(&self) -> Result<User> {
        self.favorites.refresh().await
    }

    /// Update profile fields; fields left as `None` are not sent
    pub async fn edit(&self, update: &ProfileUpdate) -> Result<User> {
        let user_id = self.current_user_id()?;
        if update.is_empty() {
            return self.profile().await;
        }

        let user = self
            .api
            .edit_user(&user_id, update)
            .await
            .map_err(|e| {
                self.favorites.forget_if_unauthorized(&e);
                e
            })?;
        self.session.set_user(&user)?;
        self.favorites.initialize(&user);
        info!(username = %user.username, "profile updated");
        Ok(user)
    }

    /// Delete the logged-in account and drop the local session
    ///
    /// Returns the server's confirmation text.
    pub async fn delete_account(&self) -> Result<String> {
        let user_id = self.current_user_id()?;
        let message = self.api.delete_user(&user_id).await.map_err(|e| {
            self.favorites.forget_if_unauthorized(&e);
            e
        })?;
        self.session.clear()?;
        self.favorites.clear();
        info!(user_id = %user_id, "account deleted");
        Ok(message)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.api.list_users().await
    }

    pub async fn user(&self, id: &str) -> Result<User> {
        self.api.get_user(id).await
    }

    fn current_user_id(&self) -> Result<String> {
        self.session.user().map(|u| u.id).ok_or(Error::NotLoggedIn)
    }
}
