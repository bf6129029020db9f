//! Favorites service - keeps local favorite membership in step with the server
//!
//! The server is authoritative: after every successful add/remove the local
//! set is replaced by the favorites in the server's response. Nothing is
//! changed optimistically, so a failed call leaves the set as it was.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::{MovieApi, SessionStore};

/// Membership of one movie in the favorites set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteState {
    Favorite,
    NotFavorite,
}

impl FavoriteState {
    pub fn is_favorite(self) -> bool {
        self == Self::Favorite
    }
}

/// Outcome of a favorite add/remove/toggle
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteChange {
    pub movie_id: String,
    pub state: FavoriteState,
    /// Full favorites set after the change (sorted)
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Remove,
    Toggle,
}

/// Favorites synchronizer
///
/// Operations on the same movie are serialized through a per-movie async
/// lock: a second toggle waits for the first and then sees its result.
/// Operations on different movies run concurrently and the last response
/// to land defines the local set.
pub struct FavoritesService {
    api: Arc<dyn MovieApi>,
    session: Arc<dyn SessionStore>,
    favorites: Mutex<BTreeSet<String>>,
    movie_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl FavoritesService {
    /// Create the service, seeding the set from the cached session user
    pub fn new(api: Arc<dyn MovieApi>, session: Arc<dyn SessionStore>) -> Self {
        let initial = session
            .user()
            .map(|u| u.favorite_movie_ids)
            .unwrap_or_default();

        Self {
            api,
            session,
            favorites: Mutex::new(initial),
            movie_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replace (not merge) the local set with the user's favorites
    pub fn initialize(&self, user: &User) {
        self.replace(user.favorite_movie_ids.clone());
    }

    /// Re-fetch the logged-in user and reinitialize from it
    pub async fn refresh(&self) -> Result<User> {
        let user_id = self.current_user_id()?;
        let user = self
            .api
            .get_user(&user_id)
            .await
            .map_err(|e| {
                self.forget_if_unauthorized(&e);
                e
            })?;
        if self.store_user(&user) {
            self.initialize(&user);
        }
        Ok(user)
    }

    /// Add if absent, remove if present
    pub async fn toggle(&self, movie_id: &str) -> Result<FavoriteChange> {
        self.apply(movie_id, Action::Toggle).await
    }

    pub async fn add(&self, movie_id: &str) -> Result<FavoriteChange> {
        self.apply(movie_id, Action::Add).await
    }

    pub async fn remove(&self, movie_id: &str) -> Result<FavoriteChange> {
        self.apply(movie_id, Action::Remove).await
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.lock_set().contains(movie_id)
    }

    pub fn state_of(&self, movie_id: &str) -> FavoriteState {
        if self.is_favorite(movie_id) {
            FavoriteState::Favorite
        } else {
            FavoriteState::NotFavorite
        }
    }

    /// Sorted snapshot of the local set
    pub fn favorites(&self) -> Vec<String> {
        self.lock_set().iter().cloned().collect()
    }

    /// Forget all local membership (logout, account deletion)
    pub fn clear(&self) {
        self.replace(BTreeSet::new());
    }

    async fn apply(&self, movie_id: &str, action: Action) -> Result<FavoriteChange> {
        let user_id = self.current_user_id()?;

        let movie_lock = self.movie_lock(movie_id);
        let result = {
            let _guard = movie_lock.lock().await;

            let add = match action {
                Action::Add => true,
                Action::Remove => false,
                Action::Toggle => !self.is_favorite(movie_id),
            };
            debug!(movie_id, add, "updating favorite");

            let response = if add {
                self.api.add_favorite(&user_id, movie_id).await
            } else {
                self.api.remove_favorite(&user_id, movie_id).await
            };

            response.map(|user| {
                if self.store_user(&user) {
                    self.initialize(&user);
                }
                let state = if user.has_favorite(movie_id) {
                    FavoriteState::Favorite
                } else {
                    FavoriteState::NotFavorite
                };
                FavoriteChange {
                    movie_id: movie_id.to_string(),
                    state,
                    favorites: user.favorite_movie_ids.iter().cloned().collect(),
                }
            })
        };
        drop(movie_lock);
        self.prune_locks();

        if let Err(e) = &result {
            warn!(movie_id, error = %e, "favorite update failed");
            self.forget_if_unauthorized(e);
        }
        result
    }

    fn current_user_id(&self) -> Result<String> {
        self.session.user().map(|u| u.id).ok_or(Error::NotLoggedIn)
    }

    /// Keep the session's cached user in step
    ///
    /// Returns false when the session no longer belongs to `user` (logout
    /// or account switch while the request was in flight); nothing is
    /// stored then.
    fn store_user(&self, user: &User) -> bool {
        let same_user = self.session.user().is_some_and(|u| u.id == user.id);
        if !same_user {
            debug!(user_id = %user.id, "session moved on, dropping favorites response");
            return false;
        }
        if let Err(e) = self.session.set_user(user) {
            warn!(error = %e, "failed to store updated user in session");
        }
        true
    }

    /// A rejected token ends the session; its favorites go with it
    pub(crate) fn forget_if_unauthorized(&self, error: &Error) {
        if error.is_unauthorized() {
            self.clear();
        }
    }

    fn replace(&self, favorites: BTreeSet<String>) {
        *self.lock_set() = favorites;
    }

    fn lock_set(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.favorites.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn movie_lock(&self, movie_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.movie_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(movie_id.to_string()).or_default().clone()
    }

    /// Drop locks nobody is waiting on
    fn prune_locks(&self) {
        let mut locks = self.movie_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
