//! Session store port - where the bearer token and user record live

use crate::domain::result::Result;
use crate::domain::{Session, User};

/// Holds the current session for the lifetime of a profile
///
/// Reads never fail: a store that cannot be read behaves as if empty.
/// Writes replace whole fields, so readers never observe a half-written
/// session.
pub trait SessionStore: Send + Sync {
    /// Replace token and user together
    fn set_session(&self, token: &str, user: &User) -> Result<()>;

    /// Replace the cached user record, keeping the token
    fn set_user(&self, user: &User) -> Result<()>;

    /// Current token, if any
    fn token(&self) -> Option<String>;

    /// Current user record, if any
    fn user(&self) -> Option<User>;

    /// Drop token and user
    fn clear(&self) -> Result<()>;

    /// Snapshot of both fields
    fn session(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }
}
