//! In-memory session store
//!
//! Lives as long as the process. Used by tests and by callers that do not
//! want a session to outlive the run.

use std::sync::RwLock;

use crate::domain::result::Result;
use crate::domain::{Session, User};
use crate::ports::SessionStore;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    fn read(&self) -> Session {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write(&self, update: impl FnOnce(&mut Session)) {
        match self.session.write() {
            Ok(mut guard) => update(&mut guard),
            Err(poisoned) => update(&mut poisoned.into_inner()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn set_session(&self, token: &str, user: &User) -> Result<()> {
        self.write(|s| *s = Session::new(token, user.clone()));
        Ok(())
    }

    fn set_user(&self, user: &User) -> Result<()> {
        self.write(|s| s.user = Some(user.clone()));
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.read().token
    }

    fn user(&self) -> Option<User> {
        self.read().user
    }

    fn clear(&self) -> Result<()> {
        self.write(|s| *s = Session::default());
        Ok(())
    }

    fn session(&self) -> Session {
        self.read()
    }
}
