//! File-backed session store
//!
//! Persists `{ "token": ..., "user": ... }` to `session.json` in the data
//! directory. Every write rewrites the whole file through a temp file and a
//! rename, under an exclusive lock on `session.lock`, so another process
//! never reads a half-written session. The file is read once on open.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use fs2::FileExt;
use tracing::{debug, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{Session, User};
use crate::ports::SessionStore;

const SESSION_FILE: &str = "session.json";
const LOCK_FILE: &str = "session.lock";

pub struct FileSessionStore {
    path: PathBuf,
    lock_path: PathBuf,
    session: RwLock<Session>,
}

impl FileSessionStore {
    /// Open the store in `data_dir`, loading any persisted session
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(SESSION_FILE);
        let session = load_session(&path);

        Ok(Self {
            path,
            lock_path: data_dir.join(LOCK_FILE),
            session: RwLock::new(session),
        })
    }

    /// Path of the persisted session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Session {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply `update` in memory and persist the result
    fn write(&self, update: impl FnOnce(&mut Session)) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;

        let mut next = guard.clone();
        update(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<()> {
        let lock = self.acquire_lock()?;

        let result = if session.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(Error::from(e)),
            }
        } else {
            let tmp_path = self.path.with_extension("json.tmp");
            serde_json::to_string_pretty(session)
                .map_err(Error::from)
                .and_then(|content| fs::write(&tmp_path, content).map_err(Error::from))
                .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(Error::from))
        };

        if let Err(e) = lock.unlock() {
            warn!(path = %self.lock_path.display(), error = %e, "failed to release session lock");
        }
        debug!(path = %self.path.display(), "session persisted");
        result
    }

    fn acquire_lock(&self) -> Result<File> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        lock.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock session file: {}", e)))?;
        Ok(lock)
    }
}

/// Read the persisted session; a missing or corrupt file means no session
fn load_session(path: &Path) -> Session {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Session::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read session file");
            return Session::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring corrupt session file");
        Session::default()
    })
}

impl SessionStore for FileSessionStore {
    fn set_session(&self, token: &str, user: &User) -> Result<()> {
        self.write(|s| *s = Session::new(token, user.clone()))
    }

    fn set_user(&self, user: &User) -> Result<()> {
        self.write(|s| s.user = Some(user.clone()))
    }

    fn token(&self) -> Option<String> {
        self.read().token
    }

    fn user(&self) -> Option<User> {
        self.read().user
    }

    fn clear(&self) -> Result<()> {
        self.write(|s| *s = Session::default())
    }

    fn session(&self) -> Session {
        self.read()
    }
}
