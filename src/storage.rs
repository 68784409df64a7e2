//! Durable key-value persistence of the session.
//!
//! Two keys are used: [`TOKEN_KEY`] holds the raw bearer token and [`USER_KEY`]
//! the user serialized as JSON. They are always written and removed together.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;
use crate::models::User;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the serialized user snapshot.
pub const USER_KEY: &str = "user";

/// A process-wide, durable key-value store.
///
/// `set_many` and `remove_many` are the unit of atomicity: implementations
/// must never leave a batch half applied.
pub trait SessionStorage: Send + Sync {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes every entry in one batch.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Removes every key in one batch.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError>;

    /// Writes a single value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_many(&[(key, value)])
    }

    /// Removes a single value.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_many(&[key])
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory storage. Lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// Storage backed by a JSON object on disk.
///
/// Each batch rewrites the whole file through a temporary sibling and a rename.
/// A failed write leaves the store unchanged; a failed removal still removes
/// the keys from memory and returns the error.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and treated as empty too; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "corrupt session file, starting empty");
                HashMap::new()
            }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "unreadable session file, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        let mut next = map.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.flush(&next)?;
        *map = next;
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        let mut next = map.clone();
        for key in keys {
            next.remove(*key);
        }
        // Removed keys are gone for this process even when the file keeps them.
        let flushed = self.flush(&next);
        *map = next;
        flushed
    }
}

/// What was found in storage at startup.
#[derive(Debug, PartialEq, Eq)]
pub enum StoredSession {
    /// Neither key is present.
    Empty,
    /// A token and a parseable user.
    Valid {
        /// The stored bearer token.
        token: String,
        /// The stored user snapshot.
        user: User,
    },
    /// Only one of the two keys is present, or the token is empty.
    Partial,
    /// The user snapshot does not parse.
    Corrupt,
}

/// Reads and classifies the stored session.
pub fn load_session(storage: &dyn SessionStorage) -> StoredSession {
    let token = storage.get(TOKEN_KEY);
    let user = storage.get(USER_KEY);

    match (token, user) {
        (None, None) => StoredSession::Empty,
        (Some(token), Some(user)) if !token.is_empty() => match serde_json::from_str(&user) {
            Ok(user) => StoredSession::Valid { token, user },
            Err(error) => {
                tracing::warn!(%error, "stored user snapshot does not parse");
                StoredSession::Corrupt
            }
        },
        _ => StoredSession::Partial,
    }
}

/// Writes token and user together.
pub(crate) fn persist_session(
    storage: &dyn SessionStorage,
    token: &str,
    user: &User,
) -> Result<(), StorageError> {
    let user = serde_json::to_string(user)?;
    storage.set_many(&[(TOKEN_KEY, token), (USER_KEY, &user)])
}

/// Rewrites the user snapshot only.
pub(crate) fn persist_user(storage: &dyn SessionStorage, user: &User) -> Result<(), StorageError> {
    let user = serde_json::to_string(user)?;
    storage.set(USER_KEY, &user)
}

/// Removes token and user together. Failures are logged, never returned.
pub(crate) fn clear_session(storage: &dyn SessionStorage) {
    if let Err(error) = storage.remove_many(&[TOKEN_KEY, USER_KEY]) {
        tracing::warn!(%error, "failed to remove the stored session");
    }
}
