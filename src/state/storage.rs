//! Durable storage for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console persists exactly one value across reloads: the bearer token.
//! Browser builds keep it in `localStorage`; native builds and tests use an
//! in-memory map that can be shared and inspected.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("token storage is unavailable")]
    Unavailable,
    #[error("token storage rejected the {action} of `{key}`")]
    Rejected { key: String, action: StorageAction },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageAction {
    Write,
    Removal,
}

impl std::fmt::Display for StorageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Write => "write",
            Self::Removal => "removal",
        })
    }
}

/// Single-key token persistence used by the session store.
pub trait TokenStorage {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<String>;
    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the token was not persisted.
    fn save(&self, token: &str) -> Result<(), StorageError>;
    /// Delete the persisted token.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the token may still be persisted.
    fn remove(&self) -> Result<(), StorageError>;
}

/// In-memory key/value storage. Clones share the same backing map.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    key: String,
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), entries: Rc::default(), read_only: Rc::default() }
    }

    /// Storage that already holds `token` under `key`, as after a previous visit.
    pub fn with_token(key: impl Into<String>, token: &str) -> Self {
        let storage = Self::new(key);
        storage.entries.borrow_mut().insert(storage.key.clone(), token.to_owned());
        storage
    }

    /// Refuse (or accept again) every write and removal, like a browser in
    /// private mode or over quota. Shared by all clones.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    fn check_writable(&self, action: StorageAction) -> Result<(), StorageError> {
        if self.read_only.get() {
            return Err(StorageError::Rejected { key: self.key.clone(), action });
        }
        Ok(())
    }

    /// Raw read of any key, for inspecting what a backend would see.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Remove `key` behind the session's back, like a user clearing site data.
    pub fn clear_out_of_band(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.get(&self.key)
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        self.check_writable(StorageAction::Write)?;
        self.entries.borrow_mut().insert(self.key.clone(), token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.check_writable(StorageAction::Removal)?;
        self.entries.borrow_mut().remove(&self.key);
        Ok(())
    }
}

/// `window.localStorage` under a single key.
#[cfg(feature = "csr")]
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    key: String,
}

#[cfg(feature = "csr")]
impl BrowserStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "csr")]
impl TokenStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(&self.key, token)
            .map_err(|_| StorageError::Rejected { key: self.key.clone(), action: StorageAction::Write })
    }

    // No localStorage means nothing was ever persisted there.
    fn remove(&self) -> Result<(), StorageError> {
        let Some(storage) = Self::storage() else {
            return Ok(());
        };
        storage
            .remove_item(&self.key)
            .map_err(|_| StorageError::Rejected { key: self.key.clone(), action: StorageAction::Removal })
    }
}
