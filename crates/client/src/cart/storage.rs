//! Client-owned persistence for the cart.
//!
//! The cart lives under a single key on the client, not on the server: it is
//! not shared across devices and is gone if the store is wiped. The trait
//! keeps cart logic independent of the storage mechanism.

use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use super::CartItem;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("cart storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("cart payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Storage for the serialized cart. Implementations persist the full item
/// sequence as one document; `save` always overwrites the previous state.
pub trait CartStore: Send + Sync {
    fn load(&self) -> Result<Vec<CartItem>, StorageError>;
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Cart persisted as a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStore for JsonFileStore {
    /// A missing file is an empty cart, not an error.
    fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the whole sequence. The temp-file rename keeps the overwrite
    /// atomic; readers see the old cart or the new one, never a partial file.
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<CartItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        Ok(self.items.lock().expect("cart store lock poisoned").clone())
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        *self.items.lock().expect("cart store lock poisoned") = items.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.items.lock().expect("cart store lock poisoned").clear();
        Ok(())
    }
}
