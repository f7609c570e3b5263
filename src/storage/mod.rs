pub mod kv_store;
pub mod memory;

pub use kv_store::SqliteStorage;
pub use memory::MemoryStorage;

use std::fs;
use std::path::Path;

use crate::error::StorageError;

pub const DEFAULT_DATABASE_PATH: &str = "data/chat.db";

/// Durable string storage addressed by key, in the spirit of browser local
/// storage. Absence of a key is a normal state, not an error.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Ensure the directory holding `path` exists
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
