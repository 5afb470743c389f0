//! File-backed string list store.
//!
//! A trivial key-less store: one JSON-serialized `Vec<String>` per file,
//! rewritten whole on every mutation. Unrelated to the squirrel
//! collection and not reachable from the HTTP surface.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::StoreResult;

/// File-backed list-of-strings store
pub struct StringListStore {
    path: PathBuf,
}

impl StringListStore {
    /// Open the store, creating an empty persisted list when the file is
    /// absent. An existing file is never overwritten.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { path: path.into() };
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&store.path)
        {
            Ok(mut file) => file.write_all(b"[]")?,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err.into()),
        }
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole persisted list
    pub fn load_all(&self) -> StoreResult<Vec<String>> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replace the persisted list with `items`
    pub fn replace_all(&self, items: &[String]) -> StoreResult<()> {
        let json = serde_json::to_vec(items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Append one item via read-modify-write
    pub fn append_one(&self, item: &str) -> StoreResult<()> {
        let mut items = self.load_all()?;
        items.push(item.to_string());
        self.replace_all(&items)
    }
}
