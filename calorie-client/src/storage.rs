//! Named persisted slots.
//!
//! Each slot holds one JSON document, written as a whole. State modules
//! call `load` once when they are created and `save` after every mutation
//! of their persisted subset.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize slot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Raw slot medium. Implementations only move strings around.
pub trait StorageBackend {
    fn read(&self, name: &str) -> io::Result<Option<String>>;
    fn write(&self, name: &str, contents: &str) -> io::Result<()>;
    fn remove(&self, name: &str) -> io::Result<()>;
}

/// One `<slot>.json` file per slot inside a directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let final_path = self.slot_path(name);
        let tmp_path = self.dir.join(format!("{name}.json.tmp"));

        fs::write(&tmp_path, contents)?;
        match fs::rename(&tmp_path, &final_path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                // Windows refuses to rename over an existing file.
                if final_path.exists() {
                    fs::remove_file(&final_path)?;
                    fs::rename(&tmp_path, &final_path)
                } else {
                    Err(rename_err)
                }
            }
        }
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        match fs::remove_file(self.slot_path(name)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Process-local slots, lost on exit.
#[derive(Default)]
pub struct MemoryBackend {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.slots.borrow().get(name).cloned())
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        self.slots
            .borrow_mut()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        self.slots.borrow_mut().remove(name);
        Ok(())
    }
}

/// Typed access to named slots on a shared backend.
#[derive(Clone)]
pub struct PersistedStore {
    backend: Rc<dyn StorageBackend>,
}

impl PersistedStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryBackend::new()))
    }

    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::new(Rc::new(FileBackend::new(dir)))
    }

    /// Read and decode a slot.
    ///
    /// Missing, unreadable and corrupt slots all come back as `None`; the
    /// caller starts from its default state instead.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let raw = match self.backend.read(name) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(slot = name, error = %e, "Failed to read persisted slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(slot = name, error = %e, "Discarding corrupt persisted slot");
                if let Err(e) = self.backend.remove(name) {
                    tracing::debug!(slot = name, error = %e, "Failed to remove corrupt slot");
                }
                None
            }
        }
    }

    /// Overwrite a slot with `value`.
    pub fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.backend.write(name, &json)?;
        tracing::debug!(slot = name, bytes = json.len(), "Persisted slot");
        Ok(())
    }

    pub fn clear(&self, name: &str) -> Result<(), StorageError> {
        self.backend.remove(name)?;
        Ok(())
    }
}
