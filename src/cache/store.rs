//! Key-value stores behind the memo cache

use crate::error::Result;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Persisted digest → value mapping
///
/// Writers treat a key as write-once per distinct input; overwriting it with
/// an identical value is harmless.
pub trait MemoStore: Send + Sync {
    fn get(&self, digest: &str) -> Option<Value>;

    fn put(&self, digest: &str, value: Value);

    /// Persist pending writes, if the store has a backing medium
    ///
    /// # Errors
    /// Returns an I/O or serialization error from the backing medium.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoStore for MemoryStore {
    fn get(&self, digest: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(digest)
            .cloned()
    }

    fn put(&self, digest: &str, value: Value) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(digest.to_string(), value);
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Store backed by one JSON file
///
/// The whole file is loaded on open and rewritten on `flush`, through a
/// temporary file renamed into place so a crash never leaves it half written.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: MemoryStore,
}

impl JsonFileStore {
    /// Open `path`, starting empty if it does not exist
    ///
    /// A file that cannot be parsed is logged and ignored; it is replaced on
    /// the next flush.
    ///
    /// # Errors
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = MemoryStore::new();

        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<FxHashMap<String, Value>>(&bytes) {
                Ok(loaded) => {
                    log::debug!("Loaded {} cached results from {}", loaded.len(), path.display());
                    for (digest, value) in loaded {
                        entries.put(&digest, value);
                    }
                }
                Err(err) => {
                    log::warn!("Memo cache corrupted {}: {err}", path.display());
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoStore for JsonFileStore {
    fn get(&self, digest: &str) -> Option<Value> {
        self.entries.get(digest)
    }

    fn put(&self, digest: &str, value: Value) {
        self.entries.put(digest, value);
    }

    fn flush(&self) -> Result<()> {
        let bytes = {
            let entries = self
                .entries
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            serde_json::to_vec(&*entries)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Wrote {} cached results to {}", self.len(), self.path.display());
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
