use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, HistoryFile, MatchRecord};
use super::migration::migrate_history;
use crate::config::MatchConfig;

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Namespace the scorer keeps its history under unless told otherwise
pub const DEFAULT_NAMESPACE: &str = "cricket_match_history";

/// Durable list of finished matches plus the last-used match settings.
///
/// Methods take `&self`; implementations handle their own synchronisation
/// so a store can be shared between the engine and a history view.
pub trait HistoryStore: Send + Sync {
    /// All records, oldest first
    fn load(&self) -> Result<Vec<MatchRecord>, SaveError>;

    fn append(&self, record: MatchRecord) -> Result<(), SaveError>;

    fn clear(&self) -> Result<(), SaveError>;

    fn load_settings(&self) -> Result<Option<MatchConfig>, SaveError>;

    fn save_settings(&self, settings: &MatchConfig) -> Result<(), SaveError>;

    /// Records for display, newest first
    fn load_newest_first(&self) -> Result<Vec<MatchRecord>, SaveError> {
        let mut records = self.load()?;
        records.reverse();
        Ok(records)
    }
}

/// In-memory store backed by `Arc<RwLock<HistoryFile>>`.
///
/// Cloning shares the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    storage: Arc<RwLock<HistoryFile>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Result<Vec<MatchRecord>, SaveError> {
        let storage = self.storage.read().map_err(|_| SaveError::LockPoisoned("history read"))?;
        Ok(storage.matches.clone())
    }

    fn append(&self, record: MatchRecord) -> Result<(), SaveError> {
        let mut storage =
            self.storage.write().map_err(|_| SaveError::LockPoisoned("history write"))?;
        storage.matches.push(record);
        storage.update_timestamp();
        Ok(())
    }

    fn clear(&self) -> Result<(), SaveError> {
        let mut storage =
            self.storage.write().map_err(|_| SaveError::LockPoisoned("history write"))?;
        storage.matches.clear();
        storage.update_timestamp();
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<MatchConfig>, SaveError> {
        let storage = self.storage.read().map_err(|_| SaveError::LockPoisoned("settings read"))?;
        Ok(storage.settings.clone())
    }

    fn save_settings(&self, settings: &MatchConfig) -> Result<(), SaveError> {
        let mut storage =
            self.storage.write().map_err(|_| SaveError::LockPoisoned("settings write"))?;
        storage.settings = Some(settings.clone());
        storage.update_timestamp();
        Ok(())
    }
}

/// One compressed, checksummed file per namespace inside a directory.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(dir: impl AsRef<Path>, namespace: &str) -> Result<Self, SaveError> {
        Self::validate_namespace(namespace)?;
        Ok(Self { path: dir.as_ref().join(format!("{}.dat", namespace)) })
    }

    /// Store under [`DEFAULT_NAMESPACE`].
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, SaveError> {
        Self::new(dir, DEFAULT_NAMESPACE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the backing file entirely.
    pub fn delete(&self) -> Result<(), SaveError> {
        if self.path.exists() {
            remove_file(&self.path)?;
            log::info!("Deleted history file {:?}", self.path);
        }
        Ok(())
    }

    fn validate_namespace(namespace: &str) -> Result<(), SaveError> {
        let valid = !namespace.is_empty()
            && namespace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SaveError::InvalidNamespace { namespace: namespace.to_string() });
        }
        Ok(())
    }

    fn read_file(&self) -> Result<HistoryFile, SaveError> {
        if !self.path.exists() {
            return Ok(HistoryFile::new());
        }

        let mut file = File::open(&self.path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let history = migrate_history(decompress_and_deserialize(&data)?)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), self.path);
        Ok(history)
    }

    fn write_file(&self, history: &mut HistoryFile) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        history.update_timestamp();
        let data = serialize_and_compress(history)?;

        // Atomic save: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }

    fn update<F>(&self, change: F) -> Result<(), SaveError>
    where
        F: FnOnce(&mut HistoryFile),
    {
        let mut history = self.read_file()?;
        change(&mut history);
        self.write_file(&mut history)
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<MatchRecord>, SaveError> {
        Ok(self.read_file()?.matches)
    }

    fn append(&self, record: MatchRecord) -> Result<(), SaveError> {
        self.update(|history| history.matches.push(record))
    }

    fn clear(&self) -> Result<(), SaveError> {
        self.update(|history| history.matches.clear())?;
        log::info!("Cleared match history in {:?}", self.path);
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<MatchConfig>, SaveError> {
        Ok(self.read_file()?.settings)
    }

    fn save_settings(&self, settings: &MatchConfig) -> Result<(), SaveError> {
        self.update(|history| history.settings = Some(settings.clone()))
    }
}
