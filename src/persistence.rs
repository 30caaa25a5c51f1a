//! Save/load for game snapshots.
//!
//! The engine only talks to the [`SaveStore`] port. [`JsonFileStore`] keeps
//! the autosave as a pretty-printed JSON file, [`MemoryStore`] keeps it in
//! memory (useful for tests and embedding), and [`SaveBook`] manages named
//! save slots in a single JSON file.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game::GameSnapshot;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no save with id {0}")]
    UnknownSave(String),
}

pub trait SaveStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistError>;
    fn load(&self) -> Result<Option<GameSnapshot>, PersistError>;
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// Holds the serialized snapshot text, so saves go through the same JSON
/// encoding a file store would use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Store raw JSON as if it had been saved earlier.
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            contents: Some(json.into()),
        }
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistError> {
        self.contents = Some(serde_json::to_string_pretty(snapshot)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<GameSnapshot>, PersistError> {
        match self.contents.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.contents = None;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        debug!("Wrote save to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<GameSnapshot>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecord {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub state: GameSnapshot,
}

/// Named save slots, all kept in one JSON file.
#[derive(Debug, Clone)]
pub struct SaveBook {
    path: PathBuf,
}

impl SaveBook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn list(&self) -> Result<Vec<SaveRecord>, PersistError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, records: &[SaveRecord]) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn save_as(&self, name: &str, snapshot: &GameSnapshot) -> Result<SaveRecord, PersistError> {
        let mut records = self.list()?;
        let timestamp = Utc::now();

        // Millisecond ids, bumped past any existing id so rapid saves stay unique.
        let mut id_number = timestamp.timestamp_millis();
        while records.iter().any(|r| r.id == id_number.to_string()) {
            id_number += 1;
        }

        let record = SaveRecord {
            id: id_number.to_string(),
            name: name.to_string(),
            timestamp,
            state: snapshot.clone(),
        };
        records.push(record.clone());
        self.write(&records)?;
        info!("Saved '{}' as {}", name, record.id);
        Ok(record)
    }

    pub fn load(&self, id: &str) -> Result<GameSnapshot, PersistError> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.state)
            .ok_or_else(|| PersistError::UnknownSave(id.to_string()))
    }

    pub fn delete(&self, id: &str) -> Result<(), PersistError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(PersistError::UnknownSave(id.to_string()));
        }
        self.write(&records)
    }

    pub fn clear_all(&self) -> Result<(), PersistError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
