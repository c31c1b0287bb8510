//! JSON file journal storage

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

use crate::mood::{MoodCategory, MoodEntry};

use super::models::{CreateEntryRequest, UpdateEntryRequest};
use super::store::EntryStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

type Result<T> = std::result::Result<T, StorageError>;

/// Journal entries stored as a single JSON array
pub struct JournalStorage {
    journal_dir: PathBuf,
}

impl JournalStorage {
    /// Create a new journal storage under `data_dir/journal`
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let journal_dir = data_dir.join("journal");
        fs::create_dir_all(&journal_dir)?;

        Ok(Self { journal_dir })
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mood-journal"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn entries_file(&self) -> PathBuf {
        self.journal_dir.join("entries.json")
    }

    // ===== CRUD Operations =====

    /// List all entries, oldest first
    pub fn list_entries(&self) -> Result<Vec<MoodEntry>> {
        let path = self.entries_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        let mut entries: Vec<MoodEntry> = serde_json::from_str(&content)?;
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    pub fn get_entry(&self, id: Uuid) -> Result<MoodEntry> {
        self.list_entries()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(StorageError::EntryNotFound(id))
    }

    /// Entries with `start <= timestamp < end`
    pub fn entries_in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<MoodEntry>> {
        Ok(self
            .list_entries()?
            .into_iter()
            .filter(|e| e.timestamp >= start && e.timestamp < end)
            .collect())
    }

    pub fn create_entry(&self, request: CreateEntryRequest) -> Result<MoodEntry> {
        let category = parse_mood(&request.mood)?;
        let timestamp = request
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());
        let note = request.note.filter(|n| !n.trim().is_empty());

        let entry = MoodEntry::new(category, note, timestamp);

        let mut entries = self.list_entries()?;
        entries.push(entry.clone());
        entries.sort_by_key(|e| e.timestamp);
        self.save_entries(&entries)?;

        log::info!("Recorded {} entry {}", category.as_str(), entry.id);
        Ok(entry)
    }

    pub fn update_entry(&self, id: Uuid, updates: UpdateEntryRequest) -> Result<MoodEntry> {
        let category = updates.mood.as_deref().map(parse_mood).transpose()?;

        let mut entries = self.list_entries()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StorageError::EntryNotFound(id))?;

        entry.update(category, updates.note);
        let updated = entry.clone();
        self.save_entries(&entries)?;
        Ok(updated)
    }

    pub fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut entries = self.list_entries()?;
        let len_before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == len_before {
            return Err(StorageError::EntryNotFound(id));
        }

        self.save_entries(&entries)?;
        log::info!("Deleted entry {}", id);
        Ok(())
    }

    fn save_entries(&self, entries: &[MoodEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(self.entries_file(), json)?;
        Ok(())
    }
}

impl EntryStore for JournalStorage {
    fn fetch_entries(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<MoodEntry>> {
        self.entries_in_range(start, end)
    }
}

fn parse_mood(raw: &str) -> Result<MoodCategory> {
    MoodCategory::from_id(raw).ok_or_else(|| StorageError::UnknownMood(raw.to_string()))
}
