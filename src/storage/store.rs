//! Entry store contract consumed by the report generators

use chrono::NaiveDateTime;

use crate::analytics::DateWindow;
use crate::mood::MoodEntry;

use super::journal::StorageError;

/// Source of mood entries.
///
/// Implementations may return entries in any order and must return an empty
/// list rather than an error when nothing was recorded.
pub trait EntryStore {
    /// Entries with `start <= timestamp < end`
    fn fetch_entries(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<MoodEntry>, StorageError>;

    fn fetch_window(&self, window: &DateWindow) -> Result<Vec<MoodEntry>, StorageError> {
        self.fetch_entries(window.start_datetime(), window.end_exclusive())
    }
}

/// In-memory store, mostly useful for tests and one-off analysis
impl EntryStore for Vec<MoodEntry> {
    fn fetch_entries(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<MoodEntry>, StorageError> {
        Ok(self
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp < end)
            .cloned()
            .collect())
    }
}

impl<S: EntryStore + ?Sized> EntryStore for &S {
    fn fetch_entries(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<MoodEntry>, StorageError> {
        (**self).fetch_entries(start, end)
    }
}
