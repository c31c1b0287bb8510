//! Mood taxonomy and journal entry data models

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters kept in an entry note
pub const MAX_NOTE_CHARS: usize = 140;

/// One of the five fixed mood categories.
///
/// Declaration order is the canonical order used for every tie-break
/// (dominant mood, top moods, band dominants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Happy,
    Normal,
    Tired,
    Angry,
    Sleepy,
}

impl MoodCategory {
    /// All categories in canonical order
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::Happy,
        MoodCategory::Normal,
        MoodCategory::Tired,
        MoodCategory::Angry,
        MoodCategory::Sleepy,
    ];

    /// Signed score used for averaging (-2.0 ..= 2.0)
    pub fn score(self) -> f64 {
        match self {
            MoodCategory::Happy => 2.0,
            MoodCategory::Normal => 0.0,
            MoodCategory::Tired => -1.0,
            MoodCategory::Sleepy => -0.5,
            MoodCategory::Angry => -2.0,
        }
    }

    /// Stable identifier used in storage
    pub fn as_str(self) -> &'static str {
        match self {
            MoodCategory::Happy => "happy",
            MoodCategory::Normal => "normal",
            MoodCategory::Tired => "tired",
            MoodCategory::Angry => "angry",
            MoodCategory::Sleepy => "sleepy",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MoodCategory::Happy => "Happy",
            MoodCategory::Normal => "Normal",
            MoodCategory::Tired => "Tired",
            MoodCategory::Angry => "Angry",
            MoodCategory::Sleepy => "Sleepy",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodCategory::Happy => "😃",
            MoodCategory::Normal => "🙂",
            MoodCategory::Tired => "😫",
            MoodCategory::Angry => "😡",
            MoodCategory::Sleepy => "😴",
        }
    }

    /// Pastel theme color for light appearance
    pub fn theme_color(self) -> &'static str {
        match self {
            MoodCategory::Happy => "#FFE5B4",
            MoodCategory::Normal => "#B4E5FF",
            MoodCategory::Tired => "#E5D4FF",
            MoodCategory::Angry => "#FFB4B4",
            MoodCategory::Sleepy => "#C8E6C9",
        }
    }

    /// Theme color for dark appearance
    pub fn dark_theme_color(self) -> &'static str {
        match self {
            MoodCategory::Happy => "#8B6B47",
            MoodCategory::Normal => "#4A7A8C",
            MoodCategory::Tired => "#6B5B8C",
            MoodCategory::Angry => "#8B4545",
            MoodCategory::Sleepy => "#4A6B50",
        }
    }

    /// Parse a stored identifier; unknown values resolve to `None`
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(id.trim()))
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown mood: {}", s))
    }
}

/// A single recorded mood.
///
/// The mood is kept as its raw identifier so that entries written by other
/// clients with an unrecognized value still load; use [`MoodEntry::category`]
/// to resolve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Raw mood identifier
    pub mood: String,
    /// Optional note, at most 140 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Local wall-clock time of the recording
    pub timestamp: NaiveDateTime,
}

impl MoodEntry {
    /// Create a new entry. Notes longer than the limit are truncated.
    pub fn new(category: MoodCategory, note: Option<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            mood: category.as_str().to_string(),
            note: note.map(truncate_note),
            timestamp,
        }
    }

    /// Resolve the stored mood, `None` when the identifier is unknown
    pub fn category(&self) -> Option<MoodCategory> {
        MoodCategory::from_id(&self.mood)
    }

    /// Numeric score, `None` for unresolved categories
    pub fn score(&self) -> Option<f64> {
        self.category().map(MoodCategory::score)
    }

    /// Calendar date of the entry
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Replace the category and/or note
    pub fn update(&mut self, category: Option<MoodCategory>, note: Option<String>) {
        if let Some(category) = category {
            self.mood = category.as_str().to_string();
        }
        if let Some(note) = note {
            self.note = if note.is_empty() {
                None
            } else {
                Some(truncate_note(note))
            };
        }
    }
}

fn truncate_note(note: String) -> String {
    if note.chars().count() > MAX_NOTE_CHARS {
        note.chars().take(MAX_NOTE_CHARS).collect()
    } else {
        note
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_scores() {
        assert_eq!(MoodCategory::Happy.score(), 2.0);
        assert_eq!(MoodCategory::Normal.score(), 0.0);
        assert_eq!(MoodCategory::Tired.score(), -1.0);
        assert_eq!(MoodCategory::Sleepy.score(), -0.5);
        assert_eq!(MoodCategory::Angry.score(), -2.0);
    }

    #[test]
    fn test_canonical_order() {
        let ids: Vec<&str> = MoodCategory::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(ids, vec!["happy", "normal", "tired", "angry", "sleepy"]);
    }

    #[test]
    fn test_from_id() {
        assert_eq!(MoodCategory::from_id("happy"), Some(MoodCategory::Happy));
        assert_eq!(MoodCategory::from_id(" Sleepy "), Some(MoodCategory::Sleepy));
        assert_eq!(MoodCategory::from_id("excited"), None);
        assert!("grumpy".parse::<MoodCategory>().is_err());
    }

    #[test]
    fn test_note_truncated_on_create() {
        let long = "a".repeat(200);
        let entry = MoodEntry::new(MoodCategory::Happy, Some(long), at(1, 9));
        assert_eq!(entry.note.as_ref().unwrap().chars().count(), MAX_NOTE_CHARS);
    }

    #[test]
    fn test_note_truncation_counts_chars_not_bytes() {
        let long = "疲".repeat(150);
        let entry = MoodEntry::new(MoodCategory::Tired, Some(long), at(1, 9));
        assert_eq!(entry.note.unwrap().chars().count(), MAX_NOTE_CHARS);
    }

    #[test]
    fn test_unknown_category_is_unscored() {
        let mut entry = MoodEntry::new(MoodCategory::Happy, None, at(2, 10));
        entry.mood = "ecstatic".to_string();
        assert_eq!(entry.category(), None);
        assert_eq!(entry.score(), None);
    }

    #[test]
    fn test_update() {
        let mut entry = MoodEntry::new(MoodCategory::Happy, Some("good day".into()), at(3, 8));
        entry.update(Some(MoodCategory::Angry), None);
        assert_eq!(entry.category(), Some(MoodCategory::Angry));
        assert_eq!(entry.note.as_deref(), Some("good day"));

        entry.update(None, Some(String::new()));
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_serde_uses_raw_identifier() {
        let entry = MoodEntry::new(MoodCategory::Sleepy, None, at(4, 23));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"mood\":\"sleepy\""));
        assert!(!json.contains("note"));

        let back: MoodEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.hour(), 23);
    }
}
