//! Journal request types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request to record a new entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Raw mood identifier (happy, normal, tired, angry, sleepy)
    pub mood: String,
    /// Optional note, truncated to 140 characters
    #[serde(default)]
    pub note: Option<String>,
    /// Defaults to the current local time
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// Request to update an existing entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    pub mood: Option<String>,
    /// An empty string clears the note
    pub note: Option<String>,
}
