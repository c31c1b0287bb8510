//! Keyword signals extracted from entry notes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::mood::MoodEntry;

pub const STRESS_KEYWORDS: [&str; 10] = [
    "work", "busy", "pressure", "deadline", "meeting", "overtime", "tired", "stress", "annoyed",
    "tough",
];

pub const POSITIVE_KEYWORDS: [&str; 10] = [
    "fun", "happy", "achieved", "success", "good", "great", "glad", "satisfied", "fulfilled",
    "relaxed",
];

pub const HEALTH_KEYWORDS: [&str; 10] = [
    "exercise", "walk", "jog", "gym", "yoga", "sleep", "rest", "meditat", "massage", "bath",
];

/// Stress keywords that point at work as the stressor
pub const WORK_KEYWORDS: [&str; 4] = ["work", "busy", "deadline", "meeting"];

const STRESS_SHARE_THRESHOLD: f64 = 0.3;
const POSITIVE_SHARE_THRESHOLD: f64 = 0.4;

/// Insights derived from keyword counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TextInsight {
    /// One stress keyword keeps coming back
    RecurringStressor { keyword: String },
    HealthyActivity,
    StressWithoutSelfCare,
    PositiveNotes,
}

impl TextInsight {
    pub fn message(&self) -> String {
        match self {
            TextInsight::RecurringStressor { keyword } => format!(
                "Stress around \"{}\" shows up often in your notes. Focus on ways to cope in that area.",
                keyword
            ),
            TextInsight::HealthyActivity => {
                "Your notes mention healthy activities. Keeping up these habits matters.".to_string()
            }
            TextInsight::StressWithoutSelfCare => {
                "Your notes lean towards stress with few mentions of rest or exercise. Try to make time for both."
                    .to_string()
            }
            TextInsight::PositiveNotes => {
                "Your notes are mostly positive. Look at what keeps you in this state and keep it going."
                    .to_string()
            }
        }
    }
}

/// Keyword hit counts per group plus the insights they trigger.
///
/// Only keywords with at least one hit are recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSignals {
    pub stress: BTreeMap<String, usize>,
    pub positive: BTreeMap<String, usize>,
    pub health: BTreeMap<String, usize>,
    pub insights: Vec<TextInsight>,
}

impl TextSignals {
    pub fn stress_total(&self) -> usize {
        self.stress.values().sum()
    }

    pub fn positive_total(&self) -> usize {
        self.positive.values().sum()
    }

    pub fn health_total(&self) -> usize {
        self.health.values().sum()
    }

    /// Whether any work-related stress keyword was found
    pub fn has_work_stress(&self) -> bool {
        WORK_KEYWORDS.iter().any(|k| self.stress.contains_key(*k))
    }

    /// Most frequent stress keyword, ties resolved by keyword list order
    pub fn top_stressor(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for keyword in STRESS_KEYWORDS {
            let count = self.stress.get(keyword).copied().unwrap_or(0);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((keyword, count));
            }
        }
        best.map(|(k, _)| k)
    }
}

/// Scan the notes of `entries`
pub fn extract_from_entries(entries: &[MoodEntry]) -> TextSignals {
    extract_text_signals(entries.iter().map(|e| e.note.as_deref()))
}

/// Scan a list of optional notes.
///
/// Every item counts towards the entry total used by the share thresholds,
/// including `None`.
pub fn extract_text_signals<'a>(notes: impl IntoIterator<Item = Option<&'a str>>) -> TextSignals {
    let mut total_entries = 0usize;
    let mut texts = Vec::new();
    for note in notes {
        total_entries += 1;
        if let Some(note) = note {
            texts.push(note.to_lowercase());
        }
    }
    let corpus = texts.join(" ");

    let mut signals = TextSignals {
        stress: count_keywords(&corpus, &STRESS_KEYWORDS),
        positive: count_keywords(&corpus, &POSITIVE_KEYWORDS),
        health: count_keywords(&corpus, &HEALTH_KEYWORDS),
        insights: Vec::new(),
    };

    let stress_total = signals.stress_total();
    let positive_total = signals.positive_total();

    if stress_total > share_of(total_entries, STRESS_SHARE_THRESHOLD) {
        let keyword = signals.top_stressor().unwrap_or("work").to_string();
        signals.insights.push(TextInsight::RecurringStressor { keyword });
    }

    if signals.health_total() > 0 {
        signals.insights.push(TextInsight::HealthyActivity);
    } else if stress_total > positive_total {
        signals.insights.push(TextInsight::StressWithoutSelfCare);
    }

    if positive_total > share_of(total_entries, POSITIVE_SHARE_THRESHOLD) {
        signals.insights.push(TextInsight::PositiveNotes);
    }

    log::debug!(
        "Text signals over {} entries: stress={}, positive={}, health={}",
        total_entries,
        stress_total,
        positive_total,
        signals.health_total()
    );

    signals
}

fn count_keywords(corpus: &str, keywords: &[&str]) -> BTreeMap<String, usize> {
    keywords
        .iter()
        .filter_map(|keyword| {
            let count = corpus.matches(keyword).count();
            (count > 0).then(|| (keyword.to_string(), count))
        })
        .collect()
}

/// Truncated share of the entry count
fn share_of(total: usize, fraction: f64) -> usize {
    (total as f64 * fraction) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_notes() {
        let signals = extract_text_signals(vec![None, None, None]);
        assert!(signals.stress.is_empty());
        assert!(signals.insights.is_empty());
    }

    #[test]
    fn test_counts_are_case_folded_and_non_overlapping() {
        let signals = extract_text_signals(vec![Some("WORK work Work"), Some("Deadline!")]);
        assert_eq!(signals.stress.get("work"), Some(&3));
        assert_eq!(signals.stress.get("deadline"), Some(&1));
        assert!(!signals.stress.contains_key("busy"));
    }

    #[test]
    fn test_recurring_stressor_names_top_keyword() {
        let notes = vec![
            Some("deadline again"),
            Some("another deadline"),
            Some("meeting"),
            None,
        ];
        let signals = extract_text_signals(notes);
        assert_eq!(signals.top_stressor(), Some("deadline"));
        assert_eq!(
            signals.insights[0],
            TextInsight::RecurringStressor {
                keyword: "deadline".to_string()
            }
        );
        // no health words and stress outweighs positive
        assert!(signals.insights.contains(&TextInsight::StressWithoutSelfCare));
    }

    #[test]
    fn test_top_stressor_tie_uses_list_order() {
        let signals = extract_text_signals(vec![Some("meeting busy")]);
        assert_eq!(signals.top_stressor(), Some("busy"));
    }

    #[test]
    fn test_health_mention_suppresses_self_care_warning() {
        let notes = vec![Some("stress stress, then yoga"), Some("busy")];
        let signals = extract_text_signals(notes);
        assert!(signals.insights.contains(&TextInsight::HealthyActivity));
        assert!(!signals.insights.contains(&TextInsight::StressWithoutSelfCare));
    }

    #[test]
    fn test_positive_notes() {
        let notes = vec![Some("great fun"), Some("good day"), None];
        let signals = extract_text_signals(notes);
        assert_eq!(signals.positive_total(), 3);
        assert!(signals.insights.contains(&TextInsight::PositiveNotes));
        assert!(!signals.insights.iter().any(|i| matches!(i, TextInsight::RecurringStressor { .. })));
    }

    #[test]
    fn test_work_stress_detection() {
        let signals = extract_text_signals(vec![Some("so busy today")]);
        assert!(signals.has_work_stress());

        let signals = extract_text_signals(vec![Some("annoyed by traffic")]);
        assert!(!signals.has_work_stress());
    }
}
