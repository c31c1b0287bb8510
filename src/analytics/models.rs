//! Analysis windows and statistics snapshots

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::mood::{MoodCategory, MoodEntry};

/// Minimum number of scored entries before a trend is considered meaningful
pub const RELIABLE_TREND_MIN_ENTRIES: usize = 6;

/// Inclusive calendar range used to select entries and to size consistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window; reversed bounds are swapped
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Window of `days` calendar days ending on `end` (inclusive)
    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: end - Duration::days(span),
            end,
        }
    }

    /// Number of calendar days spanned, inclusive of both ends
    pub fn day_count(&self) -> u32 {
        ((self.end - self.start).num_days() + 1).max(1) as u32
    }

    /// First instant of the window
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// First instant after the window
    pub fn end_exclusive(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN) + Duration::days(1)
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let date = timestamp.date();
        date >= self.start && date <= self.end
    }
}

/// Entries falling inside a window, sorted by timestamp.
///
/// Recomputed per analysis request and never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisWindow {
    pub range: DateWindow,
    pub entries: Vec<MoodEntry>,
}

impl AnalysisWindow {
    pub fn new(range: DateWindow, entries: impl IntoIterator<Item = MoodEntry>) -> Self {
        let mut entries: Vec<MoodEntry> = entries
            .into_iter()
            .filter(|e| range.contains(e.timestamp))
            .collect();
        entries.sort_by_key(|e| e.timestamp);
        Self { range, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Numeric summary of a set of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    /// Count per category; always holds all five categories
    pub distribution: BTreeMap<MoodCategory, usize>,
    /// Most frequent category, ties broken by canonical order
    pub dominant_mood: MoodCategory,
    /// Mean score over entries with a resolvable category
    pub average_score: f64,
    /// Distinct recorded days divided by days in the window
    pub consistency: f64,
    /// Mean score of the later half minus mean score of the earlier half
    pub trend: f64,
    /// Population standard deviation of scores / 4, capped at 1
    pub volatility: f64,
    /// All entries, including unresolved categories
    pub total_entries: usize,
    /// Entries with a resolvable category
    pub scored_entries: usize,
    /// Distinct calendar days with at least one entry
    pub recorded_days: usize,
    /// Days in the analysed window
    pub window_days: u32,
}

impl StatisticsSnapshot {
    pub fn count(&self, mood: MoodCategory) -> usize {
        self.distribution.get(&mood).copied().unwrap_or(0)
    }

    /// Share of scored entries with the given mood
    pub fn ratio(&self, mood: MoodCategory) -> f64 {
        if self.scored_entries == 0 {
            0.0
        } else {
            self.count(mood) as f64 / self.scored_entries as f64
        }
    }

    /// Up to three most frequent categories with a non-zero count
    pub fn top_moods(&self) -> Vec<MoodCategory> {
        let mut ranked: Vec<MoodCategory> = MoodCategory::ALL
            .into_iter()
            .filter(|m| self.count(*m) > 0)
            .collect();
        // Stable sort keeps canonical order among equal counts
        ranked.sort_by(|a, b| self.count(*b).cmp(&self.count(*a)));
        ranked.truncate(3);
        ranked
    }

    /// Number of categories that appear at least once
    pub fn distinct_moods(&self) -> usize {
        self.distribution.values().filter(|c| **c > 0).count()
    }

    pub fn trend_is_reliable(&self) -> bool {
        self.scored_entries >= RELIABLE_TREND_MIN_ENTRIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    #[test]
    fn test_window_day_count_is_inclusive() {
        let window = DateWindow::new(date(3, 1), date(3, 7));
        assert_eq!(window.day_count(), 7);

        let single = DateWindow::new(date(3, 1), date(3, 1));
        assert_eq!(single.day_count(), 1);
    }

    #[test]
    fn test_window_ending_on() {
        let window = DateWindow::ending_on(date(3, 14), 14);
        assert_eq!(window.start, date(3, 1));
        assert_eq!(window.day_count(), 14);
    }

    #[test]
    fn test_window_swaps_reversed_bounds() {
        let window = DateWindow::new(date(3, 9), date(3, 2));
        assert_eq!(window.start, date(3, 2));
        assert_eq!(window.end, date(3, 9));
    }

    #[test]
    fn test_window_bounds() {
        let window = DateWindow::new(date(3, 1), date(3, 2));
        assert_eq!(window.start_datetime(), date(3, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(window.end_exclusive(), date(3, 3).and_hms_opt(0, 0, 0).unwrap());
        assert!(window.contains(date(3, 2).and_hms_opt(23, 30, 0).unwrap()));
        assert!(!window.contains(date(3, 3).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_analysis_window_filters_and_sorts() {
        let range = DateWindow::new(date(3, 1), date(3, 3));
        let late = MoodEntry::new(MoodCategory::Happy, None, date(3, 3).and_hms_opt(9, 0, 0).unwrap());
        let early = MoodEntry::new(MoodCategory::Tired, None, date(3, 1).and_hms_opt(9, 0, 0).unwrap());
        let outside = MoodEntry::new(MoodCategory::Angry, None, date(3, 5).and_hms_opt(9, 0, 0).unwrap());

        let window = AnalysisWindow::new(range, vec![late.clone(), outside, early.clone()]);
        assert_eq!(window.len(), 2);
        assert_eq!(window.entries[0].id, early.id);
        assert_eq!(window.entries[1].id, late.id);
    }
}
