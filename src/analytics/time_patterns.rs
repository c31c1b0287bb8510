//! Time-of-day pattern analysis

use serde::{Deserialize, Serialize};

use crate::mood::{MoodCategory, MoodEntry};

use super::statistics::dominant_mood;

const MORNING_FATIGUE_THRESHOLD: f64 = 0.6;
const EVENING_STRESS_THRESHOLD: f64 = 0.5;
const AFTERNOON_FATIGUE_THRESHOLD: f64 = 0.4;
const LATE_NIGHT_HOUR: u32 = 23;

/// Fixed local-time bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayPeriod {
    /// 06:00 - 11:59
    Morning,
    /// 12:00 - 16:59
    Afternoon,
    /// 17:00 - 21:59
    Evening,
    /// 22:00 - 05:59, wrapping midnight
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=21 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        }
    }

    fn index(self) -> usize {
        match self {
            DayPeriod::Morning => 0,
            DayPeriod::Afternoon => 1,
            DayPeriod::Evening => 2,
            DayPeriod::Night => 3,
        }
    }
}

/// Summary of one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSummary {
    pub period: DayPeriod,
    pub entry_count: usize,
    /// `None` when the band has no resolvable entry
    pub dominant_mood: Option<MoodCategory>,
    /// Share of Tired or Sleepy entries
    pub fatigue_ratio: f64,
    /// Share of Angry or Tired entries
    pub stress_ratio: f64,
}

/// Qualitative observations derived from the bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeInsight {
    MorningFatigue,
    EveningStress,
    AfternoonDip,
    LateNight,
}

impl TimeInsight {
    pub fn message(self) -> &'static str {
        match self {
            TimeInsight::MorningFatigue => {
                "Fatigue clusters in the morning. Reviewing sleep quality and wake-up time is important."
            }
            TimeInsight::EveningStress => {
                "Stress and fatigue tend to build up in the evening. Setting aside time to unwind helps."
            }
            TimeInsight::AfternoonDip => {
                "Energy tends to dip in the afternoon. A short walk or a proper break after lunch can help."
            }
            TimeInsight::LateNight => {
                "Many entries are recorded late at night. An earlier bedtime could lift your morning mood."
            }
        }
    }
}

/// Per-band dominants and the insights they trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePattern {
    /// Always four bands, in `DayPeriod::ALL` order
    pub bands: Vec<BandSummary>,
    /// Entries recorded at 23:00 or later
    pub late_night_entries: usize,
    pub insights: Vec<TimeInsight>,
}

impl TimePattern {
    pub fn band(&self, period: DayPeriod) -> &BandSummary {
        &self.bands[period.index()]
    }

    pub fn dominant(&self, period: DayPeriod) -> Option<MoodCategory> {
        self.band(period).dominant_mood
    }

    pub fn has_insight(&self, insight: TimeInsight) -> bool {
        self.insights.contains(&insight)
    }
}

/// Bucket entries into the four bands and derive insights
pub fn analyze_time_patterns(entries: &[MoodEntry]) -> TimePattern {
    let mut buckets: [Vec<&MoodEntry>; 4] = Default::default();
    for entry in entries {
        buckets[DayPeriod::from_hour(entry.hour()).index()].push(entry);
    }

    let bands: Vec<BandSummary> = DayPeriod::ALL
        .into_iter()
        .map(|period| summarize_band(period, &buckets[period.index()]))
        .collect();

    let late_night_entries = entries
        .iter()
        .filter(|e| e.hour() >= LATE_NIGHT_HOUR)
        .count();

    let mut insights = Vec::new();
    if bands[DayPeriod::Morning.index()].fatigue_ratio > MORNING_FATIGUE_THRESHOLD {
        insights.push(TimeInsight::MorningFatigue);
    }
    if bands[DayPeriod::Evening.index()].stress_ratio > EVENING_STRESS_THRESHOLD {
        insights.push(TimeInsight::EveningStress);
    }
    if bands[DayPeriod::Afternoon.index()].fatigue_ratio > AFTERNOON_FATIGUE_THRESHOLD {
        insights.push(TimeInsight::AfternoonDip);
    }
    if late_night_entries > entries.len() / 3 {
        insights.push(TimeInsight::LateNight);
    }

    TimePattern {
        bands,
        late_night_entries,
        insights,
    }
}

fn summarize_band(period: DayPeriod, entries: &[&MoodEntry]) -> BandSummary {
    let share = |pred: fn(MoodCategory) -> bool| {
        let hits = entries
            .iter()
            .filter(|e| e.category().is_some_and(pred))
            .count();
        hits as f64 / entries.len().max(1) as f64
    };

    BandSummary {
        period,
        entry_count: entries.len(),
        dominant_mood: dominant_mood(entries.iter().copied()),
        fatigue_ratio: share(|m| matches!(m, MoodCategory::Tired | MoodCategory::Sleepy)),
        stress_ratio: share(|m| matches!(m, MoodCategory::Angry | MoodCategory::Tired)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(mood: MoodCategory, day: u32, hour: u32) -> MoodEntry {
        let ts = NaiveDate::from_ymd_opt(2026, 4, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap();
        MoodEntry::new(mood, None, ts)
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(6), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(16), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(21), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(22), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
    }

    #[test]
    fn test_empty_input() {
        let pattern = analyze_time_patterns(&[]);
        assert_eq!(pattern.bands.len(), 4);
        assert!(pattern.insights.is_empty());
        assert_eq!(pattern.dominant(DayPeriod::Morning), None);
    }

    #[test]
    fn test_morning_fatigue() {
        use MoodCategory::*;
        let entries = vec![
            entry(Tired, 1, 7),
            entry(Sleepy, 2, 8),
            entry(Tired, 3, 9),
            entry(Happy, 4, 10),
        ];
        let pattern = analyze_time_patterns(&entries);
        assert_eq!(pattern.band(DayPeriod::Morning).fatigue_ratio, 0.75);
        assert_eq!(pattern.dominant(DayPeriod::Morning), Some(Tired));
        assert!(pattern.has_insight(TimeInsight::MorningFatigue));
        assert!(!pattern.has_insight(TimeInsight::LateNight));
    }

    #[test]
    fn test_morning_fatigue_threshold_is_strict() {
        use MoodCategory::*;
        // 3 of 5 = 0.6, not above the threshold
        let entries = vec![
            entry(Tired, 1, 7),
            entry(Sleepy, 2, 7),
            entry(Tired, 3, 7),
            entry(Happy, 4, 7),
            entry(Normal, 5, 7),
        ];
        let pattern = analyze_time_patterns(&entries);
        assert!(!pattern.has_insight(TimeInsight::MorningFatigue));
    }

    #[test]
    fn test_evening_stress_and_afternoon_dip() {
        use MoodCategory::*;
        let entries = vec![
            entry(Angry, 1, 18),
            entry(Tired, 2, 19),
            entry(Happy, 3, 20),
            entry(Sleepy, 1, 13),
            entry(Normal, 2, 14),
        ];
        let pattern = analyze_time_patterns(&entries);
        assert!(pattern.has_insight(TimeInsight::EveningStress));
        assert!(pattern.has_insight(TimeInsight::AfternoonDip));
        assert!(!pattern.has_insight(TimeInsight::MorningFatigue));
    }

    #[test]
    fn test_late_night_pattern() {
        use MoodCategory::*;
        let entries = vec![
            entry(Normal, 1, 23),
            entry(Normal, 2, 23),
            entry(Happy, 3, 10),
            entry(Happy, 4, 12),
        ];
        let pattern = analyze_time_patterns(&entries);
        assert_eq!(pattern.late_night_entries, 2);
        assert!(pattern.has_insight(TimeInsight::LateNight));
        assert_eq!(pattern.band(DayPeriod::Night).entry_count, 2);
    }

    #[test]
    fn test_all_insights_can_fire_together() {
        use MoodCategory::*;
        let entries = vec![
            entry(Tired, 1, 7),
            entry(Sleepy, 1, 13),
            entry(Angry, 1, 18),
            entry(Tired, 1, 23),
            entry(Sleepy, 2, 23),
        ];
        let pattern = analyze_time_patterns(&entries);
        assert_eq!(pattern.insights.len(), 4);
    }
}
