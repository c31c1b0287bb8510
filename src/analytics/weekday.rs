//! Weekday and calendar-level patterns used by detailed reports

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::mood::{MoodCategory, MoodEntry};

use super::statistics::mean;

/// Change in share between halves needed to call a category trend
const CATEGORY_TREND_THRESHOLD: f64 = 0.15;
/// Entries needed before a per-category trend is computed
const CATEGORY_TREND_MIN_ENTRIES: usize = 6;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Direction of a category's share over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "Increasing",
            TrendDirection::Decreasing => "Decreasing",
            TrendDirection::Stable => "Stable",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "📈",
            TrendDirection::Decreasing => "📉",
            TrendDirection::Stable => "➡️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    /// 0.0 when the weekday has no scored entry
    pub average_score: f64,
    pub scored_entries: usize,
}

/// Mean score for each weekday, Monday first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayProfile {
    pub averages: Vec<WeekdayAverage>,
}

impl WeekdayProfile {
    /// Best and worst weekday among those with scored entries.
    ///
    /// Ties keep the earlier weekday.
    pub fn best_and_worst(&self) -> Option<(&WeekdayAverage, &WeekdayAverage)> {
        let mut recorded = self.averages.iter().filter(|a| a.scored_entries > 0);
        let first = recorded.next()?;
        let (mut best, mut worst) = (first, first);
        for avg in recorded {
            if avg.average_score > best.average_score {
                best = avg;
            }
            if avg.average_score < worst.average_score {
                worst = avg;
            }
        }
        Some((best, worst))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: u32,
    pub average_score: f64,
}

/// One point of the daily score chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub timestamp: NaiveDateTime,
    pub score: f64,
    pub mood: MoodCategory,
}

pub fn weekday_profile(entries: &[MoodEntry]) -> WeekdayProfile {
    let mut scores: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for entry in entries {
        if let Some(score) = entry.score() {
            scores
                .entry(entry.timestamp.weekday().num_days_from_monday())
                .or_default()
                .push(score);
        }
    }

    let averages = WEEKDAYS
        .into_iter()
        .map(|weekday| {
            let day_scores = scores
                .get(&weekday.num_days_from_monday())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            WeekdayAverage {
                weekday,
                average_score: mean(day_scores),
                scored_entries: day_scores.len(),
            }
        })
        .collect();

    WeekdayProfile { averages }
}

/// Weekdays on which `mood` was recorded most often
pub fn peak_weekdays(entries: &[MoodEntry], mood: MoodCategory) -> Vec<Weekday> {
    let mut counts = [0usize; 7];
    for entry in entries.iter().filter(|e| e.category() == Some(mood)) {
        counts[entry.timestamp.weekday().num_days_from_monday() as usize] += 1;
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    WEEKDAYS
        .into_iter()
        .filter(|d| counts[d.num_days_from_monday() as usize] == max)
        .collect()
}

/// Whether `mood` takes a growing or shrinking share of the later half
pub fn category_trend(entries: &[MoodEntry], mood: MoodCategory) -> TrendDirection {
    let mut resolved: Vec<(NaiveDateTime, bool)> = entries
        .iter()
        .filter_map(|e| e.category().map(|m| (e.timestamp, m == mood)))
        .collect();

    if resolved.len() < CATEGORY_TREND_MIN_ENTRIES {
        return TrendDirection::Stable;
    }
    resolved.sort_by_key(|(ts, _)| *ts);

    let (earlier, recent) = resolved.split_at(resolved.len() / 2);
    let rate = |half: &[(NaiveDateTime, bool)]| {
        half.iter().filter(|(_, hit)| *hit).count() as f64 / half.len() as f64
    };

    let difference = rate(recent) - rate(earlier);
    if difference > CATEGORY_TREND_THRESHOLD {
        TrendDirection::Increasing
    } else if difference < -CATEGORY_TREND_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Average score per calendar month, oldest first
pub fn monthly_averages(entries: &[MoodEntry]) -> Vec<MonthlyAverage> {
    let mut months: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for entry in entries {
        if let Some(score) = entry.score() {
            let date = entry.date();
            months
                .entry((date.year(), date.month()))
                .or_default()
                .push(score);
        }
    }

    months
        .into_iter()
        .map(|((year, month), scores)| MonthlyAverage {
            year,
            month,
            average_score: mean(&scores),
        })
        .collect()
}

/// Chronological score points; unresolved entries chart as Normal
pub fn daily_points(entries: &[MoodEntry]) -> Vec<DailyPoint> {
    let mut points: Vec<DailyPoint> = entries
        .iter()
        .map(|e| {
            let mood = e.category().unwrap_or(MoodCategory::Normal);
            DailyPoint {
                timestamp: e.timestamp,
                score: mood.score(),
                mood,
            }
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    points
}
