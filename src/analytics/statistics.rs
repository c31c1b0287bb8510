//! Statistics engine
//!
//! Pure computations over a slice of entries. Nothing here fails: empty
//! input degrades to a zeroed snapshot whose dominant mood is `Normal`.

use std::collections::{BTreeMap, HashSet};

use crate::mood::{MoodCategory, MoodEntry};

use super::models::{DateWindow, StatisticsSnapshot};

/// Divisor that maps the score standard deviation onto 0..1
const VOLATILITY_SCALE: f64 = 4.0;

/// Compute the statistics snapshot for `entries`.
///
/// `window` is only used as the consistency denominator; entries are not
/// filtered against it.
pub fn compute_statistics(entries: &[MoodEntry], window: &DateWindow) -> StatisticsSnapshot {
    let distribution = tally(entries);
    let scores = scores(entries);
    let recorded_days = entries
        .iter()
        .map(MoodEntry::date)
        .collect::<HashSet<_>>()
        .len();
    let window_days = window.day_count();

    let average_score = mean(&scores);

    StatisticsSnapshot {
        dominant_mood: dominant_from_counts(&distribution).unwrap_or(MoodCategory::Normal),
        average_score,
        consistency: recorded_days as f64 / f64::from(window_days),
        trend: trend(entries),
        volatility: volatility(&scores, average_score),
        total_entries: entries.len(),
        scored_entries: scores.len(),
        recorded_days,
        window_days,
        distribution,
    }
}

/// Count entries per category. All five categories are present.
pub fn tally(entries: &[MoodEntry]) -> BTreeMap<MoodCategory, usize> {
    let mut counts: BTreeMap<MoodCategory, usize> =
        MoodCategory::ALL.into_iter().map(|m| (m, 0)).collect();

    for entry in entries {
        match entry.category() {
            Some(mood) => *counts.entry(mood).or_insert(0) += 1,
            None => {
                log::warn!(
                    "Skipping entry {} with unrecognized mood '{}'",
                    entry.id,
                    entry.mood
                );
            }
        }
    }

    counts
}

/// Most frequent category; ties go to the earliest in canonical order
pub fn dominant_from_counts(counts: &BTreeMap<MoodCategory, usize>) -> Option<MoodCategory> {
    let mut best: Option<(MoodCategory, usize)> = None;
    for mood in MoodCategory::ALL {
        let count = counts.get(&mood).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((mood, count)),
        }
    }
    best.map(|(mood, _)| mood)
}

/// Dominant category of an arbitrary subset of entries
pub fn dominant_mood<'a>(entries: impl IntoIterator<Item = &'a MoodEntry>) -> Option<MoodCategory> {
    let mut counts = BTreeMap::new();
    for mood in entries.into_iter().filter_map(MoodEntry::category) {
        *counts.entry(mood).or_insert(0usize) += 1;
    }
    dominant_from_counts(&counts)
}

/// Scores of entries with a resolvable category, in input order
pub fn scores(entries: &[MoodEntry]) -> Vec<f64> {
    entries.iter().filter_map(MoodEntry::score).collect()
}

/// Arithmetic mean, 0.0 for no values
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Later-half mean minus earlier-half mean after sorting by time.
///
/// The split index is `len / 2`. When either half has no scored entry the
/// trend is 0.
pub fn trend(entries: &[MoodEntry]) -> f64 {
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let midpoint = sorted.len() / 2;
    let (earlier, later) = sorted.split_at(midpoint);

    let earlier: Vec<f64> = earlier.iter().filter_map(|e| e.score()).collect();
    let later: Vec<f64> = later.iter().filter_map(|e| e.score()).collect();

    if earlier.is_empty() || later.is_empty() {
        return 0.0;
    }

    mean(&later) - mean(&earlier)
}

/// Normalized population standard deviation of `scores` around `average`
pub fn volatility(scores: &[f64], average: f64) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }

    let variance = scores
        .iter()
        .map(|s| (s - average).powi(2))
        .sum::<f64>()
        / scores.len() as f64;

    (variance.sqrt() / VOLATILITY_SCALE).min(1.0)
}
