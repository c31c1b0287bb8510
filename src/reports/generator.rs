//! Report generators with injected store, gate and random source
//!
//! Each report type runs behind its own single-flight guard. A request that
//! had to wait for an in-flight generation of the same window receives that
//! generation's outcome instead of generating (and recording) a duplicate.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analytics::DateWindow;
use crate::config::AppConfig;
use crate::mood::MoodEntry;
use crate::storage::EntryStore;

use super::builders;
use super::gate::FeatureGate;
use super::history::ReportHistory;
use super::models::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct FlightState<K, T> {
    generation: u64,
    history: ReportHistory<T>,
    last: Option<(K, ReportOutcome<T>)>,
}

/// Single-flight guard plus history for one report type
struct Flight<K, T> {
    running: Mutex<()>,
    state: Mutex<FlightState<K, T>>,
}

impl<K: PartialEq + Clone, T: Clone> Flight<K, T> {
    fn new(history_limit: usize) -> Self {
        Self {
            running: Mutex::new(()),
            state: Mutex::new(FlightState {
                generation: 0,
                history: ReportHistory::new(history_limit),
                last: None,
            }),
        }
    }

    fn run(&self, key: K, generate: impl FnOnce() -> ReportOutcome<T>) -> ReportOutcome<T> {
        let observed = lock(&self.state).generation;
        let _running = lock(&self.running);

        {
            let state = lock(&self.state);
            if state.generation != observed {
                if let Some((last_key, outcome)) = &state.last {
                    if *last_key == key {
                        log::debug!("Coalesced onto generation {}", state.generation);
                        return outcome.clone();
                    }
                }
            }
        }

        let outcome = generate();

        let mut state = lock(&self.state);
        state.generation += 1;
        if let ReportOutcome::Ready(report) = &outcome {
            state.history.push(report.clone());
        }
        state.last = Some((key, outcome.clone()));
        outcome
    }

    fn history(&self) -> ReportHistory<T> {
        lock(&self.state).history.clone()
    }
}

/// Generates and records the three report types.
///
/// History is owned by the generator and lives as long as it does.
pub struct ReportGenerator<S, G> {
    store: S,
    gate: G,
    config: AppConfig,
    rng: Mutex<StdRng>,
    weekly: Flight<DateWindow, WeeklyInsight>,
    coaching: Flight<DateWindow, PersonalCoaching>,
    detailed: Flight<(ReportPeriod, DateWindow), DetailedReport>,
}

impl<S: EntryStore, G: FeatureGate> ReportGenerator<S, G> {
    pub fn new(store: S, gate: G, config: AppConfig) -> Self {
        Self::with_rng(store, gate, config, StdRng::from_entropy())
    }

    /// Use a fixed random source, e.g. a seeded `StdRng` in tests
    pub fn with_rng(store: S, gate: G, config: AppConfig, rng: StdRng) -> Self {
        Self {
            weekly: Flight::new(config.weekly.history_limit),
            coaching: Flight::new(config.coaching.history_limit),
            detailed: Flight::new(config.detailed.history_limit),
            store,
            gate,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store failures count as "no data"
    fn fetch(&self, window: &DateWindow) -> Vec<MoodEntry> {
        match self.store.fetch_window(window) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Entry store unavailable for {} to {}: {}",
                    window.start,
                    window.end,
                    e
                );
                Vec::new()
            }
        }
    }

    fn check_gate<T>(&self, feature: Feature) -> Option<ReportOutcome<T>> {
        if self.gate.is_feature_enabled(feature) {
            None
        } else {
            log::info!("{} is locked", feature.display_name());
            Some(ReportOutcome::Locked(feature))
        }
    }

    /// Weekly insight for the window ending on `today`
    pub fn generate_weekly_insight(&self, today: NaiveDate) -> ReportOutcome<WeeklyInsight> {
        if let Some(locked) = self.check_gate(Feature::WeeklyInsight) {
            return locked;
        }
        let settings = self.config.weekly;
        let window = DateWindow::ending_on(today, settings.window_days);

        self.weekly.run(window, || {
            let entries = self.fetch(&window);
            let mut rng = lock(&self.rng);
            builders::generate_weekly_insight(&entries, window, settings.min_entries, &mut *rng)
        })
    }

    /// Personal coaching for the window ending on `today`
    pub fn generate_personal_coaching(&self, today: NaiveDate) -> ReportOutcome<PersonalCoaching> {
        if let Some(locked) = self.check_gate(Feature::PersonalCoaching) {
            return locked;
        }
        let settings = self.config.coaching;
        let window = DateWindow::ending_on(today, settings.window_days);

        self.coaching.run(window, || {
            let entries = self.fetch(&window);
            builders::generate_personal_coaching(&entries, window, settings.min_entries)
        })
    }

    /// Detailed report for `period` ending on `today`
    pub fn generate_detailed_report(
        &self,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> ReportOutcome<DetailedReport> {
        if let Some(locked) = self.check_gate(Feature::DetailedReport) {
            return locked;
        }
        let min_entries = self.config.detailed.min_entries;
        let window = period.window_ending_on(today);

        self.detailed.run((period, window), || {
            let entries = self.fetch(&window);
            builders::generate_detailed_report(&entries, period, window, min_entries)
        })
    }

    pub fn weekly_history(&self) -> ReportHistory<WeeklyInsight> {
        self.weekly.history()
    }

    pub fn coaching_history(&self) -> ReportHistory<PersonalCoaching> {
        self.coaching.history()
    }

    pub fn detailed_history(&self) -> ReportHistory<DetailedReport> {
        self.detailed.history()
    }

    pub fn clear_histories(&self) {
        lock(&self.weekly.state).history.clear();
        lock(&self.coaching.state).history.clear();
        lock(&self.detailed.state).history.clear();
    }
}
