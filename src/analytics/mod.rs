//! Mood analytics: statistics, time-of-day and weekday patterns, note signals

pub mod models;
pub mod statistics;
pub mod text_signals;
pub mod time_patterns;
pub mod weekday;

pub use models::*;
pub use statistics::compute_statistics;
pub use text_signals::{extract_from_entries, extract_text_signals, TextInsight, TextSignals};
pub use time_patterns::{analyze_time_patterns, BandSummary, DayPeriod, TimeInsight, TimePattern};
pub use weekday::{TrendDirection, WeekdayProfile};
