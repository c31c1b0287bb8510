//! Mood journal analytics: statistics, pattern detection, note signals and
//! rule-based weekly insights, coaching and detailed reports.

pub mod advice;
pub mod analytics;
pub mod config;
pub mod export;
pub mod mood;
pub mod reports;
pub mod storage;
