//! Report data models

use chrono::{Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advice::{ContextualAdvice, MoodPattern, WeeklyTemplateFamily};
use crate::analytics::weekday::{DailyPoint, MonthlyAverage, WeekdayAverage};
use crate::analytics::{DateWindow, StatisticsSnapshot, TextSignals, TimePattern, TrendDirection};
use crate::mood::MoodCategory;

/// Gated report features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    WeeklyInsight,
    PersonalCoaching,
    DetailedReport,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::WeeklyInsight,
        Feature::PersonalCoaching,
        Feature::DetailedReport,
    ];

    /// Stable identifier used by entitlement checks
    pub fn id(self) -> &'static str {
        match self {
            Feature::WeeklyInsight => "weekly_insights",
            Feature::PersonalCoaching => "personal_coaching",
            Feature::DetailedReport => "detailed_reports",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Feature::WeeklyInsight => "Weekly insight",
            Feature::PersonalCoaching => "Personal coaching",
            Feature::DetailedReport => "Detailed report",
        }
    }
}

/// Result of a report request.
///
/// Neither `InsufficientData` nor `Locked` is an error; callers route the
/// user to record more entries or to the upgrade flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum ReportOutcome<T> {
    Ready(T),
    InsufficientData { required: usize, found: usize },
    Locked(Feature),
}

impl<T> ReportOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReportOutcome::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            ReportOutcome::Ready(report) => Some(report),
            _ => None,
        }
    }
}

/// Lookback period of a detailed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::OneMonth,
        ReportPeriod::ThreeMonths,
        ReportPeriod::SixMonths,
        ReportPeriod::OneYear,
    ];

    pub fn months(self) -> u32 {
        match self {
            ReportPeriod::OneMonth => 1,
            ReportPeriod::ThreeMonths => 3,
            ReportPeriod::SixMonths => 6,
            ReportPeriod::OneYear => 12,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ReportPeriod::OneMonth => "1 month",
            ReportPeriod::ThreeMonths => "3 months",
            ReportPeriod::SixMonths => "6 months",
            ReportPeriod::OneYear => "1 year",
        }
    }

    /// Window from the same calendar day `months()` earlier up to `end`.
    ///
    /// Month arithmetic clamps to the last valid day (Mar 31 minus one month
    /// is Feb 28/29).
    pub fn window_ending_on(self, end: NaiveDate) -> DateWindow {
        let start = end
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN);
        DateWindow::new(start, end)
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" | "month" | "one-month" => Ok(ReportPeriod::OneMonth),
            "3m" | "three-months" => Ok(ReportPeriod::ThreeMonths),
            "6m" | "six-months" => Ok(ReportPeriod::SixMonths),
            "12m" | "1y" | "year" | "one-year" => Ok(ReportPeriod::OneYear),
            other => Err(format!(
                "Unknown report period '{}' (expected 1m, 3m, 6m or 1y)",
                other
            )),
        }
    }
}

// ===== Weekly insight =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyInsight {
    pub id: Uuid,
    pub generated_at: NaiveDateTime,
    pub window: DateWindow,
    pub family: WeeklyTemplateFamily,
    /// Rendered template text
    pub summary: String,
    pub dominant_mood: MoodCategory,
    pub recording_days: usize,
    pub highlights: Vec<String>,
    pub encouragement: String,
    pub next_week_focus: String,
    pub statistics: StatisticsSnapshot,
    pub time_pattern: TimePattern,
    pub text_signals: TextSignals,
}

// ===== Personal coaching =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalCoaching {
    pub id: Uuid,
    pub generated_at: NaiveDateTime,
    pub window: DateWindow,
    pub pattern: MoodPattern,
    /// Composition of moods in the window
    pub mood_summary: String,
    /// Canned paragraph for the pattern
    pub advice: String,
    pub action_items: Vec<String>,
    /// Top weighted contextual suggestions, at most three
    pub contextual_advice: Vec<ContextualAdvice>,
    pub next_steps: Vec<String>,
    pub continuity_message: String,
    /// Time-of-day and note observations, as display text
    pub observations: Vec<String>,
    pub statistics: StatisticsSnapshot,
    pub time_pattern: TimePattern,
    pub text_signals: TextSignals,
}

// ===== Detailed report =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightImpact {
    Low,
    Medium,
    High,
}

impl InsightImpact {
    pub fn label(self) -> &'static str {
        match self {
            InsightImpact::Low => "Low",
            InsightImpact::Medium => "Medium",
            InsightImpact::High => "High",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            InsightImpact::Low => "#4CAF50",
            InsightImpact::Medium => "#FF9800",
            InsightImpact::High => "#F44336",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    Weekday,
    Volatility,
    Consistency,
    Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: InsightImpact,
    pub actionable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOverview {
    pub total_entries: usize,
    pub recording_days: usize,
    pub average_score: f64,
    pub dominant_mood: MoodCategory,
    pub consistency: f64,
    /// Later-half minus earlier-half score; 0 until the trend is reliable
    pub overall_trend: f64,
    pub pattern: MoodPattern,
}

/// Frequency and direction of one category over the period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrend {
    pub mood: MoodCategory,
    pub count: usize,
    /// 0-100
    pub percentage: f64,
    pub direction: TrendDirection,
    pub peak_weekdays: Vec<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    pub mood: MoodCategory,
    pub count: usize,
    /// 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub distribution: Vec<DistributionSlice>,
    pub daily_points: Vec<DailyPoint>,
    pub weekday_averages: Vec<WeekdayAverage>,
    pub monthly_averages: Vec<MonthlyAverage>,
}

/// How the later part of the period compares with the earlier part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub score_change: f64,
    pub direction: TrendDirection,
    pub dominant_mood: MoodCategory,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    pub id: Uuid,
    pub generated_at: NaiveDateTime,
    pub period: ReportPeriod,
    pub window: DateWindow,
    pub overview: ReportOverview,
    /// Sorted by count, most frequent first
    pub mood_trends: Vec<MoodTrend>,
    pub insights: Vec<PatternInsight>,
    pub recommendations: Vec<String>,
    pub contextual_advice: Vec<ContextualAdvice>,
    pub comparison: ComparisonSummary,
    pub chart_data: ChartData,
    pub statistics: StatisticsSnapshot,
    pub time_pattern: TimePattern,
    pub text_signals: TextSignals,
}
