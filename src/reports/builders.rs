//! Pure report builders
//!
//! Every builder narrows the entries to its window, rejects windows below
//! the minimum entry count and otherwise runs statistics, time patterns,
//! text signals and advice selection before assembling the report.

use chrono::{Local, NaiveDateTime};
use rand::RngCore;
use uuid::Uuid;

use crate::advice::{
    contextual_advice, continuity_message, mood_summary, select_advice, weekly,
    WeeklyTemplateContext, WeeklyTemplateFamily,
};
use crate::analytics::weekday::{
    category_trend, daily_points, monthly_averages, peak_weekdays, weekday_name, weekday_profile,
    WeekdayProfile,
};
use crate::analytics::{
    analyze_time_patterns, compute_statistics, extract_from_entries, AnalysisWindow, DateWindow,
    StatisticsSnapshot, TextSignals, TimePattern, TrendDirection,
};
use crate::mood::{MoodCategory, MoodEntry};

use super::models::*;

pub const WEEKLY_MIN_ENTRIES: usize = 3;
pub const COACHING_MIN_ENTRIES: usize = 5;
pub const DETAILED_MIN_ENTRIES: usize = 3;

/// Score gap between best and worst weekday that counts as high impact
const WEEKDAY_GAP_HIGH_IMPACT: f64 = 0.5;
/// Overall score change treated as a real shift
const OVERALL_TREND_THRESHOLD: f64 = 0.3;

/// Shared analysis pass over one window
struct Analysis {
    window: AnalysisWindow,
    statistics: StatisticsSnapshot,
    time_pattern: TimePattern,
    text_signals: TextSignals,
}

impl Analysis {
    fn run(window: AnalysisWindow) -> Self {
        let statistics = compute_statistics(&window.entries, &window.range);
        let time_pattern = analyze_time_patterns(&window.entries);
        let text_signals = extract_from_entries(&window.entries);
        Self {
            window,
            statistics,
            time_pattern,
            text_signals,
        }
    }
}

/// Narrow and check the entry count, or return the rejection outcome
fn prepare<T>(
    entries: &[MoodEntry],
    range: DateWindow,
    min_entries: usize,
) -> Result<Analysis, ReportOutcome<T>> {
    let window = AnalysisWindow::new(range, entries.iter().cloned());
    if window.len() < min_entries {
        log::debug!(
            "Not enough entries between {} and {}: {} < {}",
            range.start,
            range.end,
            window.len(),
            min_entries
        );
        return Err(ReportOutcome::InsufficientData {
            required: min_entries,
            found: window.len(),
        });
    }
    Ok(Analysis::run(window))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ===== Weekly insight =====

pub fn generate_weekly_insight(
    entries: &[MoodEntry],
    range: DateWindow,
    min_entries: usize,
    rng: &mut dyn RngCore,
) -> ReportOutcome<WeeklyInsight> {
    let analysis = match prepare(entries, range, min_entries) {
        Ok(analysis) => analysis,
        Err(outcome) => return outcome,
    };
    let stats = &analysis.statistics;

    let family = WeeklyTemplateFamily::select(stats);
    let summary = family.render(&WeeklyTemplateContext::from_stats(stats), rng);

    ReportOutcome::Ready(WeeklyInsight {
        id: Uuid::new_v4(),
        generated_at: now(),
        window: range,
        family,
        summary,
        dominant_mood: stats.dominant_mood,
        recording_days: stats.recorded_days,
        highlights: weekly::highlights(stats),
        encouragement: weekly::encouragement(stats).to_string(),
        next_week_focus: weekly::next_week_focus(stats.dominant_mood).to_string(),
        statistics: analysis.statistics.clone(),
        time_pattern: analysis.time_pattern,
        text_signals: analysis.text_signals,
    })
}

// ===== Personal coaching =====

pub fn generate_personal_coaching(
    entries: &[MoodEntry],
    range: DateWindow,
    min_entries: usize,
) -> ReportOutcome<PersonalCoaching> {
    let analysis = match prepare(entries, range, min_entries) {
        Ok(analysis) => analysis,
        Err(outcome) => return outcome,
    };
    let stats = &analysis.statistics;
    let selected = select_advice(stats);

    let observations = analysis
        .time_pattern
        .insights
        .iter()
        .map(|i| i.message().to_string())
        .chain(analysis.text_signals.insights.iter().map(|i| i.message()))
        .collect();

    ReportOutcome::Ready(PersonalCoaching {
        id: Uuid::new_v4(),
        generated_at: now(),
        window: range,
        pattern: selected.pattern,
        mood_summary: mood_summary(stats, &analysis.time_pattern),
        advice: selected.advice,
        action_items: selected.action_items,
        contextual_advice: contextual_advice(stats, &analysis.time_pattern, &analysis.text_signals),
        next_steps: selected.next_steps,
        continuity_message: continuity_message(stats.total_entries),
        observations,
        statistics: analysis.statistics.clone(),
        time_pattern: analysis.time_pattern,
        text_signals: analysis.text_signals,
    })
}

// ===== Detailed report =====

pub fn generate_detailed_report(
    entries: &[MoodEntry],
    period: ReportPeriod,
    range: DateWindow,
    min_entries: usize,
) -> ReportOutcome<DetailedReport> {
    let analysis = match prepare(entries, range, min_entries) {
        Ok(analysis) => analysis,
        Err(outcome) => return outcome,
    };
    let stats = &analysis.statistics;
    let entries = &analysis.window.entries;

    let overall_trend = if stats.trend_is_reliable() {
        stats.trend
    } else {
        0.0
    };
    let profile = weekday_profile(entries);
    let pattern = select_advice(stats).pattern;

    let overview = ReportOverview {
        total_entries: stats.total_entries,
        recording_days: stats.recorded_days,
        average_score: stats.average_score,
        dominant_mood: stats.dominant_mood,
        consistency: stats.consistency,
        overall_trend,
        pattern,
    };

    let chart_data = ChartData {
        distribution: distribution_slices(stats),
        daily_points: daily_points(entries),
        weekday_averages: profile.averages.clone(),
        monthly_averages: monthly_averages(entries),
    };

    ReportOutcome::Ready(DetailedReport {
        id: Uuid::new_v4(),
        generated_at: now(),
        period,
        window: range,
        mood_trends: mood_trends(entries, stats),
        insights: pattern_insights(stats, &profile, overall_trend),
        recommendations: recommendations(stats, overall_trend),
        contextual_advice: contextual_advice(stats, &analysis.time_pattern, &analysis.text_signals),
        comparison: comparison(stats, overall_trend),
        overview,
        chart_data,
        statistics: analysis.statistics.clone(),
        time_pattern: analysis.time_pattern,
        text_signals: analysis.text_signals,
    })
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn distribution_slices(stats: &StatisticsSnapshot) -> Vec<DistributionSlice> {
    MoodCategory::ALL
        .into_iter()
        .map(|mood| DistributionSlice {
            mood,
            count: stats.count(mood),
            percentage: percentage(stats.count(mood), stats.scored_entries),
        })
        .collect()
}

fn mood_trends(entries: &[MoodEntry], stats: &StatisticsSnapshot) -> Vec<MoodTrend> {
    let mut trends: Vec<MoodTrend> = MoodCategory::ALL
        .into_iter()
        .map(|mood| MoodTrend {
            mood,
            count: stats.count(mood),
            percentage: percentage(stats.count(mood), stats.scored_entries),
            direction: category_trend(entries, mood),
            peak_weekdays: peak_weekdays(entries, mood),
        })
        .collect();
    trends.sort_by(|a, b| b.count.cmp(&a.count));
    trends
}

fn pattern_insights(
    stats: &StatisticsSnapshot,
    profile: &WeekdayProfile,
    overall_trend: f64,
) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    if let Some((best, worst)) = profile.best_and_worst() {
        if best.weekday != worst.weekday {
            let gap = best.average_score - worst.average_score;
            insights.push(PatternInsight {
                kind: InsightKind::Weekday,
                title: "Weekly rhythm".to_string(),
                description: format!(
                    "{} tends to be your best day, while your mood dips most on {}.",
                    weekday_name(best.weekday),
                    weekday_name(worst.weekday)
                ),
                impact: if gap > WEEKDAY_GAP_HIGH_IMPACT {
                    InsightImpact::High
                } else {
                    InsightImpact::Medium
                },
                actionable: true,
            });
        }
    }

    if stats.volatility > 0.0 {
        let (impact, description) = if stats.volatility > 0.7 {
            (
                InsightImpact::High,
                "Your mood swings a lot from day to day. A steadier routine can help smooth it out.",
            )
        } else if stats.volatility > 0.4 {
            (
                InsightImpact::Medium,
                "Your mood varies moderately. That is within a natural range, and knowing the pattern makes it easier to anticipate.",
            )
        } else {
            (
                InsightImpact::Low,
                "Your mood is steady without large swings. Keeping this stability is what matters now.",
            )
        };
        insights.push(PatternInsight {
            kind: InsightKind::Volatility,
            title: "Mood variability".to_string(),
            description: description.to_string(),
            impact,
            actionable: stats.volatility > 0.4,
        });
    }

    let (impact, description, actionable) = if stats.consistency > 0.85 {
        (
            InsightImpact::Low,
            "You record very consistently. The habit is firmly in place.",
            false,
        )
    } else if stats.consistency > 0.6 {
        (
            InsightImpact::Medium,
            "Your recording is fairly regular. A steadier habit will make the analysis more accurate.",
            true,
        )
    } else {
        (
            InsightImpact::High,
            "There is room to record more regularly. More frequent entries reveal your mood patterns in more detail.",
            true,
        )
    };
    insights.push(PatternInsight {
        kind: InsightKind::Consistency,
        title: "Recording consistency".to_string(),
        description: description.to_string(),
        impact,
        actionable,
    });

    let (impact, description) = if overall_trend > OVERALL_TREND_THRESHOLD {
        (
            InsightImpact::Low,
            "Your mood is improving overall. Your current habits seem to be having a good effect.",
        )
    } else if overall_trend < -OVERALL_TREND_THRESHOLD {
        (
            InsightImpact::High,
            "Your mood is trending down. Reviewing daily habits and sources of stress could help.",
        )
    } else {
        (
            InsightImpact::Medium,
            "Your mood is relatively stable. There are no big shifts, so small improvements add up.",
        )
    };
    insights.push(PatternInsight {
        kind: InsightKind::Trend,
        title: "Overall trend".to_string(),
        description: description.to_string(),
        impact,
        actionable: true,
    });

    insights
}

fn recommendations(stats: &StatisticsSnapshot, overall_trend: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if stats.consistency < 0.7 {
        recommendations.push("Record at the same time every day to turn it into a habit".to_string());
    }
    if stats.volatility > 0.6 {
        recommendations.push("Keep regular sleep and meal times to steady your mood".to_string());
    }
    if overall_trend < -0.2 {
        recommendations.push("Bring in relaxation or light exercise to lift your mood".to_string());
    }

    match stats.dominant_mood {
        MoodCategory::Tired => recommendations
            .push("With fatigue this common, prioritize rest and stress management".to_string()),
        MoodCategory::Sleepy => recommendations
            .push("With sleepiness this common, review how long and how well you sleep".to_string()),
        MoodCategory::Angry => recommendations
            .push("With irritation this common, finding a way to release stress is important".to_string()),
        MoodCategory::Happy | MoodCategory::Normal => {}
    }

    recommendations.push("Keep recording to uncover more detailed patterns".to_string());
    recommendations
}

fn comparison(stats: &StatisticsSnapshot, overall_trend: f64) -> ComparisonSummary {
    let direction = if overall_trend > OVERALL_TREND_THRESHOLD {
        TrendDirection::Increasing
    } else if overall_trend < -OVERALL_TREND_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let message = if !stats.trend_is_reliable() {
        "Not enough entries yet to compare the earlier and later parts of this period.".to_string()
    } else {
        match direction {
            TrendDirection::Increasing => format!(
                "Your mood in the later part of this period was {:.1} points higher than in the earlier part.",
                overall_trend
            ),
            TrendDirection::Decreasing => format!(
                "Your mood in the later part of this period was {:.1} points lower than in the earlier part.",
                overall_trend.abs()
            ),
            TrendDirection::Stable => {
                "Your mood stayed about the same across this period.".to_string()
            }
        }
    };

    ComparisonSummary {
        score_change: overall_trend,
        direction,
        dominant_mood: stats.dominant_mood,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::MoodPattern;
    use chrono::{Duration, NaiveDate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap() + Duration::days(offset)
    }

    fn series(moods: &[MoodCategory], hour: u32) -> Vec<MoodEntry> {
        moods
            .iter()
            .enumerate()
            .map(|(i, m)| MoodEntry::new(*m, None, day(i as i64).and_hms_opt(hour, 0, 0).unwrap()))
            .collect()
    }

    #[test]
    fn test_weekly_insufficient_below_three() {
        use MoodCategory::*;
        let entries = series(&[Happy, Normal], 10);
        let outcome = generate_weekly_insight(
            &entries,
            DateWindow::ending_on(day(6), 7),
            WEEKLY_MIN_ENTRIES,
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(
            outcome,
            ReportOutcome::InsufficientData {
                required: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_entries_outside_window_do_not_count() {
        use MoodCategory::*;
        let entries = series(&[Happy, Happy, Happy, Happy], 10);
        // window only covers the last two days
        let outcome = generate_weekly_insight(
            &entries,
            DateWindow::new(day(2), day(3)),
            WEEKLY_MIN_ENTRIES,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            outcome,
            ReportOutcome::InsufficientData { found: 2, .. }
        ));
    }

    #[test]
    fn test_weekly_insight_end_to_end() {
        use MoodCategory::*;
        let entries = series(&[Happy, Happy, Happy, Normal, Happy, Happy, Happy], 10);
        let insight = generate_weekly_insight(
            &entries,
            DateWindow::ending_on(day(6), 7),
            WEEKLY_MIN_ENTRIES,
            &mut StdRng::seed_from_u64(3),
        )
        .ready()
        .unwrap();

        assert_eq!(insight.family, WeeklyTemplateFamily::Positive);
        assert_eq!(insight.dominant_mood, Happy);
        assert_eq!(insight.recording_days, 7);
        assert!(!insight.summary.is_empty());
        assert!(insight.highlights.iter().any(|h| h.contains("daily recording")));
        assert_eq!(insight.next_week_focus, weekly::next_week_focus(Happy));
        assert!((insight.statistics.average_score - 12.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_seeded_output_is_stable() {
        use MoodCategory::*;
        let entries = series(&[Normal, Tired, Normal], 10);
        let render = |seed| {
            generate_weekly_insight(
                &entries,
                DateWindow::ending_on(day(6), 7),
                WEEKLY_MIN_ENTRIES,
                &mut StdRng::seed_from_u64(seed),
            )
            .ready()
            .unwrap()
            .summary
        };
        assert_eq!(render(11), render(11));
    }

    #[test]
    fn test_coaching_insufficient_below_five() {
        use MoodCategory::*;
        let entries = series(&[Happy, Normal, Tired, Angry], 10);
        let outcome =
            generate_personal_coaching(&entries, DateWindow::ending_on(day(13), 14), COACHING_MIN_ENTRIES);
        assert_eq!(
            outcome,
            ReportOutcome::InsufficientData {
                required: 5,
                found: 4
            }
        );
    }

    #[test]
    fn test_coaching_report() {
        use MoodCategory::*;
        let entries = series(&[Tired, Tired, Sleepy, Tired, Normal, Tired], 8);
        let coaching =
            generate_personal_coaching(&entries, DateWindow::ending_on(day(13), 14), COACHING_MIN_ENTRIES)
                .ready()
                .unwrap();

        assert_eq!(coaching.next_steps.len(), 3);
        assert!(coaching.action_items.len() >= 2);
        assert!(coaching.contextual_advice.len() <= 3);
        assert!(coaching.mood_summary.contains("67%"));
        assert!(coaching.continuity_message.starts_with("6 entries"));
        // all entries in the morning, mostly tired
        assert!(coaching
            .observations
            .iter()
            .any(|o| o.contains("morning")));
    }

    #[test]
    fn test_advice_is_deterministic_per_snapshot() {
        use MoodCategory::*;
        let entries = series(&[Angry, Angry, Angry, Happy, Happy, Happy], 12);
        let window = DateWindow::ending_on(day(13), 14);
        let a = generate_personal_coaching(&entries, window, COACHING_MIN_ENTRIES)
            .ready()
            .unwrap();
        let b = generate_personal_coaching(&entries, window, COACHING_MIN_ENTRIES)
            .ready()
            .unwrap();
        assert_eq!(a.pattern, MoodPattern::Improving);
        assert_eq!(a.pattern, b.pattern);
        assert_eq!(a.advice, b.advice);
    }

    #[test]
    fn test_detailed_insufficient_below_three() {
        use MoodCategory::*;
        let entries = series(&[Happy, Happy], 10);
        let outcome = generate_detailed_report(
            &entries,
            ReportPeriod::OneMonth,
            ReportPeriod::OneMonth.window_ending_on(day(20)),
            DETAILED_MIN_ENTRIES,
        );
        assert!(matches!(
            outcome,
            ReportOutcome::InsufficientData { required: 3, found: 2 }
        ));
    }

    #[test]
    fn test_detailed_report_sections() {
        use MoodCategory::*;
        let entries = series(
            &[Normal, Happy, Tired, Tired, Angry, Tired, Tired, Sleepy, Tired, Normal],
            18,
        );
        let report = generate_detailed_report(
            &entries,
            ReportPeriod::OneMonth,
            ReportPeriod::OneMonth.window_ending_on(day(20)),
            DETAILED_MIN_ENTRIES,
        )
        .ready()
        .unwrap();

        assert_eq!(report.overview.total_entries, 10);
        assert_eq!(report.overview.dominant_mood, Tired);
        assert_eq!(report.mood_trends.len(), 5);
        assert_eq!(report.mood_trends[0].mood, Tired);
        assert!((report.mood_trends[0].percentage - 50.0).abs() < 1e-9);

        let kinds: Vec<InsightKind> = report.insights.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&InsightKind::Consistency));
        assert!(kinds.contains(&InsightKind::Trend));

        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("fatigue")));
        assert_eq!(
            report.recommendations.last().unwrap(),
            "Keep recording to uncover more detailed patterns"
        );

        assert_eq!(report.chart_data.distribution.len(), 5);
        assert_eq!(report.chart_data.daily_points.len(), 10);
        assert_eq!(report.chart_data.weekday_averages.len(), 7);
        assert_eq!(report.chart_data.monthly_averages.len(), 1);
    }

    #[test]
    fn test_percentages_ignore_unresolved_entries() {
        use MoodCategory::*;
        let mut entries = series(&[Happy, Tired, Tired, Normal, Normal], 10);
        entries[4].mood = "elated".to_string();
        let report = generate_detailed_report(
            &entries,
            ReportPeriod::OneMonth,
            ReportPeriod::OneMonth.window_ending_on(day(20)),
            DETAILED_MIN_ENTRIES,
        )
        .ready()
        .unwrap();

        let total: f64 = report.chart_data.distribution.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        let tired = report.mood_trends.iter().find(|t| t.mood == Tired).unwrap();
        assert!((tired.percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_needs_six_entries_in_detailed_report() {
        use MoodCategory::*;
        let entries = series(&[Angry, Angry, Happy, Happy, Happy], 10);
        let report = generate_detailed_report(
            &entries,
            ReportPeriod::OneMonth,
            ReportPeriod::OneMonth.window_ending_on(day(20)),
            DETAILED_MIN_ENTRIES,
        )
        .ready()
        .unwrap();
        assert_eq!(report.overview.overall_trend, 0.0);
        assert_eq!(report.comparison.direction, TrendDirection::Stable);
        assert!(report.comparison.message.starts_with("Not enough"));
    }
}
