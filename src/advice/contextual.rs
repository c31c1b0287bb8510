//! Weighted contextual advice for coaching and detailed reports

use serde::{Deserialize, Serialize};

use crate::analytics::{DayPeriod, StatisticsSnapshot, TextSignals, TimePattern};
use crate::mood::MoodCategory;

/// Items emitted from the pool
const MAX_CONTEXTUAL_ITEMS: usize = 3;

/// Stress keyword variety that points at the environment
const ENVIRONMENT_STRESS_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdviceTheme {
    Sleep,
    Stress,
    Fatigue,
    PositiveHabit,
    Environment,
}

impl AdviceTheme {
    pub fn weight(self) -> u8 {
        match self {
            AdviceTheme::Sleep => 10,
            AdviceTheme::Stress => 8,
            AdviceTheme::Fatigue => 7,
            AdviceTheme::PositiveHabit => 6,
            AdviceTheme::Environment => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualAdvice {
    pub theme: AdviceTheme,
    pub text: String,
}

/// Fire every rule, sort by weight and keep the top three.
///
/// Fewer than three rules firing yields a shorter list.
pub fn contextual_advice(
    stats: &StatisticsSnapshot,
    time: &TimePattern,
    text: &TextSignals,
) -> Vec<ContextualAdvice> {
    let sleepy = stats.ratio(MoodCategory::Sleepy);
    let tired = stats.ratio(MoodCategory::Tired);
    let angry = stats.ratio(MoodCategory::Angry);
    let happy = stats.ratio(MoodCategory::Happy);
    let normal = stats.ratio(MoodCategory::Normal);

    let morning = time.dominant(DayPeriod::Morning);
    let mut pool = Vec::new();

    if sleepy > 0.3 || tired > 0.4 || morning == Some(MoodCategory::Tired) {
        let advice = if morning == Some(MoodCategory::Tired) {
            "Mornings look tiring. Try going to bed 30 minutes earlier and getting some sunlight right after you wake up."
        } else {
            "Aim for 7-8 hours of sleep and keep bedtime and wake-up time roughly the same every day."
        };
        pool.push((AdviceTheme::Sleep, advice));
    }

    if angry > 0.25 {
        let advice = if text.has_work_stress() {
            "Work seems to be a major source of stress. Schedule short breaks during the day and set a clear time to stop working."
        } else {
            "Try five minutes of deep breathing or meditation each day to let stress settle."
        };
        pool.push((AdviceTheme::Stress, advice));
    }

    if tired > 0.3 {
        let advice = if time.dominant(DayPeriod::Afternoon) == Some(MoodCategory::Tired) {
            "A 10-minute walk after lunch can help you get through the afternoon slump."
        } else {
            "Light exercise three times a week builds stamina and reduces day-to-day fatigue."
        };
        pool.push((AdviceTheme::Fatigue, advice));
    }

    if happy > 0.4 {
        pool.push((
            AdviceTheme::PositiveHabit,
            "Things are going well. Keep doing what brings you joy and make it part of your routine.",
        ));
    } else if normal > 0.5 {
        let advice = if text.health.is_empty() {
            "Add one small enjoyable activity to your week, like a hobby or meeting a friend."
        } else {
            "Write down three things you are grateful for each evening to build on a steady mood."
        };
        pool.push((AdviceTheme::PositiveHabit, advice));
    }

    if time.dominant(DayPeriod::Evening) == Some(MoodCategory::Angry)
        || text.stress.len() > ENVIRONMENT_STRESS_KEYWORDS
    {
        pool.push((
            AdviceTheme::Environment,
            "Make your evening space calmer: dim the lights, put the phone away and listen to quiet music.",
        ));
    }

    // Stable sort keeps rule order among equal weights
    pool.sort_by(|a, b| b.0.weight().cmp(&a.0.weight()));
    pool.truncate(MAX_CONTEXTUAL_ITEMS);

    pool.into_iter()
        .map(|(theme, text)| ContextualAdvice {
            theme,
            text: text.to_string(),
        })
        .collect()
}

/// One paragraph describing the mood composition of a window
pub fn mood_summary(stats: &StatisticsSnapshot, time: &TimePattern) -> String {
    let happy = stats.ratio(MoodCategory::Happy);
    let normal = stats.ratio(MoodCategory::Normal);
    let tired = stats.ratio(MoodCategory::Tired);
    let angry = stats.ratio(MoodCategory::Angry);
    let sleepy = stats.ratio(MoodCategory::Sleepy);

    if happy > 0.6 {
        format!(
            "{}% of your entries were happy. You are in a very positive state of mind.",
            percent(happy)
        )
    } else if happy > 0.3 && normal > 0.4 {
        "Happy and calm moods are in good balance. Your emotional state looks stable.".to_string()
    } else if tired > 0.4 {
        let mut summary = format!(
            "Fatigue shows up in {}% of your entries. Rest and recovery deserve attention.",
            percent(tired)
        );
        if matches!(
            time.dominant(DayPeriod::Morning),
            Some(MoodCategory::Tired) | Some(MoodCategory::Sleepy)
        ) {
            summary.push_str(" The tiredness is strongest in the morning, so sleep quality is worth a look.");
        }
        summary
    } else if angry > 0.3 {
        format!(
            "Stress or irritation appears in {}% of your entries. Finding ways to release it will help.",
            percent(angry)
        )
    } else if sleepy > 0.4 {
        format!(
            "Sleepiness appears in {}% of your entries. Your sleep rhythm may need adjusting.",
            percent(sleepy)
        )
    } else {
        "You went through a variety of moods. That range is a natural part of everyday life.".to_string()
    }
}

pub fn continuity_message(total_entries: usize) -> String {
    if total_entries >= 7 {
        format!(
            "You recorded {} entries. Keeping this up makes your patterns clearer every week.",
            total_entries
        )
    } else if total_entries >= 3 {
        format!(
            "{} entries so far. A few more will make the analysis more accurate.",
            total_entries
        )
    } else {
        "Recording a little every day will give you more useful analysis.".to_string()
    }
}

fn percent(ratio: f64) -> u32 {
    (ratio * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{analyze_time_patterns, compute_statistics, extract_from_entries, DateWindow};
    use crate::mood::MoodEntry;
    use chrono::{Duration, NaiveDate};

    fn entries(specs: &[(MoodCategory, u32, Option<&str>)]) -> Vec<MoodEntry> {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        specs
            .iter()
            .enumerate()
            .map(|(i, (mood, hour, note))| {
                let ts = (start + Duration::days(i as i64))
                    .and_hms_opt(*hour, 0, 0)
                    .unwrap();
                MoodEntry::new(*mood, note.map(str::to_string), ts)
            })
            .collect()
    }

    fn advise(entries: &[MoodEntry]) -> Vec<ContextualAdvice> {
        let window = DateWindow::ending_on(NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(), 14);
        let stats = compute_statistics(entries, &window);
        contextual_advice(
            &stats,
            &analyze_time_patterns(entries),
            &extract_from_entries(entries),
        )
    }

    #[test]
    fn test_top_three_by_weight() {
        use MoodCategory::*;
        // sleepy 0.4, tired 0.4, angry 0.2 plus four stress keywords
        let list = entries(&[
            (Sleepy, 14, Some("work")),
            (Sleepy, 14, Some("pressure")),
            (Tired, 14, Some("meeting")),
            (Tired, 14, Some("overtime")),
            (Angry, 14, None),
        ]);
        let advice = advise(&list);
        let themes: Vec<AdviceTheme> = advice.iter().map(|a| a.theme).collect();
        assert_eq!(
            themes,
            vec![AdviceTheme::Sleep, AdviceTheme::Fatigue, AdviceTheme::Environment]
        );
    }

    #[test]
    fn test_no_padding_when_few_rules_fire() {
        use MoodCategory::*;
        let list = entries(&[(Happy, 14, None), (Happy, 14, None), (Normal, 14, None)]);
        let advice = advise(&list);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].theme, AdviceTheme::PositiveHabit);
        assert!(advice[0].text.contains("Keep doing"));
    }

    #[test]
    fn test_morning_fatigue_variant() {
        use MoodCategory::*;
        let list = entries(&[(Tired, 7, None), (Happy, 15, None), (Happy, 15, None), (Happy, 15, None)]);
        let advice = advise(&list);
        assert_eq!(advice[0].theme, AdviceTheme::Sleep);
        assert!(advice[0].text.contains("30 minutes earlier"));
    }

    #[test]
    fn test_work_stress_variant() {
        use MoodCategory::*;
        let list = entries(&[(Angry, 14, Some("deadline")), (Happy, 14, None), (Happy, 14, None)]);
        let advice = advise(&list);
        let stress = advice.iter().find(|a| a.theme == AdviceTheme::Stress).unwrap();
        assert!(stress.text.contains("Work"));
    }

    #[test]
    fn test_empty_window_gives_nothing() {
        assert!(advise(&[]).is_empty());
    }

    #[test]
    fn test_mood_summary_branches() {
        use MoodCategory::*;
        let list = entries(&[(Happy, 10, None), (Happy, 10, None), (Happy, 10, None), (Normal, 10, None)]);
        let window = DateWindow::ending_on(NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(), 14);
        let summary = mood_summary(&compute_statistics(&list, &window), &analyze_time_patterns(&list));
        assert!(summary.starts_with("75%"));

        let list = entries(&[(Tired, 8, None), (Tired, 8, None), (Normal, 20, None)]);
        let summary = mood_summary(&compute_statistics(&list, &window), &analyze_time_patterns(&list));
        assert!(summary.contains("67%"));
        assert!(summary.contains("morning"));
    }

    #[test]
    fn test_continuity_message() {
        assert!(continuity_message(9).contains("9 entries"));
        assert!(continuity_message(4).starts_with("4 entries"));
        assert!(continuity_message(1).starts_with("Recording"));
    }
}
