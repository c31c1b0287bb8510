//! Mood pattern classification and the canned coaching text per pattern

use serde::{Deserialize, Serialize};

use crate::analytics::StatisticsSnapshot;
use crate::mood::MoodCategory;

const TREND_THRESHOLD: f64 = 0.5;
const VOLATILITY_THRESHOLD: f64 = 0.7;
const STABLE_CONSISTENCY: f64 = 0.8;
const POSITIVE_AVERAGE: f64 = 0.5;
const CHALLENGING_AVERAGE: f64 = -0.3;
const LOW_CONSISTENCY: f64 = 0.5;

/// Overall trajectory of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoodPattern {
    Improving,
    Declining,
    Unstable,
    Stable,
    Positive,
    Challenging,
    Neutral,
}

impl MoodPattern {
    pub const ALL: [MoodPattern; 7] = [
        MoodPattern::Improving,
        MoodPattern::Declining,
        MoodPattern::Unstable,
        MoodPattern::Stable,
        MoodPattern::Positive,
        MoodPattern::Challenging,
        MoodPattern::Neutral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MoodPattern::Improving => "Improving",
            MoodPattern::Declining => "Needs attention",
            MoodPattern::Unstable => "Fluctuating",
            MoodPattern::Stable => "Stable",
            MoodPattern::Positive => "Positive",
            MoodPattern::Challenging => "Challenging",
            MoodPattern::Neutral => "Even",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodPattern::Improving => "📈",
            MoodPattern::Declining => "📉",
            MoodPattern::Unstable => "🌊",
            MoodPattern::Stable => "⚖️",
            MoodPattern::Positive => "✨",
            MoodPattern::Challenging => "💪",
            MoodPattern::Neutral => "🌤️",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MoodPattern::Improving => "#4CAF50",
            MoodPattern::Declining => "#FF9800",
            MoodPattern::Unstable => "#9C27B0",
            MoodPattern::Stable => "#2196F3",
            MoodPattern::Positive => "#8BC34A",
            MoodPattern::Challenging => "#F44336",
            MoodPattern::Neutral => "#607D8B",
        }
    }

    /// Fixed advice paragraph for the pattern
    pub fn advice(self) -> &'static str {
        match self {
            MoodPattern::Improving => {
                "Your mood is clearly trending upwards! Keep doing what you are doing. \
                 If you recently picked up a new habit or changed your surroundings, hold on to it."
            }
            MoodPattern::Declining => {
                "Things seem to have been hard lately. Start with enough sleep and regular meals, \
                 and give yourself credit for small wins. Don't carry it alone; talking to someone \
                 you trust helps."
            }
            MoodPattern::Unstable => {
                "Your mood swings quite a bit. A steady daily rhythm can soften the ups and downs. \
                 Try keeping your bedtime and wake-up time the same every day."
            }
            MoodPattern::Stable => {
                "Your mood has been very steady. Protect the routines that keep you here, and \
                 add a new challenge now and then for extra fulfilment."
            }
            MoodPattern::Positive => {
                "You have been in a positive mood overall! Use this energy to try something new \
                 or to do something kind for others, and the good cycle will keep going."
            }
            MoodPattern::Challenging => {
                "It has been a tough stretch, and recording every day shows real effort. Value the \
                 small steps and go at your own pace. Talking to a professional is always an option."
            }
            MoodPattern::Neutral => {
                "You are in a balanced, calm state, which is worth a lot. Adding small goals or \
                 things to look forward to can make your days feel fuller."
            }
        }
    }

    /// The two pattern-specific action items every coaching starts with
    pub fn base_action_items(self) -> [&'static str; 2] {
        match self {
            MoodPattern::Improving => [
                "Write down the good habits you have now and keep them up",
                "Add one small new challenge",
            ],
            MoodPattern::Declining => [
                "Get 7-8 hours of sleep",
                "Make time to talk with someone you trust",
            ],
            MoodPattern::Unstable => [
                "Wake up at the same time every day",
                "Set aside time to relax before bed",
            ],
            MoodPattern::Stable => [
                "Keep your current routine",
                "Try one new experience each month",
            ],
            MoodPattern::Positive => [
                "Reflect on what brought about this good state",
                "Express your gratitude to the people around you",
            ],
            MoodPattern::Challenging => [
                "Find one small pleasure each day",
                "Get the basics in order: meals, sleep and exercise",
            ],
            MoodPattern::Neutral => [
                "Explore a new hobby or interest",
                "Find three things to be grateful for every day",
            ],
        }
    }

    /// Three follow-up steps for the pattern
    pub fn next_steps(self) -> [&'static str; 3] {
        match self {
            MoodPattern::Improving => [
                "Run another analysis in two weeks to confirm the progress",
                "Think about how to reinforce your good habits",
                "Share positive experiences with the people around you",
            ],
            MoodPattern::Declining => [
                "Check how your mood changes in a week",
                "Consider talking to a professional if needed",
                "Lean on your support network of family and friends",
            ],
            MoodPattern::Unstable => [
                "Keep a steady routine for three weeks",
                "Watch your mood swings more closely",
                "Identify stress triggers and plan for them",
            ],
            MoodPattern::Stable => [
                "Maintain this good state over the long term",
                "Look for new opportunities to grow",
                "Make room to support others",
            ],
            MoodPattern::Positive => [
                "Analyze what drives this good state in more detail",
                "Spread the positive effect to those around you",
                "Set a further growth goal",
            ],
            MoodPattern::Challenging => [
                "Find one small improvement every week",
                "Review and use the support resources available to you",
                "Sketch a long-term recovery plan",
            ],
            MoodPattern::Neutral => [
                "Find activities that feel more fulfilling",
                "Seek out new people and experiences",
                "Clarify your goals for the future",
            ],
        }
    }
}

/// Ordered decision table; the first matching rule wins.
pub fn classify(trend: f64, volatility: f64, consistency: f64, average_score: f64) -> MoodPattern {
    if trend > TREND_THRESHOLD {
        MoodPattern::Improving
    } else if trend < -TREND_THRESHOLD {
        MoodPattern::Declining
    } else if volatility > VOLATILITY_THRESHOLD {
        MoodPattern::Unstable
    } else if consistency > STABLE_CONSISTENCY {
        MoodPattern::Stable
    } else if average_score > POSITIVE_AVERAGE {
        MoodPattern::Positive
    } else if average_score < CHALLENGING_AVERAGE {
        MoodPattern::Challenging
    } else {
        MoodPattern::Neutral
    }
}

pub fn classify_snapshot(stats: &StatisticsSnapshot) -> MoodPattern {
    classify(
        stats.trend,
        stats.volatility,
        stats.consistency,
        stats.average_score,
    )
}

/// Base items followed by up to four items keyed on the top moods and
/// on low consistency
pub fn action_items(pattern: MoodPattern, stats: &StatisticsSnapshot) -> Vec<String> {
    let mut items: Vec<String> = pattern
        .base_action_items()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let top = stats.top_moods();
    if top.contains(&MoodCategory::Tired) {
        items.push("Take enough rest to recover from fatigue".to_string());
    }
    if top.contains(&MoodCategory::Sleepy) {
        items.push("Improve sleep quality, for example by avoiding your phone before bed".to_string());
    }
    if top.contains(&MoodCategory::Angry) {
        items.push("Find a way to release stress, such as a walk, music or reading".to_string());
    }
    if stats.consistency < LOW_CONSISTENCY {
        items.push("Find a time of day when recording is easy to keep up".to_string());
    }

    items
}

/// Pattern, paragraph, action items and next steps for a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingAdvice {
    pub pattern: MoodPattern,
    pub advice: String,
    pub action_items: Vec<String>,
    pub next_steps: Vec<String>,
}

pub fn select_advice(stats: &StatisticsSnapshot) -> CoachingAdvice {
    let pattern = classify_snapshot(stats);
    log::debug!("Classified window as {:?}", pattern);

    CoachingAdvice {
        pattern,
        advice: pattern.advice().to_string(),
        action_items: action_items(pattern, stats),
        next_steps: pattern.next_steps().iter().map(|s| s.to_string()).collect(),
    }
}
