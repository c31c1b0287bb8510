use mood_journal_lib::analytics::StatisticsSnapshot;
use mood_journal_lib::mood::{MoodCategory, MoodEntry};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

const BAR_WIDTH: usize = 24;

pub fn mood_color(mood: MoodCategory) -> &'static str {
    match mood {
        MoodCategory::Happy => Color::YELLOW,
        MoodCategory::Normal => Color::GREEN,
        MoodCategory::Tired => Color::MAGENTA,
        MoodCategory::Angry => Color::RED,
        MoodCategory::Sleepy => Color::BLUE,
    }
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn heading(title: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", Color::BOLD, title, Color::RESET)
    } else {
        format!("{}\n{}", title, "=".repeat(title.chars().count()))
    }
}

/// "😊 Happy", colored by category
pub fn mood_label(mood: MoodCategory, use_color: bool) -> String {
    paint(
        &format!("{} {}", mood.emoji(), mood.display_name()),
        mood_color(mood),
        use_color,
    )
}

/// One-line rendering of an entry
pub fn entry_line(entry: &MoodEntry, use_color: bool) -> String {
    let mood = match entry.category() {
        Some(mood) => mood_label(mood, use_color),
        None => paint(&format!("? {}", entry.mood), Color::GRAY, use_color),
    };
    let id = entry.id.to_string();
    let short_id = paint(&id[..8], Color::GRAY, use_color);
    let time = entry.timestamp.format("%Y-%m-%d %H:%M");
    match &entry.note {
        Some(note) => format!("{}  {}  {:<12} {}", short_id, time, mood, note),
        None => format!("{}  {}  {}", short_id, time, mood),
    }
}

pub fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|i| format!("  \u{2022} {}", i)).collect()
}

pub fn numbered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(n, i)| format!("  {}. {}", n + 1, i))
        .collect()
}

/// Horizontal bar per category, scaled to the largest count
pub fn distribution_bars(stats: &StatisticsSnapshot, use_color: bool) -> Vec<String> {
    let max = stats.distribution.values().copied().max().unwrap_or(0);
    MoodCategory::ALL
        .into_iter()
        .map(|mood| {
            let count = stats.count(mood);
            let width = if max == 0 { 0 } else { count * BAR_WIDTH / max };
            let bar = paint(&"\u{2588}".repeat(width), mood_color(mood), use_color);
            format!(
                "  {} {:<8} {:>3} {:>5.1}% {}",
                mood.emoji(),
                mood.display_name(),
                count,
                stats.ratio(mood) * 100.0,
                bar
            )
        })
        .collect()
}

/// Summary lines shared by stats and report output
pub fn statistics_lines(stats: &StatisticsSnapshot, use_color: bool) -> Vec<String> {
    let trend = if stats.trend_is_reliable() {
        format!("{:+.2}", stats.trend)
    } else {
        format!("{:+.2} (needs more entries)", stats.trend)
    };
    let mut lines = vec![
        format!("  Entries:      {} over {} days", stats.total_entries, stats.recorded_days),
        format!("  Dominant:     {}", mood_label(stats.dominant_mood, use_color)),
        format!("  Average:      {:+.2}", stats.average_score),
        format!("  Consistency:  {:.0}%", stats.consistency * 100.0),
        format!("  Volatility:   {:.2}", stats.volatility),
        format!("  Trend:        {}", trend),
        String::new(),
    ];
    lines.extend(distribution_bars(stats, use_color));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_entry_line_plain() {
        let ts = NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap();
        let entry = MoodEntry::new(MoodCategory::Sleepy, Some("early train".to_string()), ts);
        let line = entry_line(&entry, false);
        assert!(line.contains("2026-05-01 07:45"));
        assert!(line.contains("Sleepy"));
        assert!(line.ends_with("early train"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_numbered() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(numbered(&items), vec!["  1. a", "  2. b"]);
    }
}
