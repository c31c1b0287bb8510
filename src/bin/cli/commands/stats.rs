use anyhow::{Context, Result};

use mood_journal_lib::analytics::{
    analyze_time_patterns, compute_statistics, extract_from_entries, AnalysisWindow, DateWindow,
    DayPeriod,
};
use mood_journal_lib::storage::EntryStore;

use crate::app::App;
use crate::render::terminal::{heading, mood_label, statistics_lines};
use crate::OutputFormat;

pub fn run(app: &App, days: u32, format: &OutputFormat, use_color: bool) -> Result<()> {
    if days == 0 {
        anyhow::bail!("--days must be at least 1");
    }

    let range = DateWindow::ending_on(app.today(), days);
    let fetched = app
        .journal
        .fetch_window(&range)
        .context("Failed to read entries")?;
    let window = AnalysisWindow::new(range, fetched);

    let stats = compute_statistics(&window.entries, &range);
    let time_pattern = analyze_time_patterns(&window.entries);
    let text_signals = extract_from_entries(&window.entries);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "window": range,
                "statistics": stats,
                "timePattern": time_pattern,
                "textSignals": text_signals,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}",
                heading(&format!("Last {} days ({} to {})", days, range.start, range.end), use_color)
            );
            if window.is_empty() {
                println!("No entries in this period.");
                return Ok(());
            }
            for line in statistics_lines(&stats, use_color) {
                println!("{}", line);
            }

            println!();
            for period in DayPeriod::ALL {
                let band = time_pattern.band(period);
                let dominant = band
                    .dominant_mood
                    .map(|m| mood_label(m, use_color))
                    .unwrap_or_else(|| "-".to_string());
                println!("  {:<10} {:>3} entries  {}", period.label(), band.entry_count, dominant);
            }

            let observations: Vec<String> = time_pattern
                .insights
                .iter()
                .map(|i| i.message().to_string())
                .chain(text_signals.insights.iter().map(|i| i.message()))
                .collect();
            if !observations.is_empty() {
                println!();
                for observation in observations {
                    println!("  \u{2022} {}", observation);
                }
            }
        }
    }

    Ok(())
}
