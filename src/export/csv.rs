//! CSV export of journal entries and mood distribution

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use crate::analytics::StatisticsSnapshot;
use crate::mood::{MoodCategory, MoodEntry};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export produced invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

type Result<T> = std::result::Result<T, ExportError>;

pub const ENTRY_HEADERS: [&str; 5] = ["date", "time", "emoji", "mood", "note"];
pub const DISTRIBUTION_HEADERS: [&str; 4] = ["emoji", "mood", "count", "percentage"];

/// Notes are written on one line
fn clean_note(note: &str) -> String {
    note.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out)
}

/// Write one row per entry, oldest first.
///
/// Entries with an unrecognized mood keep their row with empty emoji and
/// mood columns.
pub fn write_entries<W: Write>(out: W, entries: &[MoodEntry]) -> Result<()> {
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let mut wtr = writer(out);
    wtr.write_record(ENTRY_HEADERS)?;
    for entry in sorted {
        let category = entry.category();
        let date = entry.timestamp.format("%Y-%m-%d").to_string();
        let time = entry.timestamp.format("%H:%M:%S").to_string();
        let note = entry.note.as_deref().map(clean_note).unwrap_or_default();
        wtr.write_record([
            date.as_str(),
            time.as_str(),
            category.map(MoodCategory::emoji).unwrap_or(""),
            category.map(MoodCategory::display_name).unwrap_or(""),
            note.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the count and share of each category, two-decimal percentages
pub fn write_distribution<W: Write>(out: W, stats: &StatisticsSnapshot) -> Result<()> {
    let total: usize = stats.distribution.values().sum();

    let mut wtr = writer(out);
    wtr.write_record(DISTRIBUTION_HEADERS)?;
    for mood in MoodCategory::ALL {
        let count = stats.count(mood);
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        wtr.write_record([
            mood.emoji().to_string(),
            mood.display_name().to_string(),
            count.to_string(),
            format!("{:.2}", percentage),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn entries_to_string(entries: &[MoodEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_entries(&mut buf, entries)?;
    Ok(String::from_utf8(buf)?)
}

pub fn distribution_to_string(stats: &StatisticsSnapshot) -> Result<String> {
    let mut buf = Vec::new();
    write_distribution(&mut buf, stats)?;
    Ok(String::from_utf8(buf)?)
}

/// File name for an entry export; `None` means all entries
pub fn entries_file_name(range: Option<(NaiveDate, NaiveDate)>) -> String {
    match range {
        Some((start, end)) => format!(
            "mood_journal_{}_to_{}.csv",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
        None => "mood_journal_all_data.csv".to_string(),
    }
}

pub fn distribution_file_name(label: &str) -> String {
    format!("mood_statistics_{}.csv", label.replace(' ', "_"))
}

/// Write entries to `dir/file_name`, creating `dir` when needed
pub fn export_entries_to_file(dir: &Path, file_name: &str, entries: &[MoodEntry]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    write_entries(fs::File::create(&path)?, entries)?;
    log::info!("Exported {} entries to {}", entries.len(), path.display());
    Ok(path)
}

pub fn export_distribution_to_file(
    dir: &Path,
    file_name: &str,
    stats: &StatisticsSnapshot,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    write_distribution(fs::File::create(&path)?, stats)?;
    log::info!("Exported mood distribution to {}", path.display());
    Ok(path)
}
