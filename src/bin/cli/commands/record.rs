use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use mood_journal_lib::storage::CreateEntryRequest;

use crate::app::App;
use crate::render::terminal::entry_line;
use crate::OutputFormat;

/// Parse "YYYY-MM-DD HH:MM" (seconds optional)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .with_context(|| format!("Invalid time '{}', expected YYYY-MM-DD HH:MM", value))
}

pub fn run(
    app: &App,
    mood: &str,
    note: Option<String>,
    at: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let timestamp = at.map(parse_timestamp).transpose()?;

    let entry = app
        .journal
        .create_entry(CreateEntryRequest {
            mood: mood.to_string(),
            note,
            timestamp,
        })
        .context("Failed to record entry")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        OutputFormat::Plain => {
            println!("Recorded: {}", entry_line(&entry, use_color));
        }
    }

    Ok(())
}
