use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::app::App;
use crate::render::terminal::entry_line;
use crate::OutputFormat;

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

pub fn run(
    app: &App,
    from: Option<&str>,
    to: Option<&str>,
    limit: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let from = from.map(parse_date).transpose()?;
    let to = to.map(parse_date).transpose()?;

    let mut entries: Vec<_> = app
        .list_entries()?
        .into_iter()
        .filter(|e| from.map_or(true, |d| e.date() >= d))
        .filter(|e| to.map_or(true, |d| e.date() <= d))
        .collect();

    if let Some(limit) = limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No entries recorded.");
                return Ok(());
            }
            for entry in &entries {
                println!("{}", entry_line(entry, use_color));
            }
            println!("\n{} entries", entries.len());
        }
    }

    Ok(())
}
