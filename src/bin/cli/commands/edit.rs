use anyhow::{Context, Result};

use mood_journal_lib::storage::UpdateEntryRequest;

use crate::app::App;
use crate::render::terminal::entry_line;
use crate::OutputFormat;

pub fn run_edit(
    app: &App,
    id: &str,
    mood: Option<String>,
    note: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if mood.is_none() && note.is_none() {
        anyhow::bail!("Nothing to change, pass --mood and/or --note");
    }

    let id = app.resolve_entry_id(id)?;
    let entry = app
        .journal
        .update_entry(id, UpdateEntryRequest { mood, note })
        .context("Failed to update entry")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => println!("Updated: {}", entry_line(&entry, use_color)),
    }

    Ok(())
}

pub fn run_delete(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let id = app.resolve_entry_id(id)?;
    app.journal
        .delete_entry(id)
        .context("Failed to delete entry")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": id.to_string() }));
        }
        OutputFormat::Plain => println!("Deleted entry {}", id),
    }

    Ok(())
}
