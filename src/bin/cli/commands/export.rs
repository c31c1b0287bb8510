use std::path::Path;

use anyhow::{Context, Result};

use mood_journal_lib::analytics::{compute_statistics, AnalysisWindow, DateWindow};
use mood_journal_lib::export::{
    distribution_file_name, entries_file_name, export_distribution_to_file, export_entries_to_file,
};
use mood_journal_lib::reports::ReportPeriod;
use mood_journal_lib::storage::EntryStore;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    period: Option<ReportPeriod>,
    statistics: bool,
    output: &Path,
    format: &OutputFormat,
) -> Result<()> {
    let (range, entries) = match period {
        Some(period) => {
            let range = period.window_ending_on(app.today());
            let entries = app
                .journal
                .fetch_window(&range)
                .context("Failed to read entries")?;
            (Some(range), entries)
        }
        None => (None, app.list_entries()?),
    };

    let path = if statistics {
        let range = match range {
            Some(range) => range,
            None => match (entries.first(), entries.last()) {
                (Some(first), Some(last)) => DateWindow::new(first.date(), last.date()),
                _ => DateWindow::ending_on(app.today(), 1),
            },
        };
        let window = AnalysisWindow::new(range, entries);
        let stats = compute_statistics(&window.entries, &range);
        let label = period.map_or("all", ReportPeriod::display_name);
        export_distribution_to_file(output, &distribution_file_name(label), &stats)
            .context("Failed to export statistics")?
    } else {
        let file_name = entries_file_name(range.map(|r| (r.start, r.end)));
        export_entries_to_file(output, &file_name, &entries).context("Failed to export entries")?
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "path": path.to_string_lossy() }));
        }
        OutputFormat::Plain => println!("Exported to {}", path.display()),
    }

    Ok(())
}
