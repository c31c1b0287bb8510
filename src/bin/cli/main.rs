mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mood_journal_lib::reports::ReportPeriod;

#[derive(Parser)]
#[command(name = "mood-cli", about = "Mood journal CLI", version)]
struct Cli {
    /// Data directory (default: platform local data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Record a mood (happy, normal, tired, angry, sleepy)
    Record {
        mood: String,
        /// Short note (use "-" to read from stdin)
        #[arg(long)]
        note: Option<String>,
        /// Local time of the entry, "YYYY-MM-DD HH:MM" (default: now)
        #[arg(long)]
        at: Option<String>,
    },

    /// List recorded entries
    List {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Show only the most recent N entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Change the mood or note of an entry
    Edit {
        /// Entry ID
        id: String,
        #[arg(long)]
        mood: Option<String>,
        /// New note; an empty string clears it
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },

    /// Show statistics for the last N days
    Stats {
        #[arg(long, default_value = "7")]
        days: u32,
    },

    /// Generate this week's insight
    Weekly {
        /// Fix the template choice
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate personal coaching for the last two weeks
    Coaching,

    /// Generate a detailed report (1m, 3m, 6m or 1y)
    Report {
        period: ReportPeriod,
    },

    /// Export entries or the mood distribution as CSV
    Export {
        /// Limit to a period (1m, 3m, 6m or 1y); all entries when omitted
        #[arg(long)]
        period: Option<ReportPeriod>,
        /// Export the mood distribution instead of entries
        #[arg(long)]
        statistics: bool,
        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

/// Read the note from stdin when it is "-"
fn resolve_note(note: Option<String>) -> Option<String> {
    match note.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            Some(buf.trim_end().to_string())
        }
        _ => note,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Record { mood, note, at } => {
            let note = resolve_note(note);
            commands::record::run(&app, &mood, note, at.as_deref(), &cli.format, use_color)?;
        }
        Command::List { from, to, limit } => {
            commands::list::run(&app, from.as_deref(), to.as_deref(), limit, &cli.format, use_color)?;
        }
        Command::Edit { id, mood, note } => {
            let note = resolve_note(note);
            commands::edit::run_edit(&app, &id, mood, note, &cli.format, use_color)?;
        }
        Command::Delete { id } => {
            commands::edit::run_delete(&app, &id, &cli.format)?;
        }
        Command::Stats { days } => {
            commands::stats::run(&app, days, &cli.format, use_color)?;
        }
        Command::Weekly { seed } => {
            commands::reports::run_weekly(&app, seed, &cli.format, use_color)?;
        }
        Command::Coaching => {
            commands::reports::run_coaching(&app, &cli.format, use_color)?;
        }
        Command::Report { period } => {
            commands::reports::run_detailed(&app, period, &cli.format, use_color)?;
        }
        Command::Export { period, statistics, output } => {
            commands::export::run(&app, period, statistics, &output, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
