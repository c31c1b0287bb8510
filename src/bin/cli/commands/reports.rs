use anyhow::Result;
use serde::Serialize;

use mood_journal_lib::analytics::weekday::weekday_name;
use mood_journal_lib::config::AppConfig;
use mood_journal_lib::reports::{
    DetailedReport, PersonalCoaching, ReportOutcome, ReportPeriod, WeeklyInsight,
};

use crate::app::App;
use crate::render::terminal::{bullets, heading, mood_label, numbered, paint, statistics_lines, Color};
use crate::OutputFormat;

/// Print the outcome, rendering ready reports with `render`
fn print_outcome<T: Serialize>(
    app: &App,
    outcome: &ReportOutcome<T>,
    format: &OutputFormat,
    render: impl FnOnce(&T) -> Vec<String>,
) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        ReportOutcome::Ready(report) => {
            for line in render(report) {
                println!("{}", line);
            }
        }
        ReportOutcome::InsufficientData { required, found } => {
            println!(
                "Not enough entries yet: {} recorded, {} needed. Keep recording and try again.",
                found, required
            );
        }
        ReportOutcome::Locked(feature) => {
            println!(
                "{} is locked. Set `pro = true` under [features] in {} to unlock it.",
                feature.display_name(),
                AppConfig::path_in(&app.data_dir).display()
            );
        }
    }
    Ok(())
}

fn section(lines: &mut Vec<String>, title: &str, body: Vec<String>, use_color: bool) {
    if body.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(paint(title, Color::CYAN, use_color));
    lines.extend(body);
}

pub fn run_weekly(app: &App, seed: Option<u64>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let outcome = app.generator(seed).generate_weekly_insight(app.today());
    print_outcome(app, &outcome, format, |insight| render_weekly(insight, use_color))
}

pub fn run_coaching(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let outcome = app.generator(None).generate_personal_coaching(app.today());
    print_outcome(app, &outcome, format, |coaching| render_coaching(coaching, use_color))
}

pub fn run_detailed(
    app: &App,
    period: ReportPeriod,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let outcome = app.generator(None).generate_detailed_report(period, app.today());
    print_outcome(app, &outcome, format, |report| render_detailed(report, use_color))
}

fn render_weekly(insight: &WeeklyInsight, use_color: bool) -> Vec<String> {
    let mut lines = vec![
        heading(
            &format!("Weekly insight {} to {}", insight.window.start, insight.window.end),
            use_color,
        ),
        insight.summary.clone(),
    ];
    section(&mut lines, "Highlights", bullets(&insight.highlights), use_color);
    section(&mut lines, "Your week", statistics_lines(&insight.statistics, use_color), use_color);
    lines.push(String::new());
    lines.push(insight.encouragement.clone());
    lines.push(insight.next_week_focus.clone());
    lines
}

fn render_coaching(coaching: &PersonalCoaching, use_color: bool) -> Vec<String> {
    let pattern = coaching.pattern;
    let mut lines = vec![
        heading(
            &format!("Personal coaching {} to {}", coaching.window.start, coaching.window.end),
            use_color,
        ),
        format!("{} {}", pattern.emoji(), pattern.label()),
        coaching.mood_summary.clone(),
        String::new(),
        coaching.advice.clone(),
    ];
    section(&mut lines, "Action items", bullets(&coaching.action_items), use_color);

    let contextual: Vec<String> = coaching
        .contextual_advice
        .iter()
        .map(|a| a.text.clone())
        .collect();
    section(&mut lines, "Tailored advice", numbered(&contextual), use_color);
    section(&mut lines, "Observations", bullets(&coaching.observations), use_color);
    section(&mut lines, "Next steps", numbered(&coaching.next_steps), use_color);
    lines.push(String::new());
    lines.push(coaching.continuity_message.clone());
    lines
}

fn render_detailed(report: &DetailedReport, use_color: bool) -> Vec<String> {
    let overview = &report.overview;
    let mut lines = vec![heading(
        &format!(
            "Detailed report, {} ({} to {})",
            report.period.display_name(),
            report.window.start,
            report.window.end
        ),
        use_color,
    )];
    lines.push(format!(
        "{} {}  {}",
        overview.pattern.emoji(),
        overview.pattern.label(),
        report.comparison.message
    ));
    section(&mut lines, "Overview", statistics_lines(&report.statistics, use_color), use_color);

    let trends: Vec<String> = report
        .mood_trends
        .iter()
        .filter(|t| t.count > 0)
        .map(|t| {
            let peaks: Vec<&str> = t.peak_weekdays.iter().map(|d| weekday_name(*d)).collect();
            format!(
                "  {:<20} {:>5.1}%  {} {:<10} peak: {}",
                mood_label(t.mood, use_color),
                t.percentage,
                t.direction.emoji(),
                t.direction.label(),
                peaks.join(", ")
            )
        })
        .collect();
    section(&mut lines, "Mood trends", trends, use_color);

    let insights: Vec<String> = report
        .insights
        .iter()
        .map(|i| format!("  [{}] {}: {}", i.impact.label(), i.title, i.description))
        .collect();
    section(&mut lines, "Patterns", insights, use_color);

    let monthly: Vec<String> = report
        .chart_data
        .monthly_averages
        .iter()
        .map(|m| format!("  {}-{:02}  {:+.2}", m.year, m.month, m.average_score))
        .collect();
    section(&mut lines, "Monthly average", monthly, use_color);

    section(&mut lines, "Recommendations", bullets(&report.recommendations), use_color);
    let contextual: Vec<String> = report
        .contextual_advice
        .iter()
        .map(|a| a.text.clone())
        .collect();
    section(&mut lines, "Tailored advice", numbered(&contextual), use_color);
    lines
}
