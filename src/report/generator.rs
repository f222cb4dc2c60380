use crate::domain::metrics::{max_value, scaled, today_message, DayMetric, SAMPLE_WEEK, STREAK_DAYS, TODAY};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Width of the longest bar in the text chart
const BAR_WIDTH: u64 = 24;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn bar(value: u64, max: u64) -> String {
    "█".repeat(scaled(value, max, BAR_WIDTH) as usize)
}

/// Share of attempts that ended in focus
fn focus_rate(day: &DayMetric) -> f64 {
    if day.attempts == 0 {
        return 0.0;
    }
    day.focus as f64 / day.attempts as f64 * 100.0
}

/// Build the metrics report as markdown with text bars
pub fn generate_report(week: &[DayMetric], today: &DayMetric, streak_days: u32) -> String {
    let max = max_value(week);
    let mut report = String::new();

    report.push_str("# Focus Metrics\n\n");

    // Weekly chart
    report.push_str("## This Week\n\n");
    report.push_str("```\n");
    for day in week {
        report.push_str(&format!(
            "{:<4} attempts {:<width$} {:>3}\n",
            day.label,
            bar(day.attempts, max),
            day.attempts,
            width = BAR_WIDTH as usize
        ));
        report.push_str(&format!(
            "{:<4} focus    {:<width$} {:>3}\n",
            "",
            bar(day.focus, max),
            day.focus,
            width = BAR_WIDTH as usize
        ));
    }
    report.push_str("```\n\n");

    // Today card
    report.push_str(&format!("## Today ({})\n\n", today.label));
    report.push_str(&format!("- **Attempts:** {}\n", today.attempts));
    report.push_str(&format!(
        "- **Focus:** {} ({})\n\n",
        today.focus,
        format_percent(focus_rate(today))
    ));
    report.push_str(&today_message(today));
    report.push_str("\n\n");

    report.push_str("## Streak\n\n");
    report.push_str(&format!("- {} days in a row\n", streak_days));

    report
}

/// Render the sample week and write it to `output`, or return it for stdout
pub fn write_report(output: Option<&Path>) -> Result<String> {
    let report = generate_report(&SAMPLE_WEEK, &TODAY, STREAK_DAYS);
    if let Some(path) = output {
        fs::write(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }
    Ok(report)
}
