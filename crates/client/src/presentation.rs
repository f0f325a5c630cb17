//! Report rendering for the terminal.
//!
//! The engine hands over a [`SimulationReport`]; everything about labels,
//! number grouping, and styling lives here.

use anyhow::{Context, Result};
use archery_core::{ArcherEntry, SimulationReport};
use console::style;

/// Render the report as styled text.
pub fn render_text(report: &SimulationReport, per_match: bool) -> String {
    let mut lines = vec![
        style("=== Archery Simulation ===").bold().green().to_string(),
        String::new(),
    ];

    lines.push(format!(
        "{} {}",
        style("Games played:").bold().cyan(),
        format_points(report.games as u64)
    ));
    lines.push(format!(
        "{} {} with {} points",
        style("Winning team:").bold().cyan(),
        report.winning_team.team,
        format_points(report.winning_team.points)
    ));
    lines.push(format!(
        "{} Male {} / Female {}",
        style("Gender wins:").bold().cyan(),
        format_points(u64::from(report.gender_wins.male)),
        format_points(u64::from(report.gender_wins.female))
    ));
    lines.push(format!(
        "{} {}",
        style("Leading gender:").bold().cyan(),
        report.gender_win_rate
    ));

    if per_match {
        push_section(
            &mut lines,
            "Luckiest archer per match:",
            report
                .lucky_archers
                .iter()
                .map(|entry| archer_line(entry, "bonus shots")),
        );
        push_section(
            &mut lines,
            "Most experienced archer per match:",
            report
                .experienced_archers
                .iter()
                .map(|entry| archer_line(entry, "experience")),
        );
        push_section(
            &mut lines,
            "Winning gender per match:",
            report.gender_by_match.iter().map(|entry| {
                format!(
                    "  Match {}: {}",
                    format_points(entry.match_index as u64),
                    entry.gender
                )
            }),
        );
    }

    lines.join("\n")
}

/// Render the full report, archer score series included, as JSON.
pub fn render_json(report: &SimulationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Format a number with thousands separators
pub fn format_points(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn archer_line(entry: &ArcherEntry, label: &str) -> String {
    format!(
        "  Match {}: archer {} ({} {})",
        format_points(entry.match_index as u64),
        entry.archer,
        label,
        entry.value
    )
}

fn push_section<I>(lines: &mut Vec<String>, title: &str, items: I)
where
    I: IntoIterator<Item = String>,
{
    lines.push(String::new());
    lines.push(style(title).bold().yellow().to_string());
    let start = lines.len();
    lines.extend(items);
    if lines.len() == start {
        lines.push(style("  (no matches)").dim().to_string());
    }
}
