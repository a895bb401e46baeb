use anyhow::{Context, Result};
use chrono::Duration;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::airport::{AirportAttributes, AirportTable};
use crate::scoring::{round_score, FACTORS};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with exactly two decimals ("2.95", "3.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format an optional attribute; blank renders as "-"
pub fn format_attribute(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the airport lookup table with a header row.
/// Columns: code, pax, traffic, runway, and the score a record at that airport gets.
pub fn format_airport_table(table: &AirportTable, use_colors: bool) -> String {
    if table.is_empty() {
        return "No airports configured.".to_string();
    }

    let header = format!(
        "{:<6}{:>8}{:>9}{:>8}{:>8}",
        "CODE", "PAX", "TRAFFIC", "RUNWAY", "SCORE"
    );
    let rule_width = get_terminal_width()
        .map(|w| w.min(header.len()))
        .unwrap_or(header.len());
    let rule = "-".repeat(rule_width);

    let mut lines = Vec::with_capacity(table.len() + 2);
    if use_colors {
        lines.push(header.bold().to_string());
        lines.push(rule.dimmed().to_string());
    } else {
        lines.push(header);
        lines.push(rule);
    }

    for (code, attrs) in table.iter() {
        let score = format_score(airport_score(attrs));
        let row_tail = format!(
            "{:>8}{:>9}{:>8}{:>8}",
            attrs.pax, attrs.traffic, attrs.runway, score
        );
        if use_colors {
            lines.push(format!("{:<6}{}", code.cyan(), row_tail));
        } else {
            lines.push(format!("{:<6}{}", code, row_tail));
        }
    }

    lines.join("\n")
}

/// Format the airport lookup table as pretty JSON keyed by code
pub fn format_airports_json(table: &AirportTable) -> Result<String> {
    let map: BTreeMap<&str, &AirportAttributes> = table.iter().collect();
    serde_json::to_string_pretty(&map).context("Failed to serialize airport table")
}

fn airport_score(attrs: &AirportAttributes) -> f64 {
    let values = [attrs.pax, attrs.traffic, attrs.runway];
    round_score(FACTORS.iter().zip(values).map(|(f, v)| f.apply(v)).sum())
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score_two_decimals() {
        assert_eq!(format_score(2.95), "2.95");
        assert_eq!(format_score(3.0), "3.00");
        assert_eq!(format_score(2.5), "2.50");
    }

    #[test]
    fn test_format_attribute() {
        assert_eq!(format_attribute(Some(7.0)), "7");
        assert_eq!(format_attribute(Some(1.2)), "1.2");
        assert_eq!(format_attribute(None), "-");
    }

    #[test]
    fn test_airport_table_rows() {
        let result = format_airport_table(&AirportTable::builtin(), false);
        let lines: Vec<&str> = result.lines().collect();
        // header + rule + 4 airports
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("CODE"));
        assert!(lines[2].starts_with("CGK"));
        assert!(lines[2].ends_with("2.95"));
        assert!(lines[3].starts_with("DPS"));
        assert!(lines[3].ends_with("2.50"));
    }

    #[test]
    fn test_airports_json() {
        let json = format_airports_json(&AirportTable::builtin()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["SUB"]["runway"], 1.2);
        assert_eq!(parsed["CGK"]["pax"], 7.0);
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(Duration::hours(3)), "3h");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(Duration::days(2)), "2d");
    }

    #[test]
    fn test_format_age_weeks() {
        assert_eq!(format_age(Duration::weeks(2)), "2w");
    }

    #[test]
    fn test_format_age_minutes() {
        assert_eq!(format_age(Duration::minutes(30)), "30m");
    }

    #[test]
    fn test_format_age_now() {
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }

    #[test]
    fn test_truncate_text_short() {
        assert_eq!(truncate_text("Short title", 20), "Short title");
    }

    #[test]
    fn test_truncate_text_long() {
        assert_eq!(truncate_text("This is a very long title", 15), "This is a ve...");
    }

    #[test]
    fn test_truncate_text_very_narrow() {
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }
}
