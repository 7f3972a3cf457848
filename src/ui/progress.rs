//! Relative times and column layout.

use chrono::{DateTime, Utc};

/// Format a timestamp relative to now (e.g. "3 hours ago").
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    format_elapsed(timestamp, Utc::now())
}

/// Format the time between `timestamp` and `now`.
pub fn format_elapsed(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();

    // Clock skew puts commits in the future now and then.
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    plural(hours / 24, "day")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Lay out words on lines no wider than `width`, each starting with `indent`,
/// words separated by two spaces.
pub fn wrap_words<S: AsRef<str>>(words: &[S], width: usize, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in words.iter().map(AsRef::as_ref) {
        if line.is_empty() {
            line = format!("{}{}", indent, word);
        } else if line.chars().count() + 2 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
            line = format!("{}{}", indent, word);
        } else {
            line.push_str("  ");
            line.push_str(word);
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
