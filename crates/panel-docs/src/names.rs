//! Small name and date helpers used when building substitution contexts.

use chrono::NaiveDate;

/// First whitespace-separated token of a name.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}

/// Upper-case first letter of each name token ("Mary Jane Smith" → "MJS").
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Join names as prose: "A", "A and B", "A, B and C".
pub fn join_with_and<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|n| n.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// UK short date, `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a stored panel date (`YYYY-MM-DD`, optionally followed by a time).
/// Values that do not parse are passed through trimmed.
pub fn format_stored_date(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(format_date)
        .unwrap_or_else(|| trimmed.to_string())
}
