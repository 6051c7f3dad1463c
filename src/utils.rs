use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for StoryTeller
/// If profile is Dev, uses "storyteller-dev" instead of "storyteller"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "storyteller-dev",
        Profile::Prod => "storyteller",
    };
    ProjectDirs::from("com", "storyteller", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for StoryTeller
/// If profile is Dev, uses "storyteller-dev" instead of "storyteller"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "storyteller-dev",
        Profile::Prod => "storyteller",
    };
    ProjectDirs::from("com", "storyteller", app_name)
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Get the current local date as an ISO 8601 string (YYYY-MM-DD)
pub fn get_current_date_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Get the current local date and time (YYYY-MM-DD HH:MM:SS)
pub fn get_current_datetime_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Today's local calendar date
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Placeholder shown when a stored timestamp cannot be parsed for display
pub const UNPARSEABLE_DATE: &str = "Unknown date";

/// Format a stored timestamp (YYYY-MM-DD HH:MM:SS or YYYY-MM-DD) for display
/// as e.g. "Mar 5, 2024". Falls back to a placeholder rather than failing.
pub fn format_date_for_display(date_str: &str) -> String {
    let date_part = match date_str.get(..10) {
        Some(part) => part,
        None => return UNPARSEABLE_DATE.to_string(),
    };
    match parse_date(date_part) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => UNPARSEABLE_DATE.to_string(),
    }
}

/// Parse tags from a comma-separated string
/// Returns a vector of trimmed, non-empty tag strings
pub fn parse_tags(tags: Option<&String>) -> Vec<String> {
    match tags {
        Some(tags_str) if !tags_str.trim().is_empty() => tags_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format_handles_good_and_bad_dates() {
        assert_eq!(format_date_for_display("2024-03-05 23:10:00"), "Mar 5, 2024");
        assert_eq!(format_date_for_display("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date_for_display("not a date"), UNPARSEABLE_DATE);
        assert_eq!(format_date_for_display(""), UNPARSEABLE_DATE);
    }

    #[test]
    fn tags_parse_trims_and_drops_empties() {
        let raw = Some(" family , summer ,, beach ".to_string());
        assert_eq!(parse_tags(raw.as_ref()), vec!["family", "summer", "beach"]);
        assert!(parse_tags(None).is_empty());
    }
}
