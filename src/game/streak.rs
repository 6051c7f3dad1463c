use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

use crate::models::Story;

/// Current consecutive-day writing streak as of `today`.
///
/// The streak anchors on today if a story exists today, otherwise on
/// yesterday if one exists then; with neither, the streak is 0. From the
/// anchor it walks backward one calendar day at a time, counting days that
/// have at least one story and stopping at the first gap. Several stories
/// on the same calendar day count once. Comparison is by local calendar
/// day, not elapsed 24-hour windows.
pub fn calculate_streak(stories: &[Story], today: NaiveDate) -> i64 {
    if stories.is_empty() {
        return 0;
    }

    // Stories with unparseable dates are skipped; display formatting owns
    // the degraded-date path.
    let days: BTreeSet<NaiveDate> = stories.iter().filter_map(|s| s.day()).collect();

    let yesterday = match today.checked_sub_days(Days::new(1)) {
        Some(d) => d,
        None => return 0,
    };

    let mut cursor = if days.contains(&today) {
        today
    } else if days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = match cursor.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }

    streak
}
