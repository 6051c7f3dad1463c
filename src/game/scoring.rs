/// Point award for a newly written story: 10 base points plus 5 per
/// complete block of 50 words, with the word bonus capped at 50.
pub fn points_for_story(word_count: i64) -> i64 {
    let base_points = 10;
    let word_bonus = (word_count / 50) * 5;
    let max_word_bonus = 50;
    base_points + word_bonus.min(max_word_bonus)
}

/// Level derived from cumulative points: floor(sqrt(points / 100)) + 1.
/// Level 1 covers 0-99 points, level 2 covers 100-399, level 3 covers 400-899.
pub fn calculate_level(points: i64) -> i64 {
    ((points as f64 / 100.0).sqrt().floor() as i64) + 1
}

/// Point total required to reach the next level from `current_level`.
/// Display-only; nothing is gated on it.
pub fn points_for_next_level(current_level: i64) -> i64 {
    current_level * current_level * 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_points_follow_word_bonus_table() {
        assert_eq!(points_for_story(0), 10);
        assert_eq!(points_for_story(49), 10);
        assert_eq!(points_for_story(50), 15);
        assert_eq!(points_for_story(100), 20);
        assert_eq!(points_for_story(499), 55);
        assert_eq!(points_for_story(500), 60);
        assert_eq!(points_for_story(10_000), 60);
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(99), 1);
        assert_eq!(calculate_level(100), 2);
        assert_eq!(calculate_level(399), 2);
        assert_eq!(calculate_level(400), 3);
        assert_eq!(calculate_level(899), 3);
        assert_eq!(calculate_level(900), 4);
    }

    #[test]
    fn level_is_monotonic_in_points() {
        let mut last = 0;
        for points in 0..5_000 {
            let level = calculate_level(points);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn next_level_threshold_inverts_level() {
        for level in 1..20 {
            assert_eq!(points_for_next_level(level), level * level * 100);
            // Reaching the threshold lands exactly on the next level.
            assert_eq!(calculate_level(points_for_next_level(level)), level + 1);
        }
    }
}
