pub mod achievements;
pub mod scoring;
pub mod streak;

pub use achievements::{Achievement, check_achievements};
pub use scoring::{calculate_level, points_for_next_level, points_for_story};
pub use streak::calculate_streak;
