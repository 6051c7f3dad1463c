//! Achievement catalog and unlock evaluation.
//!
//! Achievement ids are stable kebab-case strings; they double as badge ids
//! in the persisted profile.

use std::collections::HashSet;

use crate::models::{Story, UserProfile};

pub const FIRST_STORY: &str = "first-story";
pub const WEEK_WARRIOR: &str = "week-warrior";
pub const MONTH_MASTER: &str = "month-master";
pub const WORDSMITH: &str = "wordsmith";
pub const NOVELIST: &str = "novelist";
pub const MEMORY_KEEPER: &str = "memory-keeper";
pub const STORYTELLER: &str = "storyteller";
pub const DIVERSE_TALES: &str = "diverse-tales";

/// A fixed catalog entry. Definitions are not persisted; only the badge
/// minted on unlock is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: &'static str,
    pub icon: &'static str,
    pub points: i64,
}

/// The canonical achievement catalog.
pub const CATALOG: &[Achievement] = &[
    Achievement {
        id: FIRST_STORY,
        name: "First Chapter",
        description: "Write your very first story",
        condition: "stories >= 1",
        icon: "📝",
        points: 50,
    },
    Achievement {
        id: WEEK_WARRIOR,
        name: "Week Warrior",
        description: "Maintain a 7-day writing streak",
        condition: "streak >= 7",
        icon: "🔥",
        points: 100,
    },
    Achievement {
        id: MONTH_MASTER,
        name: "Month Master",
        description: "Maintain a 30-day writing streak",
        condition: "streak >= 30",
        icon: "👑",
        points: 500,
    },
    Achievement {
        id: WORDSMITH,
        name: "Wordsmith",
        description: "Write a story with 500+ words",
        condition: "single story >= 500 words",
        icon: "✍️",
        points: 75,
    },
    Achievement {
        id: NOVELIST,
        name: "Novelist",
        description: "Write 10,000 total words",
        condition: "total words >= 10000",
        icon: "📚",
        points: 200,
    },
    Achievement {
        id: MEMORY_KEEPER,
        name: "Memory Keeper",
        description: "Write 50 stories",
        condition: "stories >= 50",
        icon: "💭",
        points: 300,
    },
    Achievement {
        id: STORYTELLER,
        name: "Master Storyteller",
        description: "Write 100 stories",
        condition: "stories >= 100",
        icon: "🎭",
        points: 1000,
    },
    Achievement {
        id: DIVERSE_TALES,
        name: "Diverse Tales",
        description: "Write stories in 5 different categories",
        condition: "categories >= 5",
        icon: "🌈",
        points: 150,
    },
];

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.id == id)
}

fn is_satisfied(achievement: &Achievement, stories: &[Story], profile: &UserProfile) -> bool {
    match achievement.id {
        FIRST_STORY => !stories.is_empty(),
        WEEK_WARRIOR => profile.current_streak >= 7,
        MONTH_MASTER => profile.current_streak >= 30,
        WORDSMITH => stories.iter().any(|s| s.word_count >= 500),
        NOVELIST => profile.total_words >= 10_000,
        MEMORY_KEEPER => stories.len() >= 50,
        STORYTELLER => stories.len() >= 100,
        DIVERSE_TALES => {
            let categories: HashSet<_> = stories.iter().map(|s| s.category).collect();
            categories.len() >= 5
        }
        _ => false,
    }
}

/// Return catalog entries whose condition is newly satisfied: true against
/// the given stories/profile AND not already present in the profile's badge
/// list. Predicates are pure and re-evaluated in full on every call.
pub fn check_achievements(stories: &[Story], profile: &UserProfile) -> Vec<&'static Achievement> {
    CATALOG
        .iter()
        .filter(|a| is_satisfied(a, stories, profile) && !profile.has_badge(a.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Badge, Category, Mood, Rarity};

    fn story_in(category: Category, words: usize) -> Story {
        let content = vec!["word"; words].join(" ");
        Story::new("t".to_string(), content, category, Mood::Joyful)
    }

    fn badge_for(id: &str) -> Badge {
        Badge {
            id: id.to_string(),
            name: String::new(),
            description: String::new(),
            icon: String::new(),
            unlocked_at: "2024-01-01 00:00:00".to_string(),
            rarity: Rarity::Common,
        }
    }

    #[test]
    fn first_story_unlocks_once() {
        let stories = vec![story_in(Category::Childhood, 10)];
        let mut profile = UserProfile::default();

        let unlocked = check_achievements(&stories, &profile);
        assert!(unlocked.iter().any(|a| a.id == FIRST_STORY));

        profile.badges.push(badge_for(FIRST_STORY));
        let again = check_achievements(&stories, &profile);
        assert!(!again.iter().any(|a| a.id == FIRST_STORY));
    }

    #[test]
    fn wordsmith_needs_a_single_long_story() {
        let profile = UserProfile::default();
        let short = vec![story_in(Category::Career, 499)];
        assert!(
            !check_achievements(&short, &profile)
                .iter()
                .any(|a| a.id == WORDSMITH)
        );

        let long = vec![story_in(Category::Career, 500)];
        assert!(
            check_achievements(&long, &profile)
                .iter()
                .any(|a| a.id == WORDSMITH)
        );
    }

    #[test]
    fn streak_achievements_read_the_profile() {
        let stories = vec![story_in(Category::Family, 10)];
        let mut profile = UserProfile::default();
        profile.current_streak = 7;

        let unlocked = check_achievements(&stories, &profile);
        assert!(unlocked.iter().any(|a| a.id == WEEK_WARRIOR));
        assert!(!unlocked.iter().any(|a| a.id == MONTH_MASTER));

        profile.current_streak = 30;
        let unlocked = check_achievements(&stories, &profile);
        assert!(unlocked.iter().any(|a| a.id == MONTH_MASTER));
    }

    #[test]
    fn diverse_tales_counts_distinct_categories_not_stories() {
        let profile = UserProfile::default();

        // Many stories, four distinct categories: not yet.
        let mut stories = vec![
            story_in(Category::Childhood, 10),
            story_in(Category::Childhood, 10),
            story_in(Category::Career, 10),
            story_in(Category::Family, 10),
            story_in(Category::Travel, 10),
            story_in(Category::Travel, 10),
        ];
        assert!(
            !check_achievements(&stories, &profile)
                .iter()
                .any(|a| a.id == DIVERSE_TALES)
        );

        stories.push(story_in(Category::Dreams, 10));
        assert!(
            check_achievements(&stories, &profile)
                .iter()
                .any(|a| a.id == DIVERSE_TALES)
        );
    }

    #[test]
    fn simultaneous_unlocks_are_all_reported() {
        let stories = vec![story_in(Category::Lessons, 600)];
        let profile = UserProfile::default();

        let ids: Vec<&str> = check_achievements(&stories, &profile)
            .iter()
            .map(|a| a.id)
            .collect();
        assert!(ids.contains(&FIRST_STORY));
        assert!(ids.contains(&WORDSMITH));
    }

    #[test]
    fn catalog_ids_resolve_through_find() {
        for achievement in CATALOG {
            assert_eq!(find(achievement.id), Some(achievement));
        }
        assert_eq!(find("no-such-badge"), None);
    }
}
