use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Life-topic tag assigned to every story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Childhood,
    Career,
    Relationships,
    Adventures,
    Achievements,
    Challenges,
    Family,
    Hobbies,
    Travel,
    Lessons,
    Memories,
    Dreams,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Childhood => "childhood",
            Category::Career => "career",
            Category::Relationships => "relationships",
            Category::Adventures => "adventures",
            Category::Achievements => "achievements",
            Category::Challenges => "challenges",
            Category::Family => "family",
            Category::Hobbies => "hobbies",
            Category::Travel => "travel",
            Category::Lessons => "lessons",
            Category::Memories => "memories",
            Category::Dreams => "dreams",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Category::Childhood,
            Category::Career,
            Category::Relationships,
            Category::Adventures,
            Category::Achievements,
            Category::Challenges,
            Category::Family,
            Category::Hobbies,
            Category::Travel,
            Category::Lessons,
            Category::Memories,
            Category::Dreams,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "childhood" => Ok(Category::Childhood),
            "career" => Ok(Category::Career),
            "relationships" => Ok(Category::Relationships),
            "adventures" => Ok(Category::Adventures),
            "achievements" => Ok(Category::Achievements),
            "challenges" => Ok(Category::Challenges),
            "family" => Ok(Category::Family),
            "hobbies" => Ok(Category::Hobbies),
            "travel" => Ok(Category::Travel),
            "lessons" => Ok(Category::Lessons),
            "memories" => Ok(Category::Memories),
            "dreams" => Ok(Category::Dreams),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Emotional tag assigned to every story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joyful,
    Grateful,
    Nostalgic,
    Proud,
    Reflective,
    Bittersweet,
    Hopeful,
    Peaceful,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Joyful => "joyful",
            Mood::Grateful => "grateful",
            Mood::Nostalgic => "nostalgic",
            Mood::Proud => "proud",
            Mood::Reflective => "reflective",
            Mood::Bittersweet => "bittersweet",
            Mood::Hopeful => "hopeful",
            Mood::Peaceful => "peaceful",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "joyful" => Ok(Mood::Joyful),
            "grateful" => Ok(Mood::Grateful),
            "nostalgic" => Ok(Mood::Nostalgic),
            "proud" => Ok(Mood::Proud),
            "reflective" => Ok(Mood::Reflective),
            "bittersweet" => Ok(Mood::Bittersweet),
            "hopeful" => Ok(Mood::Hopeful),
            "peaceful" => Ok(Mood::Peaceful),
            other => Err(format!("Unknown mood: {}", other)),
        }
    }
}

/// Badge rarity tier. Every unlock currently records Common; the other
/// tiers exist in the schema but are not assigned anywhere yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            other => Err(format!("Unknown rarity: {}", other)),
        }
    }
}

/// Theme preference carried in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub date: String, // Local time: YYYY-MM-DD HH:MM:SS
    pub category: Category,
    pub mood: Mood,
    pub tags: Option<String>,
    pub word_count: i64,
    pub is_favorite: bool,
    pub share_id: Option<String>,
}

impl Story {
    pub fn new(title: String, content: String, category: Category, mood: Mood) -> Self {
        let now = crate::utils::get_current_datetime_string();
        let word_count = count_words(&content);
        Self {
            id: None,
            title,
            content,
            date: now,
            category,
            mood,
            tags: None,
            word_count,
            is_favorite: false,
            share_id: None,
        }
    }

    /// Calendar day this story was written, from the stored timestamp.
    pub fn day(&self) -> Option<chrono::NaiveDate> {
        let date_part = self.date.get(..10)?;
        chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// Number of whitespace-delimited non-empty tokens in a story body.
/// Computed once at creation time and never recomputed afterwards.
pub fn count_words(content: &str) -> i64 {
    content.split_whitespace().count() as i64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub join_date: String, // YYYY-MM-DD
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_stories: i64,
    pub total_words: i64,
    pub level: i64,
    pub points: i64,
    pub badges: Vec<Badge>,
    pub preferences: Preferences,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            join_date: crate::utils::get_current_date_string(),
            current_streak: 0,
            longest_streak: 0,
            total_stories: 0,
            total_words: 0,
            level: 1,
            points: 0,
            badges: Vec::new(),
            preferences: Preferences::default(),
        }
    }
}

impl UserProfile {
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub reminder_time: String, // HH:MM
    pub reminder_enabled: bool,
    pub theme: Theme,
    pub share_by_default: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reminder_time: "19:00".to_string(),
            reminder_enabled: true,
            theme: Theme::Auto,
            share_by_default: false,
        }
    }
}

/// Persisted record of an unlocked achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: String, // Local time: YYYY-MM-DD HH:MM:SS
    pub rarity: Rarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("one  two\nthree\tfour"), 4);
    }

    #[test]
    fn category_round_trips_through_strings() {
        for cat in Category::all() {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), *cat);
        }
        assert!("gardening".parse::<Category>().is_err());
    }

    #[test]
    fn story_day_parses_stored_timestamp() {
        let mut story = Story::new(
            "t".to_string(),
            "c".to_string(),
            Category::Memories,
            Mood::Reflective,
        );
        story.date = "2024-03-05 23:10:00".to_string();
        assert_eq!(
            story.day(),
            Some(chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
    }
}
