use chrono::NaiveDateTime;
use rand::{Rng, distributions::Alphanumeric};
use serde::Serialize;
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::game::{
    achievements::{self, Achievement},
    calculate_level, calculate_streak, points_for_story,
};
use crate::models::{Badge, Category, Mood, Preferences, Rarity, Story, UserProfile, count_words};
use crate::utils;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("Story not found: {0}")]
    StoryNotFound(i64),
    #[error("Failed to serialize export: {0}")]
    ExportError(#[from] serde_json::Error),
}

/// Input for a new story; id, timestamp and word count are assigned at
/// creation and are not part of the draft.
#[derive(Debug, Clone)]
pub struct StoryDraft {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub mood: Mood,
    pub tags: Option<String>,
    pub share: bool,
}

/// On-demand export document: the full profile, the full story collection
/// and the moment the snapshot was taken. Unversioned.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub profile: UserProfile,
    pub stories: Vec<Story>,
    pub exported_at: String,
}

/// The journal session: owns the loaded story collection and profile and
/// orchestrates scoring, streak, level and achievement evaluation after
/// every mutation. All state flows through this object; nothing global.
pub struct Journal {
    db: Database,
    stories: Vec<Story>,
    profile: UserProfile,
}

impl Journal {
    /// Load stories and profile from the database, creating the default
    /// profile on first run. When stories already exist, a reconciliation
    /// pass recomputes the derived aggregates before anything else runs,
    /// guarding against drift from edits or deletions.
    pub fn open(db: Database) -> Result<Self, JournalError> {
        let stories = db.get_all_stories()?;
        let profile = match db.load_profile()? {
            Some(profile) => profile,
            None => {
                let profile = UserProfile::default();
                db.save_profile(&profile)?;
                profile
            }
        };

        let mut journal = Journal {
            db,
            stories,
            profile,
        };
        if !journal.stories.is_empty() {
            journal.reconcile()?;
        }
        Ok(journal)
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Create a story from a draft, update the profile aggregates, and
    /// evaluate achievements. Returns the stored story together with any
    /// newly unlocked achievements for the caller to acknowledge.
    pub fn add_story(
        &mut self,
        draft: StoryDraft,
    ) -> Result<(Story, Vec<&'static Achievement>), JournalError> {
        self.add_story_at(draft, chrono::Local::now().naive_local())
    }

    fn add_story_at(
        &mut self,
        draft: StoryDraft,
        timestamp: NaiveDateTime,
    ) -> Result<(Story, Vec<&'static Achievement>), JournalError> {
        let word_count = count_words(&draft.content);
        let share_id = if draft.share || self.profile.preferences.share_by_default {
            Some(generate_share_id())
        } else {
            None
        };
        let mut story = Story {
            id: None,
            title: draft.title,
            content: draft.content,
            date: timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            category: draft.category,
            mood: draft.mood,
            tags: draft.tags,
            word_count,
            is_favorite: false,
            share_id,
        };

        let id = self.db.insert_story(&story)?;
        story.id = Some(id);
        self.stories.push(story.clone());
        self.stories.sort_by(|a, b| b.date.cmp(&a.date));

        // Story points first; level reads the total at this point. Reward
        // points from achievements are added below without a second level
        // recompute in the same pass, so a level-up funded purely by badge
        // bonuses lands on the next aggregation.
        let story_points = points_for_story(word_count);
        let current_streak = calculate_streak(&self.stories, utils::today());
        self.profile.total_words += word_count;
        self.profile.current_streak = current_streak;
        self.profile.longest_streak = self.profile.longest_streak.max(current_streak);
        self.profile.total_stories = self.stories.len() as i64;
        self.profile.points += story_points;
        self.profile.level = calculate_level(self.profile.points);
        self.db.save_profile(&self.profile)?;

        let unlocked = achievements::check_achievements(&self.stories, &self.profile);
        if !unlocked.is_empty() {
            let now = utils::get_current_datetime_string();
            for achievement in &unlocked {
                let badge = Badge {
                    id: achievement.id.to_string(),
                    name: achievement.name.to_string(),
                    description: achievement.description.to_string(),
                    icon: achievement.icon.to_string(),
                    unlocked_at: now.clone(),
                    rarity: Rarity::Common,
                };
                self.db.insert_badge(&badge)?;
                self.profile.badges.push(badge);
                self.profile.points += achievement.points;
            }
            self.db.save_profile(&self.profile)?;
        }

        Ok((story, unlocked))
    }

    /// Edit a story's metadata. Only category, mood and tags are editable
    /// after creation; title, content, timestamp and word count stay fixed.
    pub fn update_story(
        &mut self,
        id: i64,
        category: Option<Category>,
        mood: Option<Mood>,
        tags: Option<String>,
    ) -> Result<Story, JournalError> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(JournalError::StoryNotFound(id))?;

        if let Some(category) = category {
            story.category = category;
        }
        if let Some(mood) = mood {
            story.mood = mood;
        }
        if let Some(tags) = tags {
            story.tags = if tags.trim().is_empty() {
                None
            } else {
                Some(tags)
            };
        }

        let updated = story.clone();
        self.db.update_story(&updated)?;
        self.reconcile()?;
        Ok(updated)
    }

    /// Flip a story's favorite flag; returns the new state.
    pub fn toggle_favorite(&mut self, id: i64) -> Result<bool, JournalError> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(JournalError::StoryNotFound(id))?;
        story.is_favorite = !story.is_favorite;
        let updated = story.clone();
        self.db.update_story(&updated)?;
        Ok(updated.is_favorite)
    }

    /// Delete a story. Immediate and irreversible; aggregates are
    /// reconciled afterwards.
    pub fn delete_story(&mut self, id: i64) -> Result<(), JournalError> {
        if !self.stories.iter().any(|s| s.id == Some(id)) {
            return Err(JournalError::StoryNotFound(id));
        }
        self.db.delete_story(id)?;
        self.stories.retain(|s| s.id != Some(id));
        self.reconcile()?;
        Ok(())
    }

    /// Recompute derived profile aggregates from the live story collection
    /// and persist them: current streak, longest streak (monotonic max),
    /// story count and word totals. Points and level are left untouched.
    pub fn reconcile(&mut self) -> Result<(), JournalError> {
        let current_streak = calculate_streak(&self.stories, utils::today());
        self.profile.current_streak = current_streak;
        self.profile.longest_streak = self.profile.longest_streak.max(current_streak);
        self.profile.total_stories = self.stories.len() as i64;
        self.profile.total_words = self.stories.iter().map(|s| s.word_count).sum();
        self.db.save_profile(&self.profile)?;
        Ok(())
    }

    pub fn set_name(&mut self, name: String) -> Result<(), JournalError> {
        self.profile.name = name;
        self.db.save_profile(&self.profile)?;
        Ok(())
    }

    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<(), JournalError> {
        self.profile.preferences = preferences;
        self.db.save_profile(&self.profile)?;
        Ok(())
    }

    /// Build the export snapshot of the full profile and story collection.
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.profile.clone(),
            stories: self.stories.clone(),
            exported_at: utils::get_current_datetime_string(),
        }
    }

    /// Serialize the export snapshot as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, JournalError> {
        Ok(serde_json::to_string_pretty(&self.export_snapshot())?)
    }
}

fn generate_share_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn open_empty_journal() -> Journal {
        Journal::open(Database::open_in_memory().unwrap()).unwrap()
    }

    fn draft(title: &str, words: usize, category: Category) -> StoryDraft {
        StoryDraft {
            title: title.to_string(),
            content: vec!["word"; words].join(" "),
            category,
            mood: Mood::Reflective,
            tags: None,
            share: false,
        }
    }

    fn days_ago(n: u64) -> NaiveDateTime {
        let date = utils::today().checked_sub_days(Days::new(n)).unwrap();
        date.and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn open_creates_default_profile() {
        let journal = open_empty_journal();
        let profile = journal.profile();
        assert_eq!(profile.level, 1);
        assert_eq!(profile.points, 0);
        assert_eq!(profile.current_streak, 0);
        assert!(profile.badges.is_empty());
        assert_eq!(profile.preferences.reminder_time, "19:00");
    }

    #[test]
    fn three_consecutive_days_end_to_end() {
        let mut journal = open_empty_journal();

        let (_, first) = journal
            .add_story_at(draft("one", 600, Category::Childhood), days_ago(2))
            .unwrap();
        // 600 words unlocks first-story and wordsmith together.
        let first_ids: Vec<&str> = first.iter().map(|a| a.id).collect();
        assert_eq!(first_ids, vec!["first-story", "wordsmith"]);

        let (_, second) = journal
            .add_story_at(draft("two", 600, Category::Career), days_ago(1))
            .unwrap();
        assert!(second.is_empty());

        let (_, third) = journal
            .add_story_at(draft("three", 600, Category::Family), days_ago(0))
            .unwrap();
        assert!(third.is_empty());

        let profile = journal.profile();
        assert_eq!(profile.current_streak, 3);
        assert_eq!(profile.longest_streak, 3);
        assert_eq!(profile.total_stories, 3);
        assert_eq!(profile.total_words, 1800);
        // 3 stories at 60 points each, plus 50 (first-story) + 75 (wordsmith).
        assert_eq!(profile.points, 3 * 60 + 50 + 75);
        let badge_ids: Vec<&str> = profile.badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(badge_ids, vec!["first-story", "wordsmith"]);
        assert!(profile.badges.iter().all(|b| b.rarity == Rarity::Common));
    }

    #[test]
    fn level_ignores_achievement_points_until_next_pass() {
        let mut journal = open_empty_journal();
        let (_, unlocked) = journal
            .add_story_at(draft("one", 600, Category::Travel), days_ago(0))
            .unwrap();
        assert!(!unlocked.is_empty());

        // 60 story points put the level at 1 even though the reward points
        // (50 + 75) push the running total past the level-2 threshold.
        let profile = journal.profile();
        assert_eq!(profile.points, 185);
        assert_eq!(profile.level, 1);

        // The next aggregation folds the bonus in.
        journal
            .add_story_at(draft("two", 10, Category::Travel), days_ago(0))
            .unwrap();
        assert_eq!(journal.profile().level, 2);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut journal = open_empty_journal();
        journal
            .add_story_at(draft("one", 120, Category::Hobbies), days_ago(1))
            .unwrap();
        journal
            .add_story_at(draft("two", 80, Category::Hobbies), days_ago(0))
            .unwrap();

        journal.reconcile().unwrap();
        let first = journal.profile().clone();
        journal.reconcile().unwrap();
        let second = journal.profile();

        assert_eq!(first.current_streak, second.current_streak);
        assert_eq!(first.longest_streak, second.longest_streak);
        assert_eq!(first.total_stories, second.total_stories);
        assert_eq!(first.total_words, second.total_words);
        assert_eq!(first.points, second.points);
        assert_eq!(first.level, second.level);
    }

    #[test]
    fn delete_reconciles_totals_but_keeps_points() {
        let mut journal = open_empty_journal();
        let (story, _) = journal
            .add_story_at(draft("one", 100, Category::Lessons), days_ago(0))
            .unwrap();
        journal
            .add_story_at(draft("two", 40, Category::Lessons), days_ago(0))
            .unwrap();

        let points_before = journal.profile().points;
        journal.delete_story(story.id.unwrap()).unwrap();

        let profile = journal.profile();
        assert_eq!(profile.total_stories, 1);
        assert_eq!(profile.total_words, 40);
        // Deletion never claws back earned points.
        assert_eq!(profile.points, points_before);

        assert!(matches!(
            journal.delete_story(9999),
            Err(JournalError::StoryNotFound(9999))
        ));
    }

    #[test]
    fn update_story_edits_metadata_only() {
        let mut journal = open_empty_journal();
        let (story, _) = journal
            .add_story_at(draft("one", 30, Category::Dreams), days_ago(0))
            .unwrap();
        let id = story.id.unwrap();

        let updated = journal
            .update_story(id, Some(Category::Memories), None, Some("night, vivid".to_string()))
            .unwrap();
        assert_eq!(updated.category, Category::Memories);
        assert_eq!(updated.mood, story.mood);
        assert_eq!(updated.tags.as_deref(), Some("night, vivid"));
        assert_eq!(updated.word_count, story.word_count);
        assert_eq!(updated.date, story.date);

        assert!(journal.toggle_favorite(id).unwrap());
        assert!(!journal.toggle_favorite(id).unwrap());
    }

    #[test]
    fn share_id_follows_draft_flag_and_default_preference() {
        let mut journal = open_empty_journal();

        let (plain, _) = journal
            .add_story_at(draft("plain", 5, Category::Career), days_ago(0))
            .unwrap();
        assert!(plain.share_id.is_none());

        let mut shared_draft = draft("shared", 5, Category::Career);
        shared_draft.share = true;
        let (shared, _) = journal.add_story_at(shared_draft, days_ago(0)).unwrap();
        let share_id = shared.share_id.unwrap();
        assert_eq!(share_id.len(), 8);

        let mut prefs = journal.profile().preferences.clone();
        prefs.share_by_default = true;
        journal.set_preferences(prefs).unwrap();
        let (defaulted, _) = journal
            .add_story_at(draft("defaulted", 5, Category::Career), days_ago(0))
            .unwrap();
        assert!(defaulted.share_id.is_some());
    }

    #[test]
    fn export_snapshot_carries_everything() {
        let mut journal = open_empty_journal();
        journal
            .add_story_at(draft("one", 25, Category::Memories), days_ago(0))
            .unwrap();
        journal.set_name("Ada".to_string()).unwrap();

        let json = journal.export_json().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["profile"]["name"], "Ada");
        assert_eq!(doc["stories"].as_array().unwrap().len(), 1);
        assert_eq!(doc["stories"][0]["category"], "memories");
        assert!(doc["exported_at"].is_string());
    }
}
