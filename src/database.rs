use rusqlite::Connection;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Badge, Story, UserProfile};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        // Open or create the database
        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Open a throwaway in-memory database (used by tests)
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema (tables and indexes)
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        // Create stories table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS stories (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                title           TEXT NOT NULL,
                content         TEXT NOT NULL,
                date            TEXT NOT NULL,
                category        TEXT NOT NULL,
                mood            TEXT NOT NULL,
                tags            TEXT,
                word_count      INTEGER NOT NULL DEFAULT 0,
                is_favorite     INTEGER DEFAULT 0,
                share_id        TEXT
            )",
            [],
        )?;

        // Create single-row profile table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS profile (
                id                  INTEGER PRIMARY KEY CHECK (id = 1),
                name                TEXT NOT NULL DEFAULT '',
                join_date           TEXT NOT NULL,
                current_streak      INTEGER NOT NULL DEFAULT 0,
                longest_streak      INTEGER NOT NULL DEFAULT 0,
                total_stories       INTEGER NOT NULL DEFAULT 0,
                total_words         INTEGER NOT NULL DEFAULT 0,
                level               INTEGER NOT NULL DEFAULT 1,
                points              INTEGER NOT NULL DEFAULT 0,
                reminder_time       TEXT NOT NULL DEFAULT '19:00',
                reminder_enabled    INTEGER NOT NULL DEFAULT 1,
                theme               TEXT NOT NULL DEFAULT 'auto',
                share_by_default    INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        // Create badges table
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS badges (
                id              TEXT PRIMARY KEY,
                name            TEXT NOT NULL,
                description     TEXT NOT NULL,
                icon            TEXT NOT NULL,
                unlocked_at     TEXT NOT NULL,
                rarity          TEXT NOT NULL DEFAULT 'common'
            )",
            [],
        )?;

        // Create indexes
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_stories_date ON stories(date)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_stories_category ON stories(category)",
            [],
        )?;

        Ok(())
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Helper function to map a row to a Story
    fn row_to_story(row: &rusqlite::Row) -> Result<Story, rusqlite::Error> {
        let category: String = row.get(4)?;
        let mood: String = row.get(5)?;
        Ok(Story {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            content: row.get(2)?,
            date: row.get(3)?,
            category: category.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, e.into())
            })?,
            mood: mood.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, e.into())
            })?,
            tags: row.get(6)?,
            word_count: row.get(7)?,
            is_favorite: row.get::<_, i64>(8)? != 0,
            share_id: row.get(9)?,
        })
    }

    /// Insert a story into the database and return its ID
    pub fn insert_story(&self, story: &Story) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO stories (title, content, date, category, mood, tags, word_count, is_favorite, share_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                story.title,
                story.content,
                story.date,
                story.category.as_str(),
                story.mood.as_str(),
                story.tags,
                story.word_count,
                if story.is_favorite { 1 } else { 0 },
                story.share_id
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get all stories ordered by date DESC (newest first)
    pub fn get_all_stories(&self) -> Result<Vec<Story>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, date, category, mood, tags, word_count, is_favorite, share_id
             FROM stories ORDER BY date DESC, id DESC",
        )?;
        let stories = stmt
            .query_map([], Self::row_to_story)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(stories)
    }

    /// Get a single story by ID
    pub fn get_story(&self, id: i64) -> Result<Story, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, date, category, mood, tags, word_count, is_favorite, share_id
             FROM stories WHERE id = ?1",
        )?;

        stmt.query_row(rusqlite::params![id], Self::row_to_story)
            .map_err(DatabaseError::from)
    }

    /// Update an existing story
    pub fn update_story(&self, story: &Story) -> Result<(), DatabaseError> {
        let id = story.id.ok_or_else(|| {
            DatabaseError::SqliteError(rusqlite::Error::InvalidColumnType(
                0,
                "id".to_string(),
                rusqlite::types::Type::Null,
            ))
        })?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE stories SET title = ?1, content = ?2, date = ?3, category = ?4,
             mood = ?5, tags = ?6, word_count = ?7, is_favorite = ?8, share_id = ?9 WHERE id = ?10",
            rusqlite::params![
                story.title,
                story.content,
                story.date,
                story.category.as_str(),
                story.mood.as_str(),
                story.tags,
                story.word_count,
                if story.is_favorite { 1 } else { 0 },
                story.share_id,
                id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Delete a story by ID
    pub fn delete_story(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM stories WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(())
    }

    /// Load the profile (with its badges), or None when no profile row
    /// has been created yet
    pub fn load_profile(&self) -> Result<Option<UserProfile>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, join_date, current_streak, longest_streak, total_stories,
                    total_words, level, points, reminder_time, reminder_enabled,
                    theme, share_by_default
             FROM profile WHERE id = 1",
        )?;

        let result = stmt.query_row([], |row| {
            let theme: String = row.get(10)?;
            Ok(UserProfile {
                name: row.get(0)?,
                join_date: row.get(1)?,
                current_streak: row.get(2)?,
                longest_streak: row.get(3)?,
                total_stories: row.get(4)?,
                total_words: row.get(5)?,
                level: row.get(6)?,
                points: row.get(7)?,
                badges: Vec::new(),
                preferences: crate::models::Preferences {
                    reminder_time: row.get(8)?,
                    reminder_enabled: row.get::<_, i64>(9)? != 0,
                    theme: theme.parse().map_err(|e: String| {
                        rusqlite::Error::FromSqlConversionFailure(
                            10,
                            rusqlite::types::Type::Text,
                            e.into(),
                        )
                    })?,
                    share_by_default: row.get::<_, i64>(11)? != 0,
                },
            })
        });

        match result {
            Ok(mut profile) => {
                profile.badges = self.get_all_badges()?;
                Ok(Some(profile))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Save the profile row (badges are persisted separately via insert_badge)
    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO profile (id, name, join_date, current_streak, longest_streak,
                                  total_stories, total_words, level, points,
                                  reminder_time, reminder_enabled, theme, share_by_default)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                join_date = excluded.join_date,
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                total_stories = excluded.total_stories,
                total_words = excluded.total_words,
                level = excluded.level,
                points = excluded.points,
                reminder_time = excluded.reminder_time,
                reminder_enabled = excluded.reminder_enabled,
                theme = excluded.theme,
                share_by_default = excluded.share_by_default",
            rusqlite::params![
                profile.name,
                profile.join_date,
                profile.current_streak,
                profile.longest_streak,
                profile.total_stories,
                profile.total_words,
                profile.level,
                profile.points,
                profile.preferences.reminder_time,
                if profile.preferences.reminder_enabled { 1 } else { 0 },
                profile.preferences.theme.as_str(),
                if profile.preferences.share_by_default { 1 } else { 0 }
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Insert an unlocked badge (ignored if the id is already present)
    pub fn insert_badge(&self, badge: &Badge) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO badges (id, name, description, icon, unlocked_at, rarity)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                badge.id,
                badge.name,
                badge.description,
                badge.icon,
                badge.unlocked_at,
                badge.rarity.as_str()
            ],
        )?;
        Ok(())
    }

    /// Get all badges ordered by unlock time
    pub fn get_all_badges(&self) -> Result<Vec<Badge>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, icon, unlocked_at, rarity
             FROM badges ORDER BY unlocked_at ASC, id ASC",
        )?;

        let badges = stmt
            .query_map([], |row| {
                let rarity: String = row.get(5)?;
                Ok(Badge {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    icon: row.get(3)?,
                    unlocked_at: row.get(4)?,
                    rarity: rarity.parse().map_err(|e: String| {
                        rusqlite::Error::FromSqlConversionFailure(
                            5,
                            rusqlite::types::Type::Text,
                            e.into(),
                        )
                    })?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(badges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Mood, Rarity, Story};

    #[test]
    fn story_round_trips_through_sqlite() {
        let db = Database::open_in_memory().unwrap();
        let mut story = Story::new(
            "A day at the lake".to_string(),
            "We rowed out before sunrise.".to_string(),
            Category::Adventures,
            Mood::Peaceful,
        );
        story.tags = Some("summer, lake".to_string());

        let id = db.insert_story(&story).unwrap();
        let loaded = db.get_story(id).unwrap();
        assert_eq!(loaded.title, story.title);
        assert_eq!(loaded.category, Category::Adventures);
        assert_eq!(loaded.mood, Mood::Peaceful);
        assert_eq!(loaded.word_count, 5);
        assert!(!loaded.is_favorite);

        let all = db.get_all_stories().unwrap();
        assert_eq!(all.len(), 1);

        db.delete_story(id).unwrap();
        assert!(db.get_all_stories().unwrap().is_empty());
    }

    #[test]
    fn profile_upsert_and_reload() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_profile().unwrap().is_none());

        let mut profile = UserProfile::default();
        profile.name = "Ada".to_string();
        profile.points = 160;
        profile.level = 2;
        db.save_profile(&profile).unwrap();

        profile.points = 200;
        db.save_profile(&profile).unwrap();

        let loaded = db.load_profile().unwrap().unwrap();
        assert_eq!(loaded.name, "Ada");
        assert_eq!(loaded.points, 200);
        assert_eq!(loaded.level, 2);
        assert!(loaded.badges.is_empty());
    }

    #[test]
    fn duplicate_badge_ids_are_ignored() {
        let db = Database::open_in_memory().unwrap();
        db.save_profile(&UserProfile::default()).unwrap();

        let badge = Badge {
            id: "first-story".to_string(),
            name: "First Chapter".to_string(),
            description: "Write your very first story".to_string(),
            icon: "📝".to_string(),
            unlocked_at: "2024-03-05 12:00:00".to_string(),
            rarity: Rarity::Common,
        };
        db.insert_badge(&badge).unwrap();
        db.insert_badge(&badge).unwrap();

        let badges = db.get_all_badges().unwrap();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].rarity, Rarity::Common);
    }
}
