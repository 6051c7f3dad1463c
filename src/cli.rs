use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::game::{achievements::Achievement, points_for_next_level};
use crate::journal::{Journal, JournalError, StoryDraft};
use crate::models::{Category, Mood, Theme};
use crate::utils::{format_date_for_display, parse_tags};

#[derive(Parser)]
#[command(name = "storyteller")]
#[command(about = "Personal journal with streaks, levels and achievement badges")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new story
    Write {
        /// Story title
        title: String,
        /// Story body
        content: String,
        /// Category (childhood, career, relationships, adventures, achievements,
        /// challenges, family, hobbies, travel, lessons, memories, dreams)
        #[arg(long)]
        category: String,
        /// Mood (joyful, grateful, nostalgic, proud, reflective, bittersweet,
        /// hopeful, peaceful)
        #[arg(long)]
        mood: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Generate a share id for this story
        #[arg(long)]
        share: bool,
    },
    /// List stories, newest first
    List {
        /// Only show stories in this category
        #[arg(long)]
        category: Option<String>,
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Edit a story's category, mood or tags
    Edit {
        /// Story ID
        id: i64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        mood: Option<String>,
        /// Comma-separated tags (empty string clears them)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Toggle a story's favorite flag
    Favorite {
        /// Story ID
        id: i64,
    },
    /// Delete a story (irreversible)
    Delete {
        /// Story ID
        id: i64,
    },
    /// Show profile stats and badges
    Profile,
    /// Print a random writing prompt
    Prompt {
        /// Restrict to one category's prompts
        #[arg(long)]
        category: Option<String>,
    },
    /// Export the profile and all stories as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Set the display name on the profile
    SetName {
        /// New display name
        name: String,
    },
    /// Update preference settings
    Prefs {
        /// Daily reminder time (HH:MM)
        #[arg(long)]
        reminder_time: Option<String>,
        /// Enable or disable the reminder
        #[arg(long)]
        reminder_enabled: Option<bool>,
        /// Theme (light, dark, auto)
        #[arg(long)]
        theme: Option<String>,
        /// Share new stories by default
        #[arg(long)]
        share_by_default: Option<bool>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Journal error: {0}")]
    JournalError(#[from] JournalError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to write export file: {0}")]
    ExportIoError(#[from] std::io::Error),
}

fn parse_category(s: &str) -> Result<Category, CliError> {
    s.parse().map_err(CliError::InvalidArgument)
}

fn parse_mood(s: &str) -> Result<Mood, CliError> {
    s.parse().map_err(CliError::InvalidArgument)
}

fn print_unlocked(unlocked: &[&'static Achievement]) {
    for achievement in unlocked {
        println!(
            "Achievement unlocked: {} {} (+{} pts) - {}",
            achievement.icon, achievement.name, achievement.points, achievement.description
        );
    }
}

/// Handle the write command
pub fn handle_write(
    title: String,
    content: String,
    category: String,
    mood: String,
    tags: Option<String>,
    share: bool,
    journal: &mut Journal,
) -> Result<(), CliError> {
    let draft = StoryDraft {
        title,
        content,
        category: parse_category(&category)?,
        mood: parse_mood(&mood)?,
        tags,
        share,
    };

    let (story, unlocked) = journal.add_story(draft)?;
    println!(
        "Story saved (ID: {}, {} words)",
        story.id.unwrap_or_default(),
        story.word_count
    );
    if let Some(share_id) = &story.share_id {
        println!("Share id: {}", share_id);
    }
    print_unlocked(&unlocked);

    let profile = journal.profile();
    println!(
        "Streak: {} day(s) | Level {} | {} pts",
        profile.current_streak, profile.level, profile.points
    );

    Ok(())
}

/// Handle the list command
pub fn handle_list(
    category: Option<String>,
    favorites: bool,
    journal: &Journal,
) -> Result<(), CliError> {
    let category = category.as_deref().map(parse_category).transpose()?;

    let mut shown = 0;
    for story in journal.stories() {
        if let Some(category) = category {
            if story.category != category {
                continue;
            }
        }
        if favorites && !story.is_favorite {
            continue;
        }

        let marker = if story.is_favorite { "*" } else { " " };
        let tags = parse_tags(story.tags.as_ref());
        let tag_suffix = if tags.is_empty() {
            String::new()
        } else {
            format!(
                "  {}",
                tags.iter()
                    .map(|t| format!("[{}]", t))
                    .collect::<Vec<_>>()
                    .join(" ")
            )
        };
        println!(
            "{:>4}{} {}  {}  ({}, {}, {} words){}",
            story.id.unwrap_or_default(),
            marker,
            format_date_for_display(&story.date),
            story.title,
            story.category,
            story.mood,
            story.word_count,
            tag_suffix
        );
        shown += 1;
    }

    if shown == 0 {
        println!("No stories found");
    }

    Ok(())
}

/// Handle the edit command
pub fn handle_edit(
    id: i64,
    category: Option<String>,
    mood: Option<String>,
    tags: Option<String>,
    journal: &mut Journal,
) -> Result<(), CliError> {
    let category = category.as_deref().map(parse_category).transpose()?;
    let mood = mood.as_deref().map(parse_mood).transpose()?;

    let story = journal.update_story(id, category, mood, tags)?;
    println!(
        "Story updated (ID: {}, category: {}, mood: {})",
        id, story.category, story.mood
    );

    Ok(())
}

/// Handle the favorite command
pub fn handle_favorite(id: i64, journal: &mut Journal) -> Result<(), CliError> {
    let is_favorite = journal.toggle_favorite(id)?;
    if is_favorite {
        println!("Story {} marked as favorite", id);
    } else {
        println!("Story {} unmarked as favorite", id);
    }
    Ok(())
}

/// Handle the delete command
pub fn handle_delete(id: i64, journal: &mut Journal) -> Result<(), CliError> {
    journal.delete_story(id)?;
    println!("Story {} deleted", id);
    Ok(())
}

/// Handle the profile command
pub fn handle_profile(journal: &Journal) -> Result<(), CliError> {
    let profile = journal.profile();
    let name = if profile.name.is_empty() {
        "(unnamed)"
    } else {
        profile.name.as_str()
    };

    println!("{} - joined {}", name, format_date_for_display(&profile.join_date));
    println!(
        "Level {} ({} / {} pts toward level {})",
        profile.level,
        profile.points,
        points_for_next_level(profile.level),
        profile.level + 1
    );
    println!(
        "Streak: {} day(s) (longest: {})",
        profile.current_streak, profile.longest_streak
    );
    println!(
        "Stories: {} | Words: {}",
        profile.total_stories, profile.total_words
    );
    println!(
        "Reminder: {} ({}) | Theme: {} | Share by default: {}",
        profile.preferences.reminder_time,
        if profile.preferences.reminder_enabled {
            "on"
        } else {
            "off"
        },
        profile.preferences.theme,
        profile.preferences.share_by_default
    );

    if profile.badges.is_empty() {
        println!("Badges: none yet");
    } else {
        println!("Badges:");
        for badge in &profile.badges {
            println!(
                "  {} {} ({}) - unlocked {}",
                badge.icon,
                badge.name,
                badge.rarity,
                format_date_for_display(&badge.unlocked_at)
            );
        }
    }

    Ok(())
}

/// Handle the prompt command
pub fn handle_prompt(category: Option<String>) -> Result<(), CliError> {
    let category = category.as_deref().map(parse_category).transpose()?;
    println!("{}", crate::prompts::random_prompt(category));
    Ok(())
}

/// Handle the export command
pub fn handle_export(output: Option<String>, journal: &Journal) -> Result<(), CliError> {
    let json = journal.export_json()?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Export written to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Handle the set-name command
pub fn handle_set_name(name: String, journal: &mut Journal) -> Result<(), CliError> {
    journal.set_name(name)?;
    println!("Display name updated");
    Ok(())
}

/// Handle the prefs command
pub fn handle_prefs(
    reminder_time: Option<String>,
    reminder_enabled: Option<bool>,
    theme: Option<String>,
    share_by_default: Option<bool>,
    journal: &mut Journal,
) -> Result<(), CliError> {
    let mut preferences = journal.profile().preferences.clone();

    if let Some(time) = reminder_time {
        chrono::NaiveTime::parse_from_str(&time, "%H:%M")
            .map_err(|e| CliError::InvalidArgument(format!("Invalid time '{}': {}", time, e)))?;
        preferences.reminder_time = time;
    }
    if let Some(enabled) = reminder_enabled {
        preferences.reminder_enabled = enabled;
    }
    if let Some(theme) = theme {
        preferences.theme = theme
            .parse::<Theme>()
            .map_err(CliError::InvalidArgument)?;
    }
    if let Some(share) = share_by_default {
        preferences.share_by_default = share;
    }

    journal.set_preferences(preferences)?;
    println!("Preferences updated");
    Ok(())
}
