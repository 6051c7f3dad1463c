pub mod cli;
pub mod config;
pub mod database;
pub mod game;
pub mod journal;
pub mod models;
pub mod prompts;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use journal::{Journal, StoryDraft};
pub use models::{Story, UserProfile};
pub use utils::Profile;
