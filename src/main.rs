use clap::Parser;
use color_eyre::Result;
use storyteller::{
    Config, Database, Journal, Profile,
    cli::{Cli, Commands},
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Initialize database and open the journal session. Opening runs the
    // reconciliation pass when stories already exist.
    let db_path = config.get_database_path();
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;
    let mut journal = Journal::open(db)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Write {
            title,
            content,
            category,
            mood,
            tags,
            share,
        } => {
            storyteller::cli::handle_write(title, content, category, mood, tags, share, &mut journal)?;
        }
        Commands::List {
            category,
            favorites,
        } => {
            storyteller::cli::handle_list(category, favorites, &journal)?;
        }
        Commands::Edit {
            id,
            category,
            mood,
            tags,
        } => {
            storyteller::cli::handle_edit(id, category, mood, tags, &mut journal)?;
        }
        Commands::Favorite { id } => {
            storyteller::cli::handle_favorite(id, &mut journal)?;
        }
        Commands::Delete { id } => {
            storyteller::cli::handle_delete(id, &mut journal)?;
        }
        Commands::Profile => {
            storyteller::cli::handle_profile(&journal)?;
        }
        Commands::Prompt { category } => {
            storyteller::cli::handle_prompt(category)?;
        }
        Commands::Export { output } => {
            storyteller::cli::handle_export(output, &journal)?;
        }
        Commands::SetName { name } => {
            storyteller::cli::handle_set_name(name, &mut journal)?;
        }
        Commands::Prefs {
            reminder_time,
            reminder_enabled,
            theme,
            share_by_default,
        } => {
            storyteller::cli::handle_prefs(
                reminder_time,
                reminder_enabled,
                theme,
                share_by_default,
                &mut journal,
            )?;
        }
    }

    Ok(())
}
