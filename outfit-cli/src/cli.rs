use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use outfit_core::{ConfigStore, Settings};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "What to wear for the weather where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for a city and show its weather and outfit (the default).
    Run,

    /// List saved locations, oldest first.
    Locations,

    /// Edit API endpoints and where the saved state lives.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::load_or_default();
        tracing::debug!(?settings, "loaded settings");

        match self.command.unwrap_or(Command::Run) {
            Command::Run => interactive::run(&settings).await,
            Command::Locations => {
                let store = ConfigStore::new(settings.state_file_or_local());
                let (_, saved) = store.load();
                print!("{}", render::locations(&saved));
                Ok(())
            }
            Command::Configure => configure(settings),
        }
    }
}

fn configure(mut settings: Settings) -> anyhow::Result<()> {
    settings.geocoding_url = Text::new("Geocoding API URL:")
        .with_default(&settings.geocoding_url)
        .prompt()
        .context("Failed to read geocoding URL")?;

    settings.forecast_url = Text::new("Forecast API URL:")
        .with_default(&settings.forecast_url)
        .prompt()
        .context("Failed to read forecast URL")?;

    let current = settings
        .state_file
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let help = format!(
        "leave empty to use {}",
        Settings { state_file: None, ..settings.clone() }.state_file_or_local().display()
    );
    let state_file = Text::new("State file:")
        .with_default(&current)
        .with_help_message(&help)
        .prompt()
        .context("Failed to read state file path")?;

    let state_file = state_file.trim();
    settings.state_file = (!state_file.is_empty()).then(|| state_file.into());

    settings.save()?;
    println!("Saved settings to {}", Settings::settings_file_path()?.display());

    Ok(())
}
