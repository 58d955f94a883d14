use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use skycast_core::{
    Config, Coordinates, GeolocateError, Geolocator, OpenWeatherProvider, SearchBox, SearchEffect,
    SearchQuery, SearchService, Units, WeatherOrchestrator,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// API key for this run, overriding the stored configuration.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY")]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and preferences.
    Configure,

    /// Show current weather once, for a city or the geolocated position.
    Show {
        /// City name; omit to use the geolocated position.
        city: Option<String>,
    },

    /// Interactive dashboard with city autocomplete.
    Search,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }

        match self.command {
            Command::Configure => configure(config),
            Command::Show { city } => show(&config, city).await,
            Command::Search => search(&config).await,
        }
    }
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("Used for both the weather and the geocoding endpoint")
        .prompt()
        .context("Configuration aborted")?;
    config.set_api_key(api_key.trim().to_string());

    let units = Select::new("Units:", vec!["metric", "imperial"])
        .prompt()
        .context("Configuration aborted")?;
    config.units = match units {
        "imperial" => Units::Imperial,
        _ => Units::Metric,
    };

    config.save()?;
    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

/// One-shot geolocation, honoring the configuration switch.
async fn locate(config: &Config) -> Result<Coordinates, GeolocateError> {
    if !config.geolocation.enabled {
        return Err(GeolocateError::Unsupported);
    }
    Geolocator::new(config.geolocation.timeout()).locate().await
}

fn orchestrator(config: &Config) -> Result<WeatherOrchestrator> {
    let api_key = config.require_api_key()?.to_string();
    Ok(WeatherOrchestrator::new(
        SearchService::new(api_key, config.units),
        Box::new(OpenWeatherProvider::new()),
    ))
}

async fn show(config: &Config, city: Option<String>) -> Result<()> {
    let mut orch = orchestrator(config)?;

    match city {
        Some(name) => {
            orch.query_resolved(SearchQuery::ByName { text: name.clone() }, name);
        }
        None => {
            orch.geolocation_resolved(locate(config).await);
        }
    }

    orch.run_fetch().await;
    print!("{}", render::render_dashboard(&orch.view(), config.units));

    Ok(())
}

async fn search(config: &Config) -> Result<()> {
    let api_key = config.require_api_key()?.to_string();
    let suggester = SearchService::new(api_key, config.units);
    let mut orch = orchestrator(config)?;

    // The dashboard opens on the geolocated position, exactly once.
    orch.geolocation_resolved(locate(config).await);
    orch.run_fetch().await;
    print!("{}", render::render_dashboard(&orch.view(), config.units));

    let mut search_box = SearchBox::new();
    loop {
        let input = Text::new("City:")
            .with_help_message("Enter to search, Esc to quit")
            .prompt_skippable()
            .context("Search prompt failed")?;
        let Some(text) = input else { break };
        if text.is_empty() {
            break;
        }

        // Keystrokes settled into `text`; drive the machine with it.
        if let Some(SearchEffect::FetchSuggestions { seq, text }) = search_box.input_changed(&text)
        {
            let result = suggester.suggestions(&text).await;
            search_box.suggestions_arrived(seq, result);
        }

        let Some(SearchEffect::Resolve { query, label }) = pick(&mut search_box)? else {
            continue;
        };

        orch.query_resolved(query, label);
        orch.run_fetch().await;
        print!("{}", render::render_dashboard(&orch.view(), config.units));
    }

    Ok(())
}

/// Present the dropdown: a suggestion resolves by coordinates, the final
/// entry (or an empty dropdown) submits the raw text.
fn pick(search_box: &mut SearchBox) -> Result<Option<SearchEffect>> {
    if search_box.suggestions().is_empty() {
        // "No suggestions found" degrades to the raw-text submission.
        return Ok(search_box.submit());
    }

    let mut options: Vec<String> = search_box
        .suggestions()
        .iter()
        .map(|s| match &s.state {
            Some(state) => format!("{}, {} ({state})", s.name, s.country),
            None => s.label(),
        })
        .collect();
    let raw = format!("Search \"{}\" as typed", search_box.input());
    options.push(raw.clone());

    let choice = Select::new("Matches:", options.clone())
        .prompt_skippable()
        .context("Selection prompt failed")?;

    match choice {
        Some(c) if c == raw => Ok(search_box.submit()),
        Some(c) => {
            let Some(index) = options.iter().position(|o| *o == c) else {
                return Ok(None);
            };
            search_box.begin_selection();
            Ok(search_box.select(index))
        }
        None => {
            // Esc without a selection behaves like losing focus.
            search_box.blur();
            Ok(None)
        }
    }
}
