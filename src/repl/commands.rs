//! REPL commands and the per-session state they act on.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::info;

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::{LocationsResponse, PokemonResponse};

/// Catch rolls are drawn from `0..CATCH_ROLL_CEILING`.
pub const CATCH_ROLL_CEILING: i32 = 150;

// == Command ==
/// Every command the prompt understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Cache,
}

impl Command {
    /// All commands in the order `help` lists them.
    pub const ALL: [Command; 9] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
        Command::Cache,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
            Command::Cache => "cache",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Close the Pokedex",
            Command::Map => "Navigate forward through the location areas",
            Command::MapBack => "Navigate backwards through the location areas",
            Command::Explore => "List the Pokemon found in a location area: explore <area>",
            Command::Catch => "Throw a Pokeball at a Pokemon: catch <pokemon>",
            Command::Inspect => "Show details of a caught Pokemon: inspect <pokemon>",
            Command::Pokedex => "List the Pokemon you have caught",
            Command::Cache => "Show response cache statistics",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

/// Whether the REPL keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Lines printed by a command, plus whether the loop continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub flow: Flow,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            flow: Flow::Continue,
        }
    }
}

// == Session ==
/// State carried between commands: map cursor, caught Pokemon, and the client.
pub struct Session {
    client: PokeApiClient,
    next_url: Option<String>,
    previous_url: Option<String>,
    pokedex: BTreeMap<String, PokemonResponse>,
    rng: Box<dyn RngCore + Send>,
}

impl Session {
    /// Creates a session starting at the first page of location areas.
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG for catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            next_url: Some(client.first_locations_url()),
            previous_url: None,
            pokedex: BTreeMap::new(),
            rng: Box::new(rng),
            client,
        }
    }

    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    pub fn previous_url(&self) -> Option<&str> {
        self.previous_url.as_deref()
    }

    pub fn pokedex(&self) -> &BTreeMap<String, PokemonResponse> {
        &self.pokedex
    }

    /// Runs `command` with its arguments.
    pub async fn execute(&mut self, command: Command, args: &[String]) -> Result<Reply> {
        let lines = match command {
            Command::Help => self.help(),
            Command::Exit => {
                return Ok(Reply {
                    lines: vec!["Closing the Pokedex... Goodbye!".to_string()],
                    flow: Flow::Exit,
                })
            }
            Command::Map => self.map().await?,
            Command::MapBack => self.map_back().await?,
            Command::Explore => self.explore(single_arg(command, args, "<area>")?).await?,
            Command::Catch => self.catch(single_arg(command, args, "<pokemon>")?).await?,
            Command::Inspect => self.inspect(single_arg(command, args, "<pokemon>")?),
            Command::Pokedex => self.list_pokedex(),
            Command::Cache => self.cache_stats().await,
        };
        Ok(Reply::lines(lines))
    }

    fn help(&self) -> Vec<String> {
        let mut lines = vec![
            "Welcome to the Pokedex!".to_string(),
            "Usage:".to_string(),
            String::new(),
        ];
        lines.extend(
            Command::ALL
                .iter()
                .map(|command| format!("  {} - {}", command.name(), command.description())),
        );
        lines
    }

    async fn map(&mut self) -> Result<Vec<String>> {
        let Some(url) = self.next_url.clone() else {
            return Ok(vec!["you're on the last page.".to_string()]);
        };
        self.show_page(&url).await
    }

    async fn map_back(&mut self) -> Result<Vec<String>> {
        let Some(url) = self.previous_url.clone() else {
            return Ok(vec!["you're on the first page.".to_string()]);
        };
        self.show_page(&url).await
    }

    /// Prints one page and moves the cursor only when the fetch succeeded.
    async fn show_page(&mut self, url: &str) -> Result<Vec<String>> {
        let page: LocationsResponse = self.client.locations(url).await?;

        self.next_url = page.next;
        self.previous_url = page.previous;
        Ok(page.results.into_iter().map(|area| area.name).collect())
    }

    async fn explore(&mut self, area: &str) -> Result<Vec<String>> {
        let location = self.client.location_area(area).await?;

        let mut lines = vec![format!("Exploring {}...", area), "Found Pokemon:".to_string()];
        lines.extend(
            location
                .pokemon_encounters
                .iter()
                .map(|encounter| bullet(&encounter.pokemon.name)),
        );
        Ok(lines)
    }

    async fn catch(&mut self, name: &str) -> Result<Vec<String>> {
        let pokemon = self.client.pokemon(name).await?;
        let difficulty = pokemon.catch_difficulty();
        let roll = self.rng.gen_range(0..CATCH_ROLL_CEILING);

        let mut lines = vec![format!("Throwing a Pokeball at {}...", name)];
        if roll > difficulty {
            info!(pokemon = name, roll, difficulty, "Pokemon caught");
            lines.push(format!("You caught {}: {} > {}", name, roll, difficulty));
            self.pokedex.insert(name.to_string(), pokemon);
        } else {
            lines.push(format!("You missed {}: {} <= {}", name, roll, difficulty));
        }
        Ok(lines)
    }

    fn inspect(&self, name: &str) -> Vec<String> {
        let Some(pokemon) = self.pokedex.get(name) else {
            return vec![format!("you have not yet caught {}", name)];
        };

        let mut lines = vec![
            format!("Name: {}", pokemon.name),
            format!("Height: {}", pokemon.height),
            format!("Weight: {}", pokemon.weight),
            "Stats:".to_string(),
        ];
        lines.extend(
            pokemon
                .stats
                .iter()
                .map(|stat| bullet(&format!("{}: {}", stat.stat.name, stat.base_stat))),
        );
        lines.push("Types:".to_string());
        lines.extend(pokemon.types.iter().map(|typ| bullet(&typ.kind.name)));
        lines
    }

    fn list_pokedex(&self) -> Vec<String> {
        if self.pokedex.is_empty() {
            return vec!["You don't have any Pokemon so far".to_string()];
        }

        let mut lines = vec!["Your Pokedex:".to_string()];
        lines.extend(self.pokedex.values().map(|pokemon| bullet(&pokemon.name)));
        lines
    }

    async fn cache_stats(&self) -> Vec<String> {
        let cache = self.client.cache();
        let stats = cache.stats().await;

        vec![
            format!("Entries: {}", stats.total_entries),
            format!("Hits: {}", stats.hits),
            format!("Misses: {}", stats.misses),
            format!("Hit rate: {:.1}%", stats.hit_rate() * 100.0),
            format!("Reaped: {}", stats.reaped),
            format!(
                "TTL: {}ms (swept every {}ms)",
                cache.ttl().as_millis(),
                cache.reap_interval().as_millis()
            ),
        ]
    }
}

/// Formats one item of a printed list.
fn bullet(item: &str) -> String {
    format!("  - {}", item)
}

fn single_arg<'a>(command: Command, args: &'a [String], placeholder: &str) -> Result<&'a str> {
    match args {
        [arg] => Ok(arg.as_str()),
        _ => Err(PokedexError::Usage(format!(
            "{} needs exactly one argument: {}",
            command.name(),
            placeholder
        ))),
    }
}
