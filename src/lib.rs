// In: src/lib.rs

//! Pokedex Client
//!
//! Terminal client for a Pokemon REST API: paginated browsing with search,
//! type filters, sorting and favorites, record creation and editing, a timed
//! "Who's that Pokemon?" quiz and a team builder with a type-coverage advisor.

// --- MODULE DECLARATIONS ---
pub mod api;
pub mod config;
pub mod display;
pub mod errors;
pub mod logging;
pub mod pokedex;
pub mod quiz;
pub mod records;
pub mod team;
pub mod timers;

#[cfg(test)]
mod test_support;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, LocalizedNames, NewPokemon, PokemonPage, PokemonRecord, PokemonType, StatKind,
    TypeTag,
};

// --- From this crate's modules (`src/`) ---

// API access and configuration.
pub use api::{load_all_pages, HttpPokedexClient, PokedexApi};
pub use config::ClientConfig;

// Screens and state machines.
pub use pokedex::{Favorites, JsonFileStore, ListView, SearchDebouncer, SortKey, SortOrder};
pub use quiz::{QuizEngine, QuizEvent, QuizPhase};
pub use records::{CreateFlow, DetailScreen, DetailView, PokemonForm};
pub use team::Roster;

// Crate-specific error and result types.
pub use errors::{FormError, PokedexError, PokedexResult};
