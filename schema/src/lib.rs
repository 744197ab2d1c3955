// Pokedex Schema - Shared type definitions
// This crate contains the wire data model exchanged with the Pokedex REST API:
// records, localized names, base stats and the closed set of type tags.

// Re-export the main types
pub use pokemon_data::*;
pub use pokemon_types::*;

pub mod pokemon_data;
pub mod pokemon_types;
