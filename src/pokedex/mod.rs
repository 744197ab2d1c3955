//! The Pokedex list: paging, search, type filtering, sorting and favorites.

pub mod favorites;
pub mod filter;
pub mod search;
pub mod sort;
pub mod view;

pub use favorites::{Favorites, FavoritesStore, JsonFileStore, FAVORITES_KEY};
pub use filter::{ToggleOutcome, TypeFilter, MAX_SELECTED_TYPES};
pub use search::{SearchDebouncer, SearchRequest};
pub use sort::{compare_names, sort_records, SortKey, SortOrder};
pub use view::{ListMode, ListView};

#[cfg(test)]
mod tests;
