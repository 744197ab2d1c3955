//! State of the Pokedex list screen and the derivation of what it shows.

use crate::pokedex::favorites::resolve_favorites;
use crate::pokedex::filter::{ToggleOutcome, TypeFilter};
use crate::pokedex::sort::{sort_records, SortKey, SortOrder};
use schema::{PokemonPage, PokemonRecord, PokemonType};
use tracing::debug;

/// Which source the visible list is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Search results replace everything else.
    Search,
    FavoritesOnly,
    /// Type filter over the full dataset (or the page until it has loaded).
    Filtered,
    Paged,
}

#[derive(Debug, Clone)]
pub struct ListView {
    page_records: Vec<PokemonRecord>,
    current_page: u32,
    total_pages: u32,
    full_dataset: Vec<PokemonRecord>,
    query: String,
    search_results: Option<Vec<PokemonRecord>>,
    types: TypeFilter,
    sort_key: SortKey,
    sort_order: SortOrder,
    favorites_only: bool,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            page_records: Vec::new(),
            current_page: 1,
            total_pages: 0,
            full_dataset: Vec::new(),
            query: String::new(),
            search_results: None,
            types: TypeFilter::new(),
            sort_key: SortKey::Id,
            sort_order: SortOrder::Asc,
            favorites_only: false,
        }
    }

    // --- Loaded data ---

    /// Show page `number` of the listing.
    pub fn apply_page(&mut self, number: u32, page: PokemonPage) {
        debug!(page = number, count = page.data.len(), total_pages = page.total_pages, "page applied");
        self.current_page = number.max(1);
        self.page_records = page.data;
        self.total_pages = page.total_pages;
    }

    pub fn set_full_dataset(&mut self, records: Vec<PokemonRecord>) {
        self.full_dataset = records;
    }

    /// Whether the type filter is waiting for the full dataset.
    pub fn needs_full_dataset(&self) -> bool {
        self.types.is_active() && self.full_dataset.is_empty()
    }

    pub fn page_records(&self) -> &[PokemonRecord] {
        &self.page_records
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    // --- Search ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn is_searching(&self) -> bool {
        self.search_results.is_some()
    }

    pub fn search_results(&self) -> Option<&[PokemonRecord]> {
        self.search_results.as_deref()
    }

    pub fn show_search_results(&mut self, results: Vec<PokemonRecord>) {
        debug!(query = %self.query, count = results.len(), "search results shown");
        self.search_results = Some(results);
    }

    /// Leave search mode. A blank query also drops the type filters.
    pub fn clear_search(&mut self) {
        self.search_results = None;
        self.types.clear();
    }

    // --- Type filter ---

    pub fn type_filter(&self) -> &TypeFilter {
        &self.types
    }

    /// Toggle a type in the filter. A disabled type is rejected. Selecting a
    /// type, or removing the last selected one, sends the list back to page 1.
    ///
    /// The first selection drops the previously loaded full dataset, so the
    /// caller fetches it again (see [`ListView::needs_full_dataset`]).
    pub fn toggle_type(&mut self, pokemon_type: PokemonType) -> ToggleOutcome {
        if self.is_type_disabled(pokemon_type) {
            debug!(?pokemon_type, selected = ?self.types.selected(), "disabled type rejected");
            return ToggleOutcome::Rejected;
        }
        let was_active = self.types.is_active();
        let outcome = self.types.toggle(pokemon_type);
        match outcome {
            ToggleOutcome::Selected => {
                self.current_page = 1;
                if !was_active {
                    self.full_dataset.clear();
                }
            }
            ToggleOutcome::Deselected if !self.types.is_active() => self.current_page = 1,
            _ => {}
        }
        outcome
    }

    pub fn is_type_disabled(&self, pokemon_type: PokemonType) -> bool {
        self.types.is_disabled(pokemon_type, self.filter_source())
    }

    /// Full dataset once loaded, the current page until then.
    fn filter_source(&self) -> &[PokemonRecord] {
        if self.types.is_active() && !self.full_dataset.is_empty() {
            &self.full_dataset
        } else {
            &self.page_records
        }
    }

    // --- Sort ---

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn flip_sort_order(&mut self) {
        self.sort_order = self.sort_order.flipped();
    }

    // --- Favorites ---

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn toggle_favorites_only(&mut self) {
        self.favorites_only = !self.favorites_only;
    }

    // --- Pagination ---

    pub fn pagination_visible(&self) -> bool {
        !self.is_searching() && !self.favorites_only && !self.types.is_active()
    }

    /// Move to the next page. Returns whether the page changed, meaning the
    /// caller should fetch it.
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Drop the query, search results and type filters, and reset the sort
    /// and the page.
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.search_results = None;
        self.types.clear();
        self.sort_key = SortKey::Id;
        self.sort_order = SortOrder::Asc;
        self.current_page = 1;
    }

    // --- Derivation ---

    pub fn mode(&self) -> ListMode {
        if self.is_searching() {
            ListMode::Search
        } else if self.favorites_only {
            ListMode::FavoritesOnly
        } else if self.types.is_active() {
            ListMode::Filtered
        } else {
            ListMode::Paged
        }
    }

    /// Records to show, already sorted. `favorites` is the ordered favorite id
    /// list, consulted only in favorites-only mode.
    pub fn visible<'a>(&'a self, favorites: &[u32]) -> Vec<&'a PokemonRecord> {
        let selected: Vec<&PokemonRecord> = match self.mode() {
            ListMode::Search => self.search_results.iter().flatten().collect(),
            ListMode::FavoritesOnly => resolve_favorites(favorites, &self.page_records),
            ListMode::Filtered => self.types.apply(self.filter_source()),
            ListMode::Paged => self.page_records.iter().collect(),
        };
        sort_records(selected, self.sort_key, self.sort_order)
    }
}
