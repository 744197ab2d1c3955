use schema::{PokemonRecord, PokemonType};
use std::collections::HashSet;

/// At most this many types can be combined in the filter.
pub const MAX_SELECTED_TYPES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// The filter already holds [`MAX_SELECTED_TYPES`] types, or the list
    /// rejected a type no record pairs with the current selection.
    Rejected,
}

/// Type filter with AND semantics: a record passes when it carries every
/// selected type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    selected: Vec<PokemonType>,
}

impl TypeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[PokemonType] {
        &self.selected
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_selected(&self, pokemon_type: PokemonType) -> bool {
        self.selected.contains(&pokemon_type)
    }

    pub fn toggle(&mut self, pokemon_type: PokemonType) -> ToggleOutcome {
        if let Some(index) = self.selected.iter().position(|t| *t == pokemon_type) {
            self.selected.remove(index);
            return ToggleOutcome::Deselected;
        }
        if self.selected.len() >= MAX_SELECTED_TYPES {
            return ToggleOutcome::Rejected;
        }
        self.selected.push(pokemon_type);
        ToggleOutcome::Selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn matches(&self, record: &PokemonRecord) -> bool {
        self.selected.iter().all(|t| record.has_type(*t))
    }

    /// Records passing the filter, in their original order. An inactive filter
    /// passes everything.
    pub fn apply<'a>(&self, records: &'a [PokemonRecord]) -> Vec<&'a PokemonRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Whether choosing `pokemon_type` next would be pointless or impossible.
    ///
    /// Nothing is disabled while the filter is empty and a selected type is
    /// never disabled. With one type selected, a type stays available only if
    /// some record in `dataset` has both; with two selected, every other type
    /// is disabled.
    pub fn is_disabled(&self, pokemon_type: PokemonType, dataset: &[PokemonRecord]) -> bool {
        if self.is_selected(pokemon_type) {
            return false;
        }
        match self.selected.as_slice() {
            [] => false,
            [only] => !Self::partners_of(*only, dataset).contains(&pokemon_type),
            _ => true,
        }
    }

    /// Types appearing alongside `pokemon_type` on at least one record,
    /// including `pokemon_type` itself when any record has it.
    fn partners_of(pokemon_type: PokemonType, dataset: &[PokemonRecord]) -> HashSet<PokemonType> {
        dataset
            .iter()
            .filter(|r| r.has_type(pokemon_type))
            .flat_map(|r| r.types.iter().filter_map(|tag| tag.known()))
            .collect()
    }
}
