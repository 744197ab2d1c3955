//! Favorite records, kept as an ordered list of ids and persisted after
//! every change.

use crate::errors::{PokedexError, PokedexResult};
use schema::PokemonRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key of the favorites list; the file store appends `.json`.
pub const FAVORITES_KEY: &str = "pokemonFavorites";

pub trait FavoritesStore {
    fn load(&self) -> PokedexResult<Vec<u32>>;
    fn save(&self, ids: &[u32]) -> PokedexResult<()>;
}

/// Favorites stored as a JSON array of ids in the data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", FAVORITES_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFileStore {
    /// A missing file is an empty list.
    fn load(&self) -> PokedexResult<Vec<u32>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            PokedexError::Storage(format!("{} is not a list of ids: {}", self.path.display(), e))
        })
    }

    fn save(&self, ids: &[u32]) -> PokedexResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json =
            serde_json::to_string(ids).map_err(|e| PokedexError::Storage(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct Favorites<S: FavoritesStore> {
    ids: Vec<u32>,
    store: S,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Read the stored list once. An unreadable store starts an empty list
    /// rather than failing the caller.
    pub fn open(store: S) -> Self {
        let ids = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not read favorites, starting with none");
            Vec::new()
        });
        debug!(count = ids.len(), "favorites loaded");
        Self { ids, store }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Add or remove `id` and persist the list. Returns whether `id` is a
    /// favorite afterwards. The in-memory list changes even when saving fails.
    pub fn toggle(&mut self, id: u32) -> PokedexResult<bool> {
        let now_favorite = match self.ids.iter().position(|f| *f == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        };
        self.store.save(&self.ids)?;
        Ok(now_favorite)
    }

    /// Favorites found among `known`, in favorite order. Ids with no matching
    /// record are left out.
    pub fn resolve<'a>(&self, known: &'a [PokemonRecord]) -> Vec<&'a PokemonRecord> {
        resolve_favorites(&self.ids, known)
    }
}

pub fn resolve_favorites<'a>(ids: &[u32], known: &'a [PokemonRecord]) -> Vec<&'a PokemonRecord> {
    ids.iter()
        .filter_map(|id| known.iter().find(|r| r.id == *id))
        .collect()
}
