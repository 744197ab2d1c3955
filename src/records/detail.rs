//! Detail screen of a single record, with in-place editing and deletion.

use crate::api::PokedexApi;
use crate::errors::{FormError, PokedexResult};
use crate::records::form::PokemonForm;
use schema::PokemonRecord;
use tracing::{info, warn};

/// Where the front-end should go after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    ToList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailMode {
    Viewing,
    Editing(PokemonForm),
    ConfirmingDelete,
}

/// Result of opening a record: either a usable view or an error screen with
/// nothing else to do on it.
#[derive(Debug, Clone)]
pub enum DetailScreen {
    Loaded(DetailView),
    Failed { id: u32, message: String },
}

impl DetailScreen {
    pub async fn open<A: PokedexApi>(api: &A, id: u32) -> Self {
        match api.get(id).await {
            Ok(record) => DetailScreen::Loaded(DetailView::new(record)),
            Err(err) => {
                warn!(id, error = %err, "could not load record");
                DetailScreen::Failed {
                    id,
                    message: err.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    record: PokemonRecord,
    mode: DetailMode,
    message: Option<String>,
}

impl DetailView {
    pub fn new(record: PokemonRecord) -> Self {
        Self {
            record,
            mode: DetailMode::Viewing,
            message: None,
        }
    }

    pub fn record(&self) -> &PokemonRecord {
        &self.record
    }

    pub fn mode(&self) -> &DetailMode {
        &self.mode
    }

    /// Outcome of the last save or delete, successful or not.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn begin_edit(&mut self) {
        self.mode = DetailMode::Editing(PokemonForm::from_record(&self.record));
        self.message = None;
    }

    pub fn draft_mut(&mut self) -> Option<&mut PokemonForm> {
        match &mut self.mode {
            DetailMode::Editing(form) => Some(form),
            _ => None,
        }
    }

    /// Throw the draft away; the displayed record is unchanged.
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, DetailMode::Editing(_)) {
            self.mode = DetailMode::Viewing;
        }
    }

    /// Send the whole edited record. The server's answer replaces the displayed
    /// record; on failure the draft stays open with the error message.
    pub async fn save<A: PokedexApi>(&mut self, api: &A) -> PokedexResult<()> {
        let DetailMode::Editing(form) = &self.mode else {
            return Err(FormError::NotEditing.into());
        };
        if let Err(err) = form.validate() {
            self.message = Some(err.to_string());
            return Err(err.into());
        }
        let updated = form.apply_to(&self.record);

        match api.update(&updated).await {
            Ok(saved) => {
                info!(id = saved.id, "pokemon updated");
                self.record = saved;
                self.mode = DetailMode::Viewing;
                self.message = Some("Pokemon updated".to_string());
                Ok(())
            }
            Err(err) => {
                warn!(id = self.record.id, error = %err, "update failed");
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn request_delete(&mut self) {
        if self.mode == DetailMode::Viewing {
            self.mode = DetailMode::ConfirmingDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.mode == DetailMode::ConfirmingDelete {
            self.mode = DetailMode::Viewing;
        }
    }

    /// Delete the record for good. Success sends the user back to the list.
    pub async fn confirm_delete<A: PokedexApi>(&mut self, api: &A) -> PokedexResult<Navigation> {
        if self.mode != DetailMode::ConfirmingDelete {
            return Err(FormError::NotConfirming.into());
        }
        self.mode = DetailMode::Viewing;

        match api.delete(self.record.id).await {
            Ok(()) => {
                info!(id = self.record.id, "pokemon deleted");
                self.message = Some(format!("{} deleted", self.record.name.english));
                Ok(Navigation::ToList)
            }
            Err(err) => {
                warn!(id = self.record.id, error = %err, "delete failed");
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }
}
