use crate::api::PokedexApi;
use crate::errors::{FormError, PokedexResult};
use crate::records::form::PokemonForm;
use schema::{NewPokemon, PokemonRecord};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStep {
    Editing,
    /// Validated, waiting for the user to confirm.
    Confirming,
    Created(PokemonRecord),
}

/// Create screen: fill the form, request submission, confirm.
#[derive(Debug, Clone)]
pub struct CreateFlow {
    form: PokemonForm,
    step: CreateStep,
    error: Option<String>,
}

impl Default for CreateFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateFlow {
    pub fn new() -> Self {
        Self {
            form: PokemonForm::new(),
            step: CreateStep::Editing,
            error: None,
        }
    }

    pub fn form(&self) -> &PokemonForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PokemonForm {
        &mut self.form
    }

    pub fn step(&self) -> &CreateStep {
        &self.step
    }

    /// Message of the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the form and move to the confirmation step.
    pub fn request_submit(&mut self) -> Result<(), FormError> {
        self.form.validate()?;
        self.error = None;
        self.step = CreateStep::Confirming;
        Ok(())
    }

    /// Back out of the confirmation step; the form keeps its values.
    pub fn cancel(&mut self) {
        if self.step == CreateStep::Confirming {
            self.step = CreateStep::Editing;
        }
    }

    /// The payload that confirming would send.
    pub fn payload(&self) -> Result<NewPokemon, FormError> {
        match self.step {
            CreateStep::Confirming => Ok(self.form.to_new()),
            _ => Err(FormError::NotConfirming),
        }
    }

    /// Send the confirmed payload. On failure the server's message is kept for
    /// display and the form reopens with its values intact.
    pub async fn confirm<A: PokedexApi>(&mut self, api: &A) -> PokedexResult<PokemonRecord> {
        let payload = self.payload()?;
        match api.create(&payload).await {
            Ok(created) => {
                info!(id = created.id, name = %created.name.english, "pokemon created");
                self.step = CreateStep::Created(created.clone());
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                self.error = Some(err.to_string());
                self.step = CreateStep::Editing;
                Err(err)
            }
        }
    }
}
