//! Create, view, edit and delete single records.

pub mod create;
pub mod detail;
pub mod form;

pub use create::{CreateFlow, CreateStep};
pub use detail::{DetailMode, DetailScreen, DetailView, Navigation};
pub use form::{parse_stat, Locale, PokemonForm, MAX_FORM_TYPES};
