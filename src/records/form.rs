use crate::errors::FormError;
use schema::{BaseStats, LocalizedNames, NewPokemon, PokemonRecord, PokemonType, StatKind, TypeTag, MAX_STAT};

/// Most types a record can be given through a form.
pub const MAX_FORM_TYPES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    French,
    Japanese,
    Chinese,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::English, Locale::French, Locale::Japanese, Locale::Chinese];

    pub fn label(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::French => "French",
            Locale::Japanese => "Japanese",
            Locale::Chinese => "Chinese",
        }
    }
}

/// Parse a stat typed by the user. Leading digits are read (with an optional
/// sign), anything unreadable is 0 and the result is clamped to `0..=255`.
pub fn parse_stat(raw: &str) -> u8 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if negative || leading.is_empty() {
        return 0;
    }
    // Anything too long for u32 is far above the cap anyway.
    leading
        .parse::<u32>()
        .map(|v| v.min(MAX_STAT as u32) as u8)
        .unwrap_or(MAX_STAT)
}

/// Editable copy of a record, shared by the create and edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonForm {
    english: String,
    french: String,
    japanese: String,
    chinese: String,
    types: Vec<TypeTag>,
    stats: BaseStats,
    image: String,
}

impl PokemonForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: &PokemonRecord) -> Self {
        Self {
            english: record.name.english.clone(),
            french: record.name.french.clone().unwrap_or_default(),
            japanese: record.name.japanese.clone().unwrap_or_default(),
            chinese: record.name.chinese.clone().unwrap_or_default(),
            types: record.types.clone(),
            stats: record.base.clone(),
            image: record.image.clone(),
        }
    }

    pub fn name(&self, locale: Locale) -> &str {
        match locale {
            Locale::English => &self.english,
            Locale::French => &self.french,
            Locale::Japanese => &self.japanese,
            Locale::Chinese => &self.chinese,
        }
    }

    pub fn set_name(&mut self, locale: Locale, value: &str) {
        let slot = match locale {
            Locale::English => &mut self.english,
            Locale::French => &mut self.french,
            Locale::Japanese => &mut self.japanese,
            Locale::Chinese => &mut self.chinese,
        };
        *slot = value.to_string();
    }

    pub fn types(&self) -> &[TypeTag] {
        &self.types
    }

    /// Select or deselect a type. Selecting a third type is refused.
    pub fn toggle_type(&mut self, pokemon_type: PokemonType) -> Result<(), FormError> {
        let tag = TypeTag::Known(pokemon_type);
        if let Some(index) = self.types.iter().position(|t| *t == tag) {
            self.types.remove(index);
            return Ok(());
        }
        if self.types.len() >= MAX_FORM_TYPES {
            return Err(FormError::TooManyTypes { max: MAX_FORM_TYPES });
        }
        self.types.push(tag);
        Ok(())
    }

    pub fn clear_types(&mut self) {
        self.types.clear();
    }

    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    /// Store a stat from raw text, see [`parse_stat`]. Returns the stored value.
    pub fn set_stat(&mut self, kind: StatKind, raw: &str) -> u8 {
        let value = parse_stat(raw);
        self.stats.set(kind, value);
        value
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn set_image(&mut self, url: &str) {
        self.image = url.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.english.trim().is_empty() {
            return Err(FormError::MissingEnglishName);
        }
        if self.types.is_empty() {
            return Err(FormError::MissingType);
        }
        Ok(())
    }

    fn names(&self) -> LocalizedNames {
        let optional = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        LocalizedNames {
            english: self.english.trim().to_string(),
            french: optional(&self.french),
            japanese: optional(&self.japanese),
            chinese: optional(&self.chinese),
        }
    }

    /// Creation payload built from the current fields.
    pub fn to_new(&self) -> NewPokemon {
        NewPokemon {
            name: self.names(),
            types: self.types.clone(),
            base: self.stats.clone(),
            image: self.image.clone(),
        }
    }

    /// `record` with every editable field replaced by the form's values.
    pub fn apply_to(&self, record: &PokemonRecord) -> PokemonRecord {
        PokemonRecord::from_new(record.id, self.to_new())
    }
}
