use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use strum::{AsRefStr, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Color used for any tag outside the known set.
pub const DEFAULT_TYPE_COLOR: &str = "#888888";

/// The closed set of type tags the Pokedex knows how to display.
///
/// Variants are declared in the order the type filter grid presents them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    EnumCount,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PokemonType {
    Grass,
    Fire,
    Water,
    Bug,
    Normal,
    Poison,
    Electric,
    Ground,
    Fairy,
    Fighting,
    Psychic,
    Rock,
    Ghost,
    Ice,
    Dragon,
    Dark,
    Steel,
    Flying,
}

/// Number of known type tags (the denominator of team coverage).
pub const KNOWN_TYPE_COUNT: usize = PokemonType::COUNT;

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl PokemonType {
    /// Iterate over every known type in display order.
    pub fn all() -> impl Iterator<Item = PokemonType> {
        PokemonType::iter()
    }

    /// Display color as a `#RRGGBB` string.
    pub fn color(self) -> &'static str {
        use PokemonType::*;

        match self {
            Grass => "#78C850",
            Fire => "#F08030",
            Water => "#6890F0",
            Bug => "#A8B820",
            Normal => "#A8A878",
            Poison => "#A040A0",
            Electric => "#F8D030",
            Ground => "#E0C068",
            Fairy => "#EE99AC",
            Fighting => "#C03028",
            Psychic => "#F85888",
            Rock => "#B8A038",
            Ghost => "#705898",
            Ice => "#98D8D8",
            Dragon => "#7038F8",
            Dark => "#705848",
            Steel => "#B8B8D0",
            Flying => "#A890F0",
        }
    }

    /// Lowercase key, e.g. `"grass"`.
    pub fn key(self) -> String {
        self.as_ref().to_ascii_lowercase()
    }
}

/// A type tag as it appears on a record.
///
/// Tags from the known set parse to [`TypeTag::Known`]; anything else is kept
/// verbatim as [`TypeTag::Other`] so it can be shown and sent back to the API
/// unchanged. Equality, ordering and hashing are case-insensitive.
#[derive(Debug, Clone)]
pub enum TypeTag {
    Known(PokemonType),
    Other(String),
}

impl TypeTag {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<PokemonType>() {
            Ok(known) => TypeTag::Known(known),
            Err(_) => TypeTag::Other(trimmed.to_string()),
        }
    }

    pub fn known(&self) -> Option<PokemonType> {
        match self {
            TypeTag::Known(known) => Some(*known),
            TypeTag::Other(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeTag::Known(known) => known.as_ref(),
            TypeTag::Other(raw) => raw,
        }
    }

    pub fn color(&self) -> &'static str {
        self.known().map_or(DEFAULT_TYPE_COLOR, PokemonType::color)
    }

    fn folded(&self) -> String {
        self.name().to_lowercase()
    }
}

impl From<PokemonType> for TypeTag {
    fn from(known: PokemonType) -> Self {
        TypeTag::Known(known)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeTag::Known(a), TypeTag::Known(b)) => a == b,
            (TypeTag::Other(_), TypeTag::Other(_)) => self.folded() == other.folded(),
            _ => false,
        }
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TypeTag::Known(known) => {
                0u8.hash(state);
                known.hash(state);
            }
            TypeTag::Other(_) => {
                1u8.hash(state);
                self.folded().hash(state);
            }
        }
    }
}

impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TypeTag::Known(a), TypeTag::Known(b)) => a.cmp(b),
            (TypeTag::Known(_), TypeTag::Other(_)) => Ordering::Less,
            (TypeTag::Other(_), TypeTag::Known(_)) => Ordering::Greater,
            (TypeTag::Other(_), TypeTag::Other(_)) => self.folded().cmp(&other.folded()),
        }
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TypeTag::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_known_types_parse_case_insensitively() {
        assert_eq!(TypeTag::parse("grass"), TypeTag::Known(PokemonType::Grass));
        assert_eq!(TypeTag::parse(" FIRE "), TypeTag::Known(PokemonType::Fire));
        assert_eq!(TypeTag::parse("Steel").color(), "#B8B8D0");
    }

    #[test]
    fn test_unknown_tag_degrades_to_default_color() {
        let tag = TypeTag::parse("Shadow");
        assert_eq!(tag.known(), None);
        assert_eq!(tag.color(), DEFAULT_TYPE_COLOR);
        assert_eq!(tag.to_string(), "Shadow");
        assert_eq!(tag, TypeTag::parse("shadow"));
    }

    #[test]
    fn test_hash_matches_case_insensitive_equality() {
        let tags: HashSet<TypeTag> = ["Shadow", "SHADOW", "Water", "water"]
            .iter()
            .map(|raw| TypeTag::parse(raw))
            .collect();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_exactly_eighteen_known_types() {
        assert_eq!(KNOWN_TYPE_COUNT, 18);
        assert_eq!(PokemonType::all().count(), 18);
        assert_eq!(PokemonType::all().next(), Some(PokemonType::Grass));
    }

    #[test]
    fn test_tags_serialize_as_plain_strings() {
        let tags: Vec<TypeTag> = serde_json::from_str(r#"["grass","Mystery"]"#).unwrap();
        assert_eq!(tags[0], TypeTag::Known(PokemonType::Grass));
        assert_eq!(
            serde_json::to_string(&tags).unwrap(),
            r#"["Grass","Mystery"]"#
        );
    }
}
