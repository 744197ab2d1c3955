use crate::{PokemonType, TypeTag};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Upper bound of any base stat.
pub const MAX_STAT: u8 = u8::MAX;

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|name| !name.trim().is_empty()))
}

// The API does not enforce the stat range, so out-of-range values are clamped
// on the way in rather than rejected.
fn clamped_stat<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(value.clamp(0, MAX_STAT as i64) as u8)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNames {
    pub english: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub japanese: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,
}

impl LocalizedNames {
    pub fn english(name: impl Into<String>) -> Self {
        Self {
            english: name.into(),
            ..Self::default()
        }
    }

    /// Every present name, English first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.english.as_str()).chain(
            [&self.french, &self.japanese, &self.chinese]
                .into_iter()
                .filter_map(|name| name.as_deref()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub fn all() -> impl Iterator<Item = StatKind> {
        StatKind::iter()
    }

    /// Field name used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "SpecialAttack",
            StatKind::SpecialDefense => "SpecialDefense",
            StatKind::Speed => "Speed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "Sp. Atk",
            StatKind::SpecialDefense => "Sp. Def",
            StatKind::Speed => "Speed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(rename = "HP", default, deserialize_with = "clamped_stat")]
    pub hp: u8,
    #[serde(rename = "Attack", default, deserialize_with = "clamped_stat")]
    pub attack: u8,
    #[serde(rename = "Defense", default, deserialize_with = "clamped_stat")]
    pub defense: u8,
    #[serde(rename = "SpecialAttack", default, deserialize_with = "clamped_stat")]
    pub sp_attack: u8,
    #[serde(rename = "SpecialDefense", default, deserialize_with = "clamped_stat")]
    pub sp_defense: u8,
    #[serde(rename = "Speed", default, deserialize_with = "clamped_stat")]
    pub speed: u8,
}

impl BaseStats {
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpecialAttack => self.sp_attack,
            StatKind::SpecialDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: u8) {
        let slot = match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::SpecialAttack => &mut self.sp_attack,
            StatKind::SpecialDefense => &mut self.sp_defense,
            StatKind::Speed => &mut self.speed,
        };
        *slot = value;
    }

    pub fn total(&self) -> u16 {
        StatKind::all().map(|kind| self.get(kind) as u16).sum()
    }
}

/// A single Pokemon as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: LocalizedNames,
    #[serde(rename = "type", default)]
    pub types: Vec<TypeTag>,
    #[serde(default)]
    pub base: BaseStats,
    #[serde(default)]
    pub image: String,
}

impl PokemonRecord {
    pub fn primary_type(&self) -> Option<&TypeTag> {
        self.types.first()
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.iter().any(|tag| tag.known() == Some(pokemon_type))
    }

    pub fn has_tag(&self, tag: &TypeTag) -> bool {
        self.types.contains(tag)
    }

    /// Build a record from a creation payload and the id the server assigned.
    pub fn from_new(id: u32, new: NewPokemon) -> Self {
        Self {
            id,
            name: new.name,
            types: new.types,
            base: new.base,
            image: new.image,
        }
    }
}

/// A record without its id, as sent to `POST /api/pokemons`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPokemon {
    pub name: LocalizedNames,
    #[serde(rename = "type", default)]
    pub types: Vec<TypeTag>,
    #[serde(default)]
    pub base: BaseStats,
    #[serde(default)]
    pub image: String,
}

impl From<PokemonRecord> for NewPokemon {
    fn from(record: PokemonRecord) -> Self {
        Self {
            name: record.name,
            types: record.types,
            base: record.base,
            image: record.image,
        }
    }
}

/// One page of the paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonPage {
    pub data: Vec<PokemonRecord>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": {"english": "Bulbasaur", "french": "Bulbizarre", "japanese": "フシギダネ", "chinese": ""},
        "type": ["Grass", "Poison"],
        "base": {"HP": 45, "Attack": 49, "Defense": 49, "SpecialAttack": 65, "SpecialDefense": 65, "Speed": 45},
        "image": "https://img.example/001.png"
    }"#;

    #[test]
    fn test_record_parses_wire_format() {
        let record: PokemonRecord = serde_json::from_str(BULBASAUR).unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.name.french.as_deref(), Some("Bulbizarre"));
        assert_eq!(record.name.chinese, None);
        assert_eq!(record.primary_type(), Some(&TypeTag::Known(PokemonType::Grass)));
        assert!(record.has_type(PokemonType::Poison));
        assert_eq!(record.base.sp_attack, 65);
        assert_eq!(record.base.total(), 318);
    }

    #[test]
    fn test_all_names_skips_missing_locales() {
        let record: PokemonRecord = serde_json::from_str(BULBASAUR).unwrap();
        let names: Vec<&str> = record.name.all().collect();
        assert_eq!(names, vec!["Bulbasaur", "Bulbizarre", "フシギダネ"]);
    }

    #[test]
    fn test_out_of_range_stats_are_clamped() {
        let stats: BaseStats =
            serde_json::from_str(r#"{"HP": 300, "Attack": -4, "Speed": 80}"#).unwrap();
        assert_eq!(stats.hp, 255);
        assert_eq!(stats.attack, 0);
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.get(StatKind::Speed), 80);
    }

    #[test]
    fn test_page_envelope_uses_camel_case_total() {
        let page: PokemonPage = serde_json::from_str(r#"{"data": [], "totalPages": 7}"#).unwrap();
        assert_eq!(page.total_pages, 7);
    }

    #[test]
    fn test_new_pokemon_omits_id_and_missing_names() {
        let new = NewPokemon {
            name: LocalizedNames::english("Missingno"),
            types: vec![TypeTag::Known(PokemonType::Normal)],
            ..NewPokemon::default()
        };
        let json = serde_json::to_value(&new).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["name"], serde_json::json!({"english": "Missingno"}));
        assert_eq!(json["type"], serde_json::json!(["Normal"]));
        assert_eq!(json["base"]["SpecialDefense"], 0);
    }
}
