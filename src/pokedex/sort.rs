use schema::{PokemonRecord, StatKind};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Hp,
        SortKey::Attack,
        SortKey::Defense,
        SortKey::SpecialAttack,
        SortKey::SpecialDefense,
        SortKey::Speed,
    ];

    /// The base stat this key sorts by, if it is a stat key.
    pub fn stat(self) -> Option<StatKind> {
        match self {
            SortKey::Id | SortKey::Name => None,
            SortKey::Hp => Some(StatKind::Hp),
            SortKey::Attack => Some(StatKind::Attack),
            SortKey::Defense => Some(StatKind::Defense),
            SortKey::SpecialAttack => Some(StatKind::SpecialAttack),
            SortKey::SpecialDefense => Some(StatKind::SpecialDefense),
            SortKey::Speed => Some(StatKind::Speed),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Hp => "hp",
            SortKey::Attack => "attack",
            SortKey::Defense => "defense",
            SortKey::SpecialAttack => "sp-attack",
            SortKey::SpecialDefense => "sp-defense",
            SortKey::Speed => "speed",
        }
    }

    fn compare(self, a: &PokemonRecord, b: &PokemonRecord) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => compare_names(&a.name.english, &b.name.english),
            stat_key => match stat_key.stat() {
                Some(stat) => a.base.get(stat).cmp(&b.base.get(stat)),
                None => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> char {
        match self {
            SortOrder::Asc => '↑',
            SortOrder::Desc => '↓',
        }
    }
}

/// Return the records ordered by `key`. The sort is stable in both
/// directions: descending reverses the comparison, not the output, so
/// records comparing equal keep their input order.
pub fn sort_records<'a, I>(records: I, key: SortKey, order: SortOrder) -> Vec<&'a PokemonRecord>
where
    I: IntoIterator<Item = &'a PokemonRecord>,
{
    let mut sorted: Vec<&PokemonRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| {
        let ordering = key.compare(a, b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Natural-language name comparison: letters are compared with case and
/// accents ignored, then unaccented before accented, then lowercase before
/// uppercase. The exact text only breaks what is left.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(fold_char);
    let folded_b = b.chars().flat_map(fold_char);
    folded_a
        .cmp(folded_b)
        .then_with(|| a.chars().map(is_accented).cmp(b.chars().map(is_accented)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn base_letter(c: char) -> char {
    match c {
        'À'..='Å' | 'à'..='å' => 'a',
        'Ç' | 'ç' => 'c',
        'È'..='Ë' | 'è'..='ë' => 'e',
        'Ì'..='Ï' | 'ì'..='ï' => 'i',
        'Ñ' | 'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' | 'ù'..='ü' => 'u',
        'Ý' | 'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn is_accented(c: char) -> bool {
    base_letter(c) != c
}

fn fold_char(c: char) -> std::char::ToLowercase {
    base_letter(c).to_lowercase()
}
