//! Team builder: a roster of up to six Pokemon and an advisor that proposes
//! candidates bringing types the roster does not cover yet.

use rand::seq::SliceRandom;
use rand::Rng;
use schema::{PokemonRecord, PokemonType, TypeTag, KNOWN_TYPE_COUNT};
use std::collections::HashSet;
use tracing::debug;

pub const MAX_TEAM_SIZE: usize = 6;
pub const SUGGESTION_LIMIT: usize = 12;
pub const SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    TeamFull,
    AlreadyInTeam,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeCoverage {
    pub covered: usize,
    pub total: usize,
}

impl TypeCoverage {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.covered as f32 / self.total as f32).min(1.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    members: Vec<PokemonRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[PokemonRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    pub fn contains(&self, id: u32) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Append a member. Adding to a full roster or adding an id that is
    /// already present changes nothing.
    pub fn add(&mut self, record: PokemonRecord) -> AddOutcome {
        if self.is_full() {
            return AddOutcome::TeamFull;
        }
        if self.contains(record.id) {
            return AddOutcome::AlreadyInTeam;
        }
        debug!(id = record.id, "added to team");
        self.members.push(record);
        AddOutcome::Added
    }

    pub fn remove(&mut self, id: u32) -> Option<PokemonRecord> {
        let index = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(index))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Every type tag present on at least one member.
    pub fn covered_types(&self) -> HashSet<TypeTag> {
        self.members
            .iter()
            .flat_map(|m| m.types.iter().cloned())
            .collect()
    }

    pub fn coverage(&self) -> TypeCoverage {
        let covered = self
            .covered_types()
            .iter()
            .filter(|tag| tag.known().is_some())
            .count();
        TypeCoverage {
            covered: covered.min(KNOWN_TYPE_COUNT),
            total: KNOWN_TYPE_COUNT,
        }
    }

    /// Known types nobody on the roster has, in display order.
    pub fn missing_types(&self) -> Vec<PokemonType> {
        let covered = self.covered_types();
        PokemonType::all()
            .filter(|t| !covered.contains(&TypeTag::Known(*t)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion<'a> {
    pub record: &'a PokemonRecord,
    /// How many of the record's tags the roster does not cover.
    pub new_types: usize,
}

/// Propose up to [`SUGGESTION_LIMIT`] candidates from `pool` that widen the
/// roster's type coverage, best first. Candidates with the same score come out
/// in random order, so calling again can return a different selection.
pub fn suggest<'a, R: Rng>(
    roster: &Roster,
    pool: &'a [PokemonRecord],
    rng: &mut R,
) -> Vec<Suggestion<'a>> {
    if roster.is_full() {
        return Vec::new();
    }

    let covered = roster.covered_types();
    let mut candidates: Vec<Suggestion<'a>> = pool
        .iter()
        .filter(|record| !roster.contains(record.id))
        .map(|record| Suggestion {
            record,
            new_types: record.types.iter().filter(|t| !covered.contains(t)).count(),
        })
        .filter(|s| s.new_types > 0)
        .collect();

    // Shuffle first; the stable sort then keeps ties in shuffled order.
    candidates.shuffle(rng);
    candidates.sort_by(|a, b| b.new_types.cmp(&a.new_types));
    candidates.truncate(SUGGESTION_LIMIT);

    debug!(count = candidates.len(), covered = covered.len(), "suggestions computed");
    candidates
}

/// Case-insensitive substring search over every localized name, skipping
/// roster members.
pub fn search<'a>(roster: &Roster, pool: &'a [PokemonRecord], query: &str) -> Vec<&'a PokemonRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    pool.iter()
        .filter(|record| !roster.contains(record.id))
        .filter(|record| {
            record
                .name
                .all()
                .any(|name| name.to_lowercase().contains(&needle))
        })
        .take(SEARCH_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRecordBuilder;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use PokemonType::*;

    fn mon(id: u32, types: &[PokemonType]) -> PokemonRecord {
        TestRecordBuilder::new(id, &format!("Mon{id}"))
            .with_types(types)
            .build()
    }

    #[test]
    fn test_roster_caps_at_six() {
        let mut roster = Roster::new();
        for id in 1..=6 {
            assert_eq!(roster.add(mon(id, &[Normal])), AddOutcome::Added);
        }

        assert_eq!(roster.add(mon(7, &[Fire])), AddOutcome::TeamFull);
        assert_eq!(roster.len(), 6);
        assert!(!roster.contains(7));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut roster = Roster::new();
        roster.add(mon(25, &[Electric]));

        assert_eq!(roster.add(mon(25, &[Electric])), AddOutcome::AlreadyInTeam);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut roster = Roster::new();
        roster.add(mon(1, &[Grass, Poison]));
        roster.add(mon(4, &[Fire]));

        assert_eq!(roster.remove(1).map(|r| r.id), Some(1));
        assert_eq!(roster.remove(1), None);
        assert_eq!(roster.members().len(), 1);

        roster.clear();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_empty_roster_has_zero_coverage() {
        let coverage = Roster::new().coverage();
        assert_eq!(coverage, TypeCoverage { covered: 0, total: 18 });
        assert_eq!(coverage.fraction(), 0.0);
    }

    #[test]
    fn test_full_coverage_is_clamped_to_one() {
        let all: Vec<PokemonType> = PokemonType::all().collect();
        let mut roster = Roster::new();
        for (i, pair) in all.chunks(3).enumerate() {
            // Three tags per record to cover all eighteen with six members,
            // plus a repeated tag to make sure repeats do not count twice.
            let mut tags: Vec<&str> = pair.iter().map(|t| t.as_ref()).collect();
            tags.push("Grass");
            roster.add(
                TestRecordBuilder::new(i as u32 + 1, "Multi")
                    .with_tags(&tags)
                    .build(),
            );
        }

        let coverage = roster.coverage();
        assert_eq!(coverage.covered, 18);
        assert_eq!(coverage.fraction(), 1.0);
        assert!(roster.missing_types().is_empty());
    }

    #[test]
    fn test_unknown_tags_do_not_count_towards_coverage() {
        let mut roster = Roster::new();
        roster.add(
            TestRecordBuilder::new(1, "Odd")
                .with_tags(&["Fire", "Shadow"])
                .build(),
        );
        assert_eq!(roster.coverage().covered, 1);
        assert_eq!(roster.covered_types().len(), 2);
    }

    #[test]
    fn test_suggestions_prefer_records_with_more_new_types() {
        let mut roster = Roster::new();
        roster.add(mon(1, &[Fire]));
        let pool = vec![
            mon(1, &[Fire]),
            mon(2, &[Fire]),
            mon(3, &[Water]),
            mon(4, &[Grass, Poison]),
            mon(5, &[Fire, Flying]),
            mon(6, &[Rock, Ground]),
        ];
        let mut rng = StdRng::seed_from_u64(11);

        let suggestions = suggest(&roster, &pool, &mut rng);

        let scores: Vec<usize> = suggestions.iter().map(|s| s.new_types).collect();
        assert_eq!(scores, vec![2, 2, 1, 1]);
        let top: HashSet<u32> = suggestions[..2].iter().map(|s| s.record.id).collect();
        assert_eq!(top, HashSet::from([4, 6]));
        assert!(suggestions.iter().all(|s| s.record.id != 1 && s.record.id != 2));
    }

    #[test]
    fn test_suggestions_are_capped_and_reshuffled() {
        let roster = Roster::new();
        let pool: Vec<PokemonRecord> = (1..=40).map(|id| mon(id, &[Water])).collect();
        let mut rng = StdRng::seed_from_u64(99);

        let first: Vec<u32> = suggest(&roster, &pool, &mut rng)
            .iter()
            .map(|s| s.record.id)
            .collect();
        let second: Vec<u32> = suggest(&roster, &pool, &mut rng)
            .iter()
            .map(|s| s.record.id)
            .collect();

        assert_eq!(first.len(), SUGGESTION_LIMIT);
        assert_eq!(second.len(), SUGGESTION_LIMIT);
        assert_ne!(first, second);
    }

    #[test]
    fn test_full_roster_gets_no_suggestions() {
        let mut roster = Roster::new();
        for id in 1..=6 {
            roster.add(mon(id, &[Normal]));
        }
        let pool = vec![mon(10, &[Dragon])];
        let mut rng = StdRng::seed_from_u64(0);

        assert!(suggest(&roster, &pool, &mut rng).is_empty());
    }

    #[test]
    fn test_search_matches_any_locale_and_skips_team() {
        let mut roster = Roster::new();
        let pikachu = TestRecordBuilder::new(25, "Pikachu").build();
        roster.add(pikachu.clone());
        let pool = vec![
            pikachu,
            TestRecordBuilder::new(26, "Raichu").build(),
            TestRecordBuilder::new(35, "Clefairy")
                .with_french("Melofee")
                .build(),
        ];

        let ids = |query: &str| -> Vec<u32> {
            search(&roster, &pool, query).iter().map(|r| r.id).collect()
        };

        assert_eq!(ids("CHU"), vec![26]);
        assert_eq!(ids("melo"), vec![35]);
        assert!(ids("  ").is_empty());
    }
}
