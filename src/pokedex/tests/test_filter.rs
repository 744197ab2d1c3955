#[cfg(test)]
mod tests {
    use crate::pokedex::filter::{ToggleOutcome, TypeFilter};
    use crate::test_support::TestRecordBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{PokemonRecord, PokemonType};
    use PokemonType::*;

    fn dataset() -> Vec<PokemonRecord> {
        vec![
            TestRecordBuilder::new(1, "Bulbasaur").with_types(&[Grass, Poison]).build(),
            TestRecordBuilder::new(4, "Charmander").with_types(&[Fire]).build(),
            TestRecordBuilder::new(6, "Charizard").with_types(&[Fire, Flying]).build(),
            TestRecordBuilder::new(16, "Pidgey").with_types(&[Normal, Flying]).build(),
            TestRecordBuilder::new(43, "Oddish").with_types(&[Grass, Poison]).build(),
        ]
    }

    fn filter_of(types: &[PokemonType]) -> TypeFilter {
        let mut filter = TypeFilter::new();
        for t in types {
            filter.toggle(*t);
        }
        filter
    }

    fn ids(records: Vec<&PokemonRecord>) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_inactive_filter_passes_everything() {
        let data = dataset();
        assert_eq!(ids(TypeFilter::new().apply(&data)), vec![1, 4, 6, 16, 43]);
    }

    #[test]
    fn test_two_types_use_and_semantics() {
        let data = dataset();
        assert_eq!(ids(filter_of(&[Fire]).apply(&data)), vec![4, 6]);
        assert_eq!(ids(filter_of(&[Fire, Flying]).apply(&data)), vec![6]);
        assert!(filter_of(&[Fire, Poison]).apply(&data).is_empty());
    }

    #[test]
    fn test_third_type_is_rejected_and_deselect_works() {
        let mut filter = filter_of(&[Fire, Flying]);

        assert_eq!(filter.toggle(Water), ToggleOutcome::Rejected);
        assert_eq!(filter.selected(), &[Fire, Flying]);

        assert_eq!(filter.toggle(Fire), ToggleOutcome::Deselected);
        assert_eq!(filter.selected(), &[Flying]);
        assert_eq!(filter.toggle(Water), ToggleOutcome::Selected);
        assert_eq!(filter.selected(), &[Flying, Water]);
    }

    #[test]
    fn test_unknown_tags_never_match_a_known_type() {
        let data = vec![TestRecordBuilder::new(999, "Oddity")
            .with_tags(&["Shadow", "fire"])
            .build()];
        assert_eq!(ids(filter_of(&[Fire]).apply(&data)), vec![999]);
        assert!(filter_of(&[Dark]).apply(&data).is_empty());
    }

    #[rstest]
    #[case::nothing_selected(&[], Water, false)]
    #[case::combinable(&[Fire], Flying, false)]
    #[case::not_combinable(&[Fire], Poison, true)]
    #[case::absent_from_dataset(&[Fire], Dragon, true)]
    #[case::selected_is_never_disabled(&[Fire], Fire, false)]
    #[case::two_selected(&[Grass, Poison], Fire, true)]
    #[case::two_selected_member(&[Grass, Poison], Poison, false)]
    fn test_is_disabled(
        #[case] selected: &[PokemonType],
        #[case] candidate: PokemonType,
        #[case] expected: bool,
    ) {
        let data = dataset();
        assert_eq!(filter_of(selected).is_disabled(candidate, &data), expected);
    }
}
