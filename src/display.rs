//! Plain-text rendering for the terminal front-end.
//!
//! Every function returns a `String` and has no side effects, so the binary
//! decides where output goes and tests can assert on exact text.

use crate::pokedex::{ListMode, ListView, SortKey, MAX_SELECTED_TYPES};
use crate::quiz::{QuizEngine, QuizEvent, QuizPhase};
use crate::records::{CreateFlow, CreateStep, DetailMode, DetailView, Locale, PokemonForm};
use crate::team::{Roster, Suggestion};
use schema::{BaseStats, PokemonRecord, PokemonType, StatKind, TypeTag, MAX_STAT};

const STAT_BAR_WIDTH: usize = 20;

/// `Fire/Flying`, or `???` for a record without types.
pub fn format_types(types: &[TypeTag]) -> String {
    if types.is_empty() {
        return "???".to_string();
    }
    types
        .iter()
        .map(|t| t.name().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// `Fire (#F08030)`
pub fn format_type_with_color(tag: &TypeTag) -> String {
    format!("{} ({})", tag.name(), tag.color())
}

fn stat_bar(value: u8) -> String {
    let filled = (value as usize * STAT_BAR_WIDTH).div_ceil(MAX_STAT as usize);
    format!("{}{}", "#".repeat(filled), ".".repeat(STAT_BAR_WIDTH - filled))
}

pub fn format_stats(stats: &BaseStats) -> String {
    let mut output = String::new();
    for kind in StatKind::all() {
        let value = stats.get(kind);
        output.push_str(&format!("  {:<8} {:>3} {}\n", kind.label(), value, stat_bar(value)));
    }
    output.push_str(&format!("  {:<8} {:>3}\n", "Total", stats.total()));
    output
}

/// One-line summary used in lists.
pub fn format_record_line(record: &PokemonRecord, favorite: bool) -> String {
    format!(
        "{} #{:03} {:<14} {}",
        if favorite { "❤️" } else { "  " },
        record.id,
        record.name.english,
        format_types(&record.types)
    )
}

/// Full card of a single record.
pub fn display_record(record: &PokemonRecord) -> String {
    let mut output = format!("--- #{:03} {} ---\n", record.id, record.name.english);
    let types: Vec<String> = record.types.iter().map(format_type_with_color).collect();
    output.push_str(&format!("Types: {}\n", types.join(", ")));

    let other_names = [
        ("FR", record.name.french.as_deref()),
        ("JA", record.name.japanese.as_deref()),
        ("ZH", record.name.chinese.as_deref()),
    ];
    for (label, name) in other_names {
        if let Some(name) = name {
            output.push_str(&format!("{}: {}\n", label, name));
        }
    }

    output.push_str("Stats:\n");
    output.push_str(&format_stats(&record.base));
    if !record.image.is_empty() {
        output.push_str(&format!("Image: {}\n", record.image));
    }
    output
}

fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Id => "Pokedex (ID)",
        SortKey::Name => "Name (A-Z)",
        SortKey::Hp => "HP",
        SortKey::Attack => "Attack",
        SortKey::Defense => "Defense",
        SortKey::SpecialAttack => "Sp. Atk",
        SortKey::SpecialDefense => "Sp. Def",
        SortKey::Speed => "Speed",
    }
}

/// The type filter header: what is selected, and which types can still be
/// picked.
pub fn display_type_filter(view: &ListView) -> String {
    let selected = view.type_filter().selected();
    let header = if selected.is_empty() {
        "Filter by types (max 2)".to_string()
    } else {
        let names: Vec<&str> = selected.iter().map(|t| t.as_ref()).collect();
        format!("Types: {}", names.join(" + "))
    };

    let grid: Vec<String> = PokemonType::all()
        .map(|t| {
            let key = t.key();
            if view.type_filter().is_selected(t) {
                format!("[{}]", key)
            } else if view.is_type_disabled(t) {
                format!("({})", key)
            } else {
                key
            }
        })
        .collect();
    format!("{}\n  {}\n", header, grid.join(" "))
}

/// Why the list refused to select `rejected`.
pub fn format_rejected_type(view: &ListView, rejected: PokemonType) -> String {
    match view.type_filter().selected() {
        [only] => format!("No Pokemon is both {} and {}.", only, rejected),
        _ => format!("At most {} types can be combined.", MAX_SELECTED_TYPES),
    }
}

/// The list screen: header, records in display order, pagination footer.
pub fn display_list(view: &ListView, favorites: &[u32]) -> String {
    let records = view.visible(favorites);
    let mut output = format!(
        "Pokedex | sort: {} {} | favorites: {}\n",
        sort_label(view.sort_key()),
        view.sort_order().arrow(),
        favorites.len()
    );

    match view.mode() {
        ListMode::Search if records.is_empty() => {
            output.push_str(&format!("No Pokemon found for \"{}\"\n", view.query()));
            return output;
        }
        ListMode::Search => {
            let n = records.len();
            output.push_str(&format!("{} result{} found\n", n, if n > 1 { "s" } else { "" }));
        }
        ListMode::FavoritesOnly if records.is_empty() => {
            output.push_str("No favorites yet!\n");
            return output;
        }
        ListMode::FavoritesOnly => {}
        ListMode::Filtered | ListMode::Paged => output.push_str(&display_type_filter(view)),
    }

    for record in &records {
        output.push_str(&format_record_line(record, favorites.contains(&record.id)));
        output.push('\n');
    }

    if view.pagination_visible() {
        output.push_str(&format!(
            "< prev | Page {}/{} | next >\n",
            view.current_page(),
            view.total_pages()
        ));
    }
    output
}

pub fn display_form(form: &PokemonForm) -> String {
    let mut output = String::new();
    for locale in Locale::ALL {
        let marker = if locale == Locale::English { " *" } else { "" };
        output.push_str(&format!("{}{}: {}\n", locale.label(), marker, form.name(locale)));
    }
    output.push_str(&format!("Types: {}\n", format_types(form.types())));
    output.push_str(&format_stats(form.stats()));
    output.push_str(&format!("Image: {}\n", form.image()));
    output
}

pub fn display_create_flow(flow: &CreateFlow) -> String {
    let form = flow.form();
    let mut output = match flow.step() {
        CreateStep::Editing => format!("--- New Pokemon ---\n{}", display_form(form)),
        CreateStep::Confirming => format!(
            "Create this Pokemon?\n  Name: {}\n  Types: {}\n",
            form.name(Locale::English),
            format_types(form.types())
        ),
        CreateStep::Created(record) => {
            format!("Pokemon \"{}\" created (#{})\n", record.name.english, record.id)
        }
    };
    if let Some(error) = flow.error() {
        output.push_str(&format!("Error: {}\n", error));
    }
    output
}

pub fn display_detail(view: &DetailView) -> String {
    let record = view.record();
    let mut output = match view.mode() {
        DetailMode::Viewing => display_record(record),
        DetailMode::Editing(form) => {
            format!("--- Editing {} ---\n{}", record.name.english, display_form(form))
        }
        DetailMode::ConfirmingDelete => format!(
            "Delete {}? This cannot be undone.\n",
            record.name.english
        ),
    };
    if let Some(message) = view.message() {
        output.push_str(&format!("{}\n", message));
    }
    output
}

/// Scoreboard line plus the current question.
pub fn display_quiz_status(engine: &QuizEngine) -> String {
    let mut output = format!(
        "Score: {} | Streak: {} | Combo: {} | Answered: {}\n",
        engine.score(),
        engine.streak(),
        engine.combo(),
        engine.questions_answered()
    );

    match engine.phase() {
        QuizPhase::Idle => output.push_str("Press enter to start.\n"),
        QuizPhase::Empty => output.push_str("No Pokemon available for the quiz.\n"),
        QuizPhase::Presenting | QuizPhase::Resolved(_) => {
            output.push_str(&format!("⏱ {}s", engine.remaining_seconds()));
            if let Some(hint) = engine.hint() {
                output.push_str(&format!(" | Hint: {} type", hint.name()));
            }
            output.push_str(&format!(" | Worth {} points\n", engine.potential_points()));
            if let Some(record) = engine.current_record() {
                output.push_str(&format!("Who's that Pokemon? {}\n", record.image));
            }
        }
    }
    if let Some(feedback) = engine.feedback() {
        output.push_str(&format!("{}\n", feedback));
    }
    output
}

/// Text for one quiz event, or `None` for events not worth printing.
pub fn format_quiz_event(event: &QuizEvent) -> Option<String> {
    match event {
        QuizEvent::QuestionPresented { hint, .. } => Some(match hint {
            Some(tag) => format!("New question! Hint: {} type", tag.name()),
            None => "New question!".to_string(),
        }),
        QuizEvent::NoRecords => Some("No Pokemon available for the quiz.".to_string()),
        QuizEvent::CountdownTick { remaining } if *remaining <= 3 && *remaining > 0 => {
            Some(format!("{}...", remaining))
        }
        QuizEvent::CountdownTick { .. } => None,
        QuizEvent::AnsweredCorrectly { answer, points, .. } => {
            Some(format!("✅ Correct! It was {} (+{} points)", answer, points))
        }
        QuizEvent::AnsweredIncorrectly { answer, .. } => {
            Some(format!("❌ Incorrect! It was {}", answer))
        }
        QuizEvent::TimedOut { answer } => Some(format!("⏰ Time's up! It was {}", answer)),
        QuizEvent::ComboFlashStarted { combo } => Some(format!("🔥 COMBO x{:.1}!", combo)),
        QuizEvent::ComboFlashEnded | QuizEvent::BonusHidden => None,
    }
}

pub fn display_team(roster: &Roster) -> String {
    let coverage = roster.coverage();
    let mut output = format!(
        "--- Team ({}/{}) | coverage {}/{} ({:.0}%) ---\n",
        roster.len(),
        crate::team::MAX_TEAM_SIZE,
        coverage.covered,
        coverage.total,
        coverage.fraction() * 100.0
    );
    if roster.is_empty() {
        output.push_str("  (empty)\n");
    }
    for (i, member) in roster.members().iter().enumerate() {
        output.push_str(&format!(
            " {}. #{:03} {} ({})\n",
            i + 1,
            member.id,
            member.name.english,
            format_types(&member.types)
        ));
    }

    let missing: Vec<String> = roster.missing_types().into_iter().map(|t| t.key()).collect();
    if !missing.is_empty() {
        output.push_str(&format!("Missing: {}\n", missing.join(", ")));
    }
    output
}

pub fn display_suggestions(suggestions: &[Suggestion<'_>]) -> String {
    if suggestions.is_empty() {
        return "No suggestions.\n".to_string();
    }
    let mut output = String::from("Suggestions:\n");
    for suggestion in suggestions {
        output.push_str(&format!(
            "  #{:03} {:<14} {} (+{} new)\n",
            suggestion.record.id,
            suggestion.record.name.english,
            format_types(&suggestion.record.types),
            suggestion.new_types
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRecordBuilder;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use schema::PokemonPage;

    #[test]
    fn test_unknown_tag_renders_with_default_color() {
        assert_eq!(format_type_with_color(&TypeTag::parse("Shadow")), "Shadow (#888888)");
        assert_eq!(format_type_with_color(&TypeTag::parse("fire")), "Fire (#F08030)");
        assert_eq!(format_types(&[]), "???");
    }

    #[test]
    fn test_stat_bar_scales_to_max() {
        assert_eq!(stat_bar(0), ".".repeat(20));
        assert_eq!(stat_bar(255), "#".repeat(20));
        assert_eq!(stat_bar(1).matches('#').count(), 1);
    }

    #[test]
    fn test_record_card_skips_missing_names() {
        let record = TestRecordBuilder::new(25, "Pikachu")
            .with_types(&[PokemonType::Electric])
            .with_japanese("ピカチュウ")
            .build();

        let card = display_record(&record);

        assert!(card.starts_with("--- #025 Pikachu ---\nTypes: Electric (#F8D030)\nJA: ピカチュウ\n"));
        assert!(!card.contains("FR:"));
        assert!(card.contains("Image: https://img.example/025.png"));
    }

    #[test]
    fn test_empty_search_shows_no_results() {
        let mut view = ListView::new();
        view.set_query("zzz");
        view.show_search_results(Vec::new());

        let text = display_list(&view, &[]);

        assert!(text.ends_with("No Pokemon found for \"zzz\"\n"));
    }

    #[test]
    fn test_rejected_type_explains_why() {
        let mut view = ListView::new();
        view.apply_page(
            1,
            PokemonPage {
                data: vec![
                    TestRecordBuilder::new(6, "Charizard").with_types(&[PokemonType::Fire, PokemonType::Flying]).build(),
                ],
                total_pages: 1,
            },
        );
        view.toggle_type(PokemonType::Fire);
        assert_eq!(
            format_rejected_type(&view, PokemonType::Water),
            "No Pokemon is both Fire and Water."
        );

        view.toggle_type(PokemonType::Flying);
        assert_eq!(
            format_rejected_type(&view, PokemonType::Water),
            "At most 2 types can be combined."
        );
    }

    #[test]
    fn test_list_marks_favorites_and_shows_pagination() {
        let mut view = ListView::new();
        view.apply_page(1, PokemonPage {
            data: vec![
                TestRecordBuilder::new(1, "Bulbasaur").build(),
                TestRecordBuilder::new(4, "Charmander").build(),
            ],
            total_pages: 8,
        });

        let text = display_list(&view, &[4]);

        assert!(text.contains("❤️ #004 Charmander"));
        assert!(text.contains("   #001 Bulbasaur"));
        assert!(text.ends_with("Page 1/8 | next >\n"));
    }

    #[test]
    fn test_quiz_events_text() {
        assert_eq!(format_quiz_event(&QuizEvent::CountdownTick { remaining: 7 }), None);
        assert_eq!(
            format_quiz_event(&QuizEvent::CountdownTick { remaining: 2 }),
            Some("2...".to_string())
        );
        assert_eq!(
            format_quiz_event(&QuizEvent::ComboFlashStarted { combo: 2.5 }),
            Some("🔥 COMBO x2.5!".to_string())
        );
    }

    #[test]
    fn test_quiz_status_shows_hint_and_stakes() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = QuizEngine::new(vec![TestRecordBuilder::new(4, "Charmander")
            .with_types(&[PokemonType::Fire])
            .build()]);
        engine.start(&mut rng);

        let text = display_quiz_status(&engine);

        assert!(text.starts_with("Score: 0 | Streak: 0 | Combo: x1.0 | Answered: 0\n"));
        assert!(text.contains("⏱ 10s | Hint: Fire type | Worth 20 points\n"));
    }

    #[test]
    fn test_team_summary() {
        let mut roster = Roster::new();
        roster.add(
            TestRecordBuilder::new(6, "Charizard")
                .with_types(&[PokemonType::Fire, PokemonType::Flying])
                .build(),
        );

        let text = display_team(&roster);

        assert!(text.starts_with("--- Team (1/6) | coverage 2/18 (11%) ---\n"));
        assert!(text.contains(" 1. #006 Charizard (Fire/Flying)\n"));
        assert!(!text.contains("Missing: grass, fire"));
    }
}
