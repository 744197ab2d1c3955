#[cfg(test)]
mod tests {
    use crate::quiz::{ComboMultiplier, QuizEngine, QuizEvent, QuizPhase, Resolution};
    use crate::test_support::TestRecordBuilder;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use schema::PokemonType;
    use std::time::Duration;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn started_engine() -> (QuizEngine, StdRng) {
        let eevee = TestRecordBuilder::new(133, "Eevee")
            .with_types(&[PokemonType::Normal])
            .with_french("Evoli")
            .build();
        let mut rng = StdRng::seed_from_u64(42);
        let mut engine = QuizEngine::new(vec![eevee]);
        engine.start(&mut rng);
        (engine, rng)
    }

    #[test]
    fn test_countdown_ticks_once_per_second() {
        let (mut engine, mut rng) = started_engine();

        let events = engine.advance(ms(3500), &mut rng);

        assert_eq!(engine.remaining_seconds(), 7);
        assert_eq!(
            events,
            vec![
                QuizEvent::CountdownTick { remaining: 9 },
                QuizEvent::CountdownTick { remaining: 8 },
                QuizEvent::CountdownTick { remaining: 7 },
            ]
        );
    }

    #[test]
    fn test_timeout_resets_combo_but_keeps_streak() {
        let (mut engine, mut rng) = started_engine();
        engine.submit_guess("Eevee");
        engine.advance(ms(1500), &mut rng);
        assert_eq!(engine.phase(), QuizPhase::Presenting);

        let events = engine.advance(secs(10), &mut rng);

        assert_eq!(engine.phase(), QuizPhase::Resolved(Resolution::Timeout));
        assert_eq!(engine.combo(), ComboMultiplier::ONE);
        assert_eq!(engine.streak(), 1);
        assert_eq!(engine.questions_answered(), 2);
        assert_eq!(engine.feedback(), Some("Time's up! It was Eevee"));
        assert_eq!(
            &events[events.len() - 2..],
            &[
                QuizEvent::CountdownTick { remaining: 0 },
                QuizEvent::TimedOut {
                    answer: "Eevee".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_next_question_two_seconds_after_timeout() {
        let (mut engine, mut rng) = started_engine();
        engine.advance(secs(10), &mut rng);

        engine.advance(ms(1999), &mut rng);
        assert_eq!(engine.phase(), QuizPhase::Resolved(Resolution::Timeout));

        let events = engine.advance(ms(1), &mut rng);
        assert_eq!(engine.phase(), QuizPhase::Presenting);
        assert_eq!(engine.remaining_seconds(), 10);
        assert_eq!(engine.feedback(), None);
        assert_eq!(
            events,
            vec![QuizEvent::QuestionPresented {
                id: 133,
                hint: Some(PokemonType::Normal.into())
            }]
        );
    }

    #[test]
    fn test_countdown_is_frozen_while_resolved() {
        let (mut engine, mut rng) = started_engine();
        engine.advance(secs(3), &mut rng);
        engine.submit_guess("Ditto");

        let events = engine.advance(ms(1900), &mut rng);

        assert_eq!(engine.remaining_seconds(), 7);
        assert!(events
            .iter()
            .all(|e| !matches!(e, QuizEvent::CountdownTick { .. })));
    }

    #[test]
    fn test_correct_answer_advances_after_one_and_a_half_seconds() {
        let (mut engine, mut rng) = started_engine();
        engine.submit_guess("evoli");

        let first = engine.advance(ms(1000), &mut rng);
        assert_eq!(first, vec![QuizEvent::BonusHidden]);
        assert_eq!(engine.bonus_points(), None);
        assert!(engine.combo_flash_active());

        let second = engine.advance(ms(500), &mut rng);
        assert_eq!(engine.phase(), QuizPhase::Presenting);
        assert!(!engine.combo_flash_active());
        assert!(second.contains(&QuizEvent::ComboFlashEnded));
    }

    #[test]
    fn test_new_question_cancels_pending_transition() {
        let (mut engine, mut rng) = started_engine();
        engine.submit_guess("Ditto");

        // Present manually before the 2s transition fires.
        engine.advance(ms(500), &mut rng);
        engine.present_next(&mut rng);
        engine.advance(ms(1500), &mut rng);

        // The stale transition would have reset the clock to 10 again; the
        // live question has been running for 1.5s instead.
        assert_eq!(engine.phase(), QuizPhase::Presenting);
        assert_eq!(engine.remaining_seconds(), 9);
    }

    #[test]
    fn test_answering_on_last_second_still_scores() {
        let (mut engine, mut rng) = started_engine();
        engine.advance(ms(9999), &mut rng);
        assert_eq!(engine.remaining_seconds(), 1);

        engine.submit_guess("Eevee");
        assert_eq!(engine.score(), 11);
    }
}
