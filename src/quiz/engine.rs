//! "Who's that Pokemon?" quiz engine.
//!
//! The engine is a state machine driven by three inputs: guesses
//! ([`QuizEngine::submit_guess`]), the passage of time ([`QuizEngine::advance`])
//! and restarts ([`QuizEngine::reset`]). Each input returns the [`QuizEvent`]s it
//! produced so a front-end can render them without diffing state.

use crate::quiz::scoring::{is_correct_answer, points_for, ComboMultiplier};
use crate::timers::Schedule;
use rand::Rng;
use schema::{PokemonRecord, TypeTag};
use std::time::Duration;
use tracing::debug;

/// Seconds on the clock when a question is presented.
pub const QUESTION_SECONDS: u32 = 10;

const TICK: Duration = Duration::from_secs(1);
const NEXT_AFTER_CORRECT: Duration = Duration::from_millis(1500);
const NEXT_AFTER_MISS: Duration = Duration::from_millis(2000);
const COMBO_FLASH: Duration = Duration::from_millis(1500);
const BONUS_DISPLAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct { points: u32 },
    Incorrect,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Created, not started yet.
    Idle,
    /// Started with no records: no question will ever be presented.
    Empty,
    Presenting,
    Resolved(Resolution),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum QuizTimer {
    Countdown,
    NextQuestion,
    ComboFlash,
    BonusDisplay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    QuestionPresented {
        id: u32,
        hint: Option<TypeTag>,
    },
    NoRecords,
    CountdownTick {
        remaining: u32,
    },
    AnsweredCorrectly {
        answer: String,
        points: u32,
        combo: f32,
    },
    AnsweredIncorrectly {
        guess: String,
        answer: String,
    },
    TimedOut {
        answer: String,
    },
    ComboFlashStarted {
        combo: f32,
    },
    ComboFlashEnded,
    BonusHidden,
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    records: Vec<PokemonRecord>,
    current: Option<usize>,
    phase: QuizPhase,
    remaining: u32,
    score: u32,
    streak: u32,
    combo: ComboMultiplier,
    questions_answered: u32,
    feedback: Option<String>,
    combo_flash: bool,
    bonus_points: Option<u32>,
    schedule: Schedule<QuizTimer>,
}

impl QuizEngine {
    pub fn new(records: Vec<PokemonRecord>) -> Self {
        Self {
            records,
            current: None,
            phase: QuizPhase::Idle,
            remaining: QUESTION_SECONDS,
            score: 0,
            streak: 0,
            combo: ComboMultiplier::ONE,
            questions_answered: 0,
            feedback: None,
            combo_flash: false,
            bonus_points: None,
            schedule: Schedule::new(),
        }
    }

    /// Present the first question.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> Vec<QuizEvent> {
        self.present_next(rng)
    }

    /// Pick a record uniformly at random (repeats allowed), put the full time
    /// on the clock and clear the previous feedback. Any pending transition to
    /// the next question is cancelled.
    pub fn present_next<R: Rng>(&mut self, rng: &mut R) -> Vec<QuizEvent> {
        self.schedule.cancel(QuizTimer::NextQuestion);
        self.schedule.cancel(QuizTimer::Countdown);
        self.feedback = None;
        self.bonus_points = None;
        self.schedule.cancel(QuizTimer::BonusDisplay);

        if self.records.is_empty() {
            self.current = None;
            self.phase = QuizPhase::Empty;
            return vec![QuizEvent::NoRecords];
        }

        let index = rng.random_range(0..self.records.len());
        self.current = Some(index);
        self.remaining = QUESTION_SECONDS;
        self.phase = QuizPhase::Presenting;
        self.schedule.schedule(QuizTimer::Countdown, TICK);

        let record = &self.records[index];
        debug!(id = record.id, "question presented");
        vec![QuizEvent::QuestionPresented {
            id: record.id,
            hint: record.primary_type().cloned(),
        }]
    }

    /// Judge a guess against the current record. Blank guesses, and guesses
    /// made while no question is open, are ignored.
    pub fn submit_guess(&mut self, guess: &str) -> Vec<QuizEvent> {
        if self.phase != QuizPhase::Presenting || guess.trim().is_empty() {
            return Vec::new();
        }
        let Some(record) = self.current.map(|i| &self.records[i]) else {
            return Vec::new();
        };

        let answer = record.name.english.clone();
        self.questions_answered += 1;
        self.schedule.cancel(QuizTimer::Countdown);

        if is_correct_answer(record, guess) {
            let points = points_for(self.remaining, self.combo);
            self.score += points;
            self.streak += 1;
            self.combo = self.combo.increment();
            self.phase = QuizPhase::Resolved(Resolution::Correct { points });
            self.feedback = Some(format!("Correct! +{} points", points));

            self.bonus_points = Some(points);
            self.schedule.schedule(QuizTimer::BonusDisplay, BONUS_DISPLAY);
            self.schedule.schedule(QuizTimer::NextQuestion, NEXT_AFTER_CORRECT);

            let mut events = vec![QuizEvent::AnsweredCorrectly {
                answer,
                points,
                combo: self.combo.value(),
            }];
            if self.combo.is_combo() {
                self.combo_flash = true;
                self.schedule.schedule(QuizTimer::ComboFlash, COMBO_FLASH);
                events.push(QuizEvent::ComboFlashStarted {
                    combo: self.combo.value(),
                });
            }
            debug!(points, score = self.score, combo = %self.combo, "correct guess");
            events
        } else {
            self.streak = 0;
            self.combo = ComboMultiplier::ONE;
            self.phase = QuizPhase::Resolved(Resolution::Incorrect);
            self.feedback = Some(format!("Incorrect! It was {}", answer));
            self.schedule.schedule(QuizTimer::NextQuestion, NEXT_AFTER_MISS);
            debug!(guess, "incorrect guess");
            vec![QuizEvent::AnsweredIncorrectly {
                guess: guess.trim().to_string(),
                answer,
            }]
        }
    }

    /// Let `elapsed` pass, firing every timer that falls due in order.
    pub fn advance<R: Rng>(&mut self, elapsed: Duration, rng: &mut R) -> Vec<QuizEvent> {
        let until = self.schedule.now() + elapsed;
        let mut events = Vec::new();

        while let Some(timer) = self.schedule.pop_due(until) {
            match timer {
                QuizTimer::Countdown => events.extend(self.tick()),
                QuizTimer::NextQuestion => events.extend(self.present_next(rng)),
                QuizTimer::ComboFlash => {
                    self.combo_flash = false;
                    events.push(QuizEvent::ComboFlashEnded);
                }
                QuizTimer::BonusDisplay => {
                    self.bonus_points = None;
                    events.push(QuizEvent::BonusHidden);
                }
            }
        }

        self.schedule.settle(until);
        events
    }

    fn tick(&mut self) -> Vec<QuizEvent> {
        if self.phase != QuizPhase::Presenting {
            return Vec::new();
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            self.schedule.schedule(QuizTimer::Countdown, TICK);
            return vec![QuizEvent::CountdownTick {
                remaining: self.remaining,
            }];
        }

        // Time is up: the combo is lost but the streak survives.
        let answer = self
            .current_record()
            .map(|r| r.name.english.clone())
            .unwrap_or_default();
        self.combo = ComboMultiplier::ONE;
        self.questions_answered += 1;
        self.phase = QuizPhase::Resolved(Resolution::Timeout);
        self.feedback = Some(format!("Time's up! It was {}", answer));
        self.schedule.schedule(QuizTimer::NextQuestion, NEXT_AFTER_MISS);
        debug!(answer = %answer, "question timed out");
        vec![
            QuizEvent::CountdownTick { remaining: 0 },
            QuizEvent::TimedOut { answer },
        ]
    }

    /// Start a new game over the same records.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) -> Vec<QuizEvent> {
        self.schedule.cancel_all();
        self.score = 0;
        self.streak = 0;
        self.questions_answered = 0;
        self.combo = ComboMultiplier::ONE;
        self.remaining = QUESTION_SECONDS;
        self.combo_flash = false;
        self.bonus_points = None;
        self.feedback = None;
        self.present_next(rng)
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn current_record(&self) -> Option<&PokemonRecord> {
        self.current.map(|i| &self.records[i])
    }

    /// Primary type of the current record, shown as a hint.
    pub fn hint(&self) -> Option<&TypeTag> {
        self.current_record().and_then(PokemonRecord::primary_type)
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn combo(&self) -> ComboMultiplier {
        self.combo
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn combo_flash_active(&self) -> bool {
        self.combo_flash
    }

    /// Points of the last correct answer while they are still on display.
    pub fn bonus_points(&self) -> Option<u32> {
        self.bonus_points
    }

    /// What a correct answer would be worth right now.
    pub fn potential_points(&self) -> u32 {
        points_for(self.remaining, self.combo)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
