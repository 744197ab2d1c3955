use schema::PokemonRecord;
use std::fmt;

/// Points every correct answer is worth before the speed bonus.
pub const BASE_POINTS: u32 = 10;

/// Scoring amplifier that grows by 0.5 per consecutive correct answer.
///
/// Stored in half steps so the arithmetic stays exact: 2 half steps is 1.0x,
/// 10 half steps is the 5.0x cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComboMultiplier {
    half_steps: u8,
}

impl ComboMultiplier {
    pub const ONE: ComboMultiplier = ComboMultiplier { half_steps: 2 };
    pub const MAX: ComboMultiplier = ComboMultiplier { half_steps: 10 };

    pub fn value(self) -> f32 {
        self.half_steps as f32 / 2.0
    }

    /// The multiplier after one more correct answer, capped at [`Self::MAX`].
    pub fn increment(self) -> Self {
        Self {
            half_steps: (self.half_steps + 1).min(Self::MAX.half_steps),
        }
    }

    /// `round(points * multiplier)`, with halves rounded up.
    pub fn apply(self, points: u32) -> u32 {
        (points * self.half_steps as u32 + 1) / 2
    }

    /// Whether this multiplier deserves the combo banner.
    pub fn is_combo(self) -> bool {
        self.half_steps >= 3
    }
}

impl Default for ComboMultiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for ComboMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{:.1}", self.value())
    }
}

/// Points for a correct answer given with `remaining_seconds` on the clock.
pub fn points_for(remaining_seconds: u32, combo: ComboMultiplier) -> u32 {
    combo.apply(BASE_POINTS + remaining_seconds)
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A guess is correct when, trimmed and case-folded, it equals any of the
/// record's localized names folded the same way.
pub fn is_correct_answer(record: &PokemonRecord, guess: &str) -> bool {
    let guess = fold(guess);
    !guess.is_empty() && record.name.all().any(|name| fold(name) == guess)
}
