pub mod engine;
pub mod scoring;

pub use engine::{QuizEngine, QuizEvent, QuizPhase, Resolution};
pub use scoring::{is_correct_answer, ComboMultiplier};

#[cfg(test)]
mod tests;
