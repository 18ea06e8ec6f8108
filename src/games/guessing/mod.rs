pub mod engine;
pub mod game;

pub use engine::{Difficulty, Outcome, Round, RoundError, ScoreBoard, Session, Turn};
pub use game::{GuessingGame, GuessMsg};
