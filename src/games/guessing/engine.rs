/// Rules for one guessing round and the bisection opponent.
///
/// A `Round` is a plain `Copy` value. Every transition borrows the current
/// round and hands back the next one inside a `Step`, so the presentation
/// layer only ever reacts to the returned `Outcome`.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Inclusive `(min, max)` range the target is drawn from.
    pub fn range(self) -> (i32, i32) {
        match self {
            Difficulty::Easy => (1, 10),
            Difficulty::Medium => (1, 50),
            Difficulty::Hard => (1, 100),
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RoundError::UnknownDifficulty(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Ai,
}

impl Turn {
    pub fn other(self) -> Self {
        match self {
            Turn::Player => Turn::Ai,
            Turn::Ai => Turn::Player,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Player => f.write_str("Player"),
            Turn::Ai => f.write_str("AI"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    TooLow,
    TooHigh,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::TooLow => f.write_str("Too low!"),
            Hint::TooHigh => f.write_str("Too high!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hint { by: Turn, guess: i32, hint: Hint },
    /// `attempts` counts every guess of the round, both sides included.
    Win { winner: Turn, attempts: u32 },
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Win { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("Please enter a valid number ('{0}' is not one).")]
    InvalidInput(String),
    #[error("It is not your turn, the {0} is guessing.")]
    NotYourTurn(Turn),
    #[error("The round is already over.")]
    RoundOver,
    #[error("No round in progress.")]
    NoActiveRound,
    #[error("AI failed to guess the number. It was {target}.")]
    ExhaustedRange { target: i32 },
    #[error("Target {target} lies outside {min}..={max}.")]
    TargetOutOfRange { target: i32, min: i32, max: i32 },
    #[error("Unknown difficulty '{0}' (expected Easy, Medium or Hard).")]
    UnknownDifficulty(String),
}

/// Parses a typed guess. Never touches game state.
pub fn parse_guess(text: &str) -> Result<i32, RoundError> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| RoundError::InvalidInput(trimmed.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    range_min: i32,
    range_max: i32,
    target: i32,
    attempts: u32,
    turn: Turn,
    ai_low: i32,
    ai_high: i32,
    finished: bool,
}

/// Result of a transition: the next round value plus what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub round: Round,
    pub outcome: Outcome,
}

impl Round {
    /// Draws a target uniformly from the difficulty's range.
    pub fn start<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (min, max) = difficulty.range();
        let target = rng.random_range(min..=max);
        debug!(%difficulty, min, max, "round started");
        Self::fresh(min, max, target)
    }

    pub fn with_target(difficulty: Difficulty, target: i32) -> Result<Self, RoundError> {
        let (min, max) = difficulty.range();
        if !(min..=max).contains(&target) {
            return Err(RoundError::TargetOutOfRange { target, min, max });
        }
        Ok(Self::fresh(min, max, target))
    }

    fn fresh(range_min: i32, range_max: i32, target: i32) -> Self {
        Self {
            range_min,
            range_max,
            target,
            attempts: 0,
            turn: Turn::Player,
            ai_low: range_min,
            ai_high: range_max,
            finished: false,
        }
    }

    pub fn range(&self) -> (i32, i32) {
        (self.range_min, self.range_max)
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// The AI's remaining candidate interval `[low, high]`.
    pub fn ai_window(&self) -> (i32, i32) {
        (self.ai_low, self.ai_high)
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }

    pub fn player_guess(&self, value: i32) -> Result<Step, RoundError> {
        self.expect_turn(Turn::Player)?;

        let mut next = *self;
        next.attempts += 1;
        let outcome = match value.cmp(&self.target) {
            Ordering::Equal => {
                next.finished = true;
                Outcome::Win { winner: Turn::Player, attempts: next.attempts }
            }
            Ordering::Less => {
                next.turn = self.turn.other();
                Outcome::Hint { by: Turn::Player, guess: value, hint: Hint::TooLow }
            }
            Ordering::Greater => {
                next.turn = self.turn.other();
                Outcome::Hint { by: Turn::Player, guess: value, hint: Hint::TooHigh }
            }
        };
        Ok(Step { round: next, outcome })
    }

    /// Guesses the floor midpoint of the AI window and narrows it on a miss.
    pub fn ai_guess(&self) -> Result<Step, RoundError> {
        self.expect_turn(Turn::Ai)?;
        if self.ai_low > self.ai_high {
            warn!(low = self.ai_low, high = self.ai_high, target = self.target, "AI window exhausted");
            return Err(RoundError::ExhaustedRange { target: self.target });
        }

        // low + (high - low) / 2 == floor((low + high) / 2) without overflow
        let guess = self.ai_low + (self.ai_high - self.ai_low).div_euclid(2);
        let mut next = *self;
        next.attempts += 1;
        let outcome = match guess.cmp(&self.target) {
            Ordering::Equal => {
                next.finished = true;
                Outcome::Win { winner: Turn::Ai, attempts: next.attempts }
            }
            Ordering::Less => {
                next.ai_low = guess + 1;
                next.turn = self.turn.other();
                Outcome::Hint { by: Turn::Ai, guess, hint: Hint::TooLow }
            }
            Ordering::Greater => {
                next.ai_high = guess - 1;
                next.turn = self.turn.other();
                Outcome::Hint { by: Turn::Ai, guess, hint: Hint::TooHigh }
            }
        };
        debug!(guess, low = next.ai_low, high = next.ai_high, "AI guessed");
        Ok(Step { round: next, outcome })
    }

    fn expect_turn(&self, turn: Turn) -> Result<(), RoundError> {
        if self.finished {
            return Err(RoundError::RoundOver);
        }
        if self.turn != turn {
            return Err(RoundError::NotYourTurn(self.turn));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub player_wins: u32,
    pub ai_wins: u32,
}

impl ScoreBoard {
    pub fn record(&mut self, winner: Turn) {
        match winner {
            Turn::Player => self.player_wins += 1,
            Turn::Ai => self.ai_wins += 1,
        }
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player: {} | AI: {}", self.player_wins, self.ai_wins)
    }
}

/// The active round (if any) plus the scores that outlive it.
#[derive(Debug, Default)]
pub struct Session {
    round: Option<Round>,
    scores: ScoreBoard,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn start_round<R: Rng>(&mut self, difficulty: Difficulty, rng: &mut R) -> Round {
        let round = Round::start(difficulty, rng);
        self.round = Some(round);
        round
    }

    /// Replaces the active round with a prepared one.
    pub fn begin(&mut self, round: Round) {
        self.round = Some(round);
    }

    pub fn player_guess(&mut self, input: &str) -> Result<Outcome, RoundError> {
        let round = self.round.ok_or(RoundError::NoActiveRound)?;
        let value = parse_guess(input)?;
        let step = round.player_guess(value)?;
        Ok(self.apply(step))
    }

    /// Runs the AI's move. Range exhaustion ends the round without a score change.
    pub fn ai_turn(&mut self) -> Result<Outcome, RoundError> {
        let round = self.round.ok_or(RoundError::NoActiveRound)?;
        match round.ai_guess() {
            Ok(step) => Ok(self.apply(step)),
            Err(err @ RoundError::ExhaustedRange { .. }) => {
                self.round = None;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn apply(&mut self, step: Step) -> Outcome {
        match step.outcome {
            Outcome::Win { winner, .. } => {
                self.scores.record(winner);
                self.round = None;
            }
            Outcome::Hint { .. } => self.round = Some(step.round),
        }
        step.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ai_to_move(difficulty: Difficulty, target: i32) -> Round {
        let round = Round::with_target(difficulty, target).unwrap();
        Round { turn: Turn::Ai, ..round }
    }

    fn log2_ceil(n: i32) -> u32 {
        (n as f64).log2().ceil() as u32
    }

    #[test]
    fn drawn_targets_stay_in_range() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for difficulty in Difficulty::ALL {
                let round = Round::start(difficulty, &mut rng);
                let (min, max) = difficulty.range();
                assert!((min..=max).contains(&round.target()), "{difficulty}: {}", round.target());
                assert_eq!(round.ai_window(), (min, max));
                assert_eq!(round.attempts(), 0);
                assert_eq!(round.turn(), Turn::Player);
            }
        }
    }

    #[test]
    fn difficulty_table_and_parsing() {
        assert_eq!(Difficulty::Easy.range(), (1, 10));
        assert_eq!(Difficulty::Medium.range(), (1, 50));
        assert_eq!(Difficulty::Hard.range(), (1, 100));
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" Easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!("expert".parse::<Difficulty>(), Err(RoundError::UnknownDifficulty(_))));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
    }

    #[test]
    fn with_target_rejects_out_of_range() {
        assert_eq!(
            Round::with_target(Difficulty::Easy, 11),
            Err(RoundError::TargetOutOfRange { target: 11, min: 1, max: 10 })
        );
        assert!(Round::with_target(Difficulty::Easy, 0).is_err());
    }

    #[test]
    fn ai_scenario_one_to_ten_target_seven() {
        let round = ai_to_move(Difficulty::Easy, 7);

        let step = round.ai_guess().unwrap();
        assert_eq!(step.outcome, Outcome::Hint { by: Turn::Ai, guess: 5, hint: Hint::TooLow });
        assert_eq!(step.round.ai_window(), (6, 10));
        assert_eq!(step.round.turn(), Turn::Player);

        let round = step.round.player_guess(1).unwrap().round;
        let step = round.ai_guess().unwrap();
        assert_eq!(step.outcome, Outcome::Hint { by: Turn::Ai, guess: 8, hint: Hint::TooHigh });
        assert_eq!(step.round.ai_window(), (6, 7));

        // floor((6 + 7) / 2) is 6, one more miss before the hit
        let round = step.round.player_guess(1).unwrap().round;
        let step = round.ai_guess().unwrap();
        assert_eq!(step.outcome, Outcome::Hint { by: Turn::Ai, guess: 6, hint: Hint::TooLow });
        assert_eq!(step.round.ai_window(), (7, 7));

        let round = step.round.player_guess(1).unwrap().round;
        let step = round.ai_guess().unwrap();
        // four AI guesses plus three player misses
        assert_eq!(step.outcome, Outcome::Win { winner: Turn::Ai, attempts: 7 });
        assert!(step.round.is_over());
    }

    #[test]
    fn ai_window_shrinks_and_keeps_target() {
        for difficulty in Difficulty::ALL {
            let (min, max) = difficulty.range();
            for target in min..=max {
                let mut round = ai_to_move(difficulty, target);
                loop {
                    let (low, high) = round.ai_window();
                    let step = round.ai_guess().unwrap();
                    if step.outcome.is_terminal() {
                        break;
                    }
                    let (new_low, new_high) = step.round.ai_window();
                    assert!(new_high - new_low < high - low, "window did not shrink");
                    assert!((new_low..=new_high).contains(&target));
                    round = Round { turn: Turn::Ai, ..step.round };
                }
            }
        }
    }

    #[test]
    fn ai_finds_any_target_within_log_bound() {
        for difficulty in Difficulty::ALL {
            let (min, max) = difficulty.range();
            let bound = log2_ceil(max - min + 1);
            for target in min..=max {
                let mut round = ai_to_move(difficulty, target);
                let mut guesses = 0;
                loop {
                    let step = round.ai_guess().unwrap();
                    guesses += 1;
                    if let Outcome::Win { winner, .. } = step.outcome {
                        assert_eq!(winner, Turn::Ai);
                        break;
                    }
                    round = Round { turn: Turn::Ai, ..step.round };
                }
                assert!(guesses <= bound, "{difficulty} target {target}: {guesses} > {bound}");
            }
        }
    }

    #[test]
    fn turns_alternate_after_misses() {
        let round = Round::with_target(Difficulty::Medium, 30).unwrap();
        let step = round.player_guess(10).unwrap();
        assert_eq!(step.outcome, Outcome::Hint { by: Turn::Player, guess: 10, hint: Hint::TooLow });
        assert_eq!(step.round.turn(), Turn::Ai);

        let step = step.round.ai_guess().unwrap();
        assert_eq!(step.round.turn(), Turn::Player);
        assert_eq!(step.round.attempts(), 2);
    }

    #[test]
    fn out_of_turn_and_finished_rounds_are_rejected() {
        let round = Round::with_target(Difficulty::Easy, 4).unwrap();
        assert_eq!(round.ai_guess(), Err(RoundError::NotYourTurn(Turn::Player)));

        let after_miss = round.player_guess(9).unwrap().round;
        assert_eq!(after_miss.player_guess(4), Err(RoundError::NotYourTurn(Turn::Ai)));

        let won = round.player_guess(4).unwrap().round;
        assert_eq!(won.player_guess(4), Err(RoundError::RoundOver));
    }

    #[test]
    fn exhausted_window_is_reported() {
        let round = Round { ai_low: 6, ai_high: 5, ..ai_to_move(Difficulty::Easy, 3) };
        assert_eq!(round.ai_guess(), Err(RoundError::ExhaustedRange { target: 3 }));

        let mut session = Session::new();
        session.begin(round);
        assert_eq!(session.ai_turn(), Err(RoundError::ExhaustedRange { target: 3 }));
        assert!(session.round().is_none());
        assert_eq!(session.scores(), ScoreBoard::default());
    }

    #[test]
    fn player_wins_on_first_attempt() {
        let mut session = Session::new();
        session.begin(Round::with_target(Difficulty::Hard, 42).unwrap());

        assert_eq!(session.player_guess("42"), Ok(Outcome::Win { winner: Turn::Player, attempts: 1 }));
        assert_eq!(session.scores().player_wins, 1);
        assert_eq!(session.scores().ai_wins, 0);
        assert!(session.round().is_none());
    }

    #[test]
    fn invalid_input_leaves_state_alone() {
        let mut session = Session::new();
        let round = Round::with_target(Difficulty::Easy, 2).unwrap();
        session.begin(round);

        assert!(matches!(session.player_guess("seven"), Err(RoundError::InvalidInput(_))));
        assert!(matches!(session.player_guess(""), Err(RoundError::InvalidInput(_))));
        assert_eq!(session.round(), Some(&round));
    }

    #[test]
    fn scores_accumulate_across_rounds() {
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(7);

        let round = session.start_round(Difficulty::Easy, &mut rng);
        session.player_guess(&round.target().to_string()).unwrap();

        session.begin(Round::with_target(Difficulty::Easy, 5).unwrap());
        session.player_guess("1").unwrap();
        // first midpoint of 1..=10 is 5
        assert_eq!(session.ai_turn(), Ok(Outcome::Win { winner: Turn::Ai, attempts: 2 }));

        assert_eq!(session.scores().to_string(), "Player: 1 | AI: 1");
    }

    #[test]
    fn no_round_means_no_moves() {
        let mut session = Session::new();
        assert_eq!(session.player_guess("3"), Err(RoundError::NoActiveRound));
        assert_eq!(session.ai_turn(), Err(RoundError::NoActiveRound));
    }

    #[test]
    fn parse_guess_trims_whitespace() {
        assert_eq!(parse_guess(" 17\n"), Ok(17));
        assert_eq!(parse_guess("-3"), Ok(-3));
        assert_eq!(parse_guess("4.5"), Err(RoundError::InvalidInput("4.5".into())));
    }
}
