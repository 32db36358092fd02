use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::domain::{AttemptStatus, Attempts, Puzzle};
use crate::geometry::NormPoint;

/// Points for finding the object.
///
/// `pending_before` counts the slots still pending before this guess,
/// including the one it consumes; `index` is the 0-based puzzle position.
/// Later puzzles are worth less and the result can go negative.
pub fn hit_points(pending_before: usize, index: usize) -> i64 {
    100 + pending_before as i64 * 10 - index as i64 * 5
}

/// Where a session is in the guess -> reveal -> next loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Accepting guesses on the current puzzle
    Guessing,
    /// Round over; the target is shown until `next_puzzle`
    Revealing,
    /// All rounds played
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Found { points: i64 },
    Missed { tries_left: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is over")]
    Finished,
    #[error("the round is over, move on to the next image first")]
    Revealing,
    #[error("the round is still in progress")]
    RoundInProgress,
}

/// A solo game over a puzzle catalog
#[derive(Debug, Clone)]
pub struct Session {
    puzzles: Vec<Puzzle>,
    rounds: usize,
    index: usize,
    score: i64,
    attempts: Attempts,
    state: RoundState,
}

impl Session {
    /// Plays `config.images` puzzles, or the whole catalog if it is shorter.
    /// Settings below the game minimums are rejected.
    pub fn new(config: GameConfig, puzzles: Vec<Puzzle>) -> Result<Self, ConfigError> {
        config.validate()?;

        let rounds = (config.images as usize).min(puzzles.len());
        let state = if rounds == 0 {
            RoundState::Finished
        } else {
            RoundState::Guessing
        };

        Ok(Self {
            puzzles,
            rounds,
            index: 0,
            score: 0,
            attempts: Attempts::new(config.tries as usize),
            state,
        })
    }

    pub fn current(&self) -> Option<&Puzzle> {
        if self.state == RoundState::Finished {
            return None;
        }
        self.puzzles.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn attempts(&self) -> &Attempts {
        &self.attempts
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    fn ensure_guessing(&self) -> Result<(), GameError> {
        match self.state {
            RoundState::Guessing => Ok(()),
            RoundState::Revealing => Err(GameError::Revealing),
            RoundState::Finished => Err(GameError::Finished),
        }
    }

    /// Resolve one guess against the current puzzle, consuming a try slot
    pub fn guess(&mut self, point: NormPoint) -> Result<GuessOutcome, GameError> {
        self.ensure_guessing()?;

        let puzzle = self.puzzles.get(self.index).ok_or(GameError::Finished)?;
        let slot = self.attempts.first_pending().ok_or(GameError::Revealing)?;
        let pending_before = self.attempts.pending_count();

        if puzzle.is_hit(point) {
            self.attempts.mark(slot, AttemptStatus::Found);
            let points = hit_points(pending_before, self.index);
            self.score += points;
            self.state = RoundState::Revealing;
            return Ok(GuessOutcome::Found { points });
        }

        self.attempts.mark(slot, AttemptStatus::Miss);
        let tries_left = self.attempts.pending_count();
        if tries_left == 0 {
            self.state = RoundState::Revealing;
        }
        Ok(GuessOutcome::Missed { tries_left })
    }

    /// Time ran out: the next slot counts as a miss and the round ends
    pub fn expire(&mut self) -> Result<Option<usize>, GameError> {
        self.ensure_guessing()?;

        let slot = self.attempts.first_pending();
        if let Some(i) = slot {
            self.attempts.mark(i, AttemptStatus::Miss);
        }
        self.state = RoundState::Revealing;
        Ok(slot)
    }

    /// Leave the reveal and load the next puzzle with fresh try slots
    pub fn next_puzzle(&mut self) -> Result<RoundState, GameError> {
        match self.state {
            RoundState::Guessing => return Err(GameError::RoundInProgress),
            RoundState::Finished => return Err(GameError::Finished),
            RoundState::Revealing => {}
        }

        self.index += 1;
        self.attempts.reset();
        self.state = if self.index >= self.rounds {
            RoundState::Finished
        } else {
            RoundState::Guessing
        };
        Ok(self.state)
    }
}
