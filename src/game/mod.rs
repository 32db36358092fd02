pub mod clock;
pub mod session;

pub use clock::RoundClock;
pub use session::{GameError, GuessOutcome, RoundState, Session, hit_points};
