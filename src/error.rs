use thiserror::Error;

use crate::InvalidRating;

/// Reason a [`Match`](crate::Match) is rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum MalformedMatch {
    #[error("missing left player")]
    MissingLeft,
    #[error("missing right player")]
    MissingRight,
    #[error("player cannot play against themselves")]
    SelfMatch,
    #[error("winner is not a participant")]
    WinnerNotParticipant,
}

/// The volatility iteration failed to produce a result.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ConvergenceError {
    #[error("no bracket for the new volatility after {steps} steps")]
    Bracket { steps: usize },
    #[error("volatility did not converge after {iterations} iterations (interval width {width})")]
    Iterations { iterations: usize, width: f64 },
    #[error("volatility iteration produced a non-finite value")]
    NotFinite,
}

/// Error returned by [`RatingSystem::update`](crate::RatingSystem::update).
/// No partial rating table is produced when an update fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("invalid rating for {player:?}: {reason}")]
    InvalidRating {
        player: String,
        #[source]
        reason: InvalidRating,
    },
    #[error("bad match #{index} ({left:?} vs {right:?}, winner {winner:?}): {reason}")]
    MalformedMatch {
        index: usize,
        left: String,
        right: String,
        winner: Option<String>,
        #[source]
        reason: MalformedMatch,
    },
    #[error("internal error while updating {player:?}")]
    Convergence {
        player: String,
        #[source]
        source: ConvergenceError,
    },
}
