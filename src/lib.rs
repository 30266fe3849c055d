//! Glicko-2 rating updates for batches of pairwise games.
//!
//! A [`RatingSystem`] turns a [`RatingTable`] and the [`Match`]es of one
//! rating period into a new table. The old table is left untouched, so
//! periods can be chained by feeding each result into the next update.
//!
//! ```
//! use glickorank::{Match, RatingSystem, RatingTable};
//!
//! let rating_system = RatingSystem::builder().tau(0.5).build();
//! let ratings = rating_system
//!     .update(&RatingTable::default(), &[Match::win("alice", "bob")])
//!     .unwrap();
//! assert!(ratings["alice"].rating > ratings["bob"].rating);
//! ```
//!
//! See Mark Glickman's [Example of the Glicko-2 system](http://www.glicko.net/glicko/glicko2.pdf)
//! for the equations.

mod encounter;
mod error;
mod estimator;
mod internal_rating;
mod rating;
mod rating_system;
mod score;
mod volatility;

pub use encounter::Match;
pub use error::{ConvergenceError, MalformedMatch, UpdateError};
pub use internal_rating::{InternalRating, INTERNAL_RATING_SCALE, RATING_OFFSET};
pub use rating::{InvalidRating, Rating, RatingDifference, RatingScalar, Volatility};
pub use rating_system::{
    RatingSystem, RatingSystemBuilder, RatingTable, DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_TAU,
    DEFAULT_VOLATILITY,
};
pub use score::Score;
pub use volatility::{CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS};
