use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::{
    encounter::{aggregate, Observation},
    estimator,
    internal_rating::InternalRating,
    volatility::{VolatilitySolver, DEFAULT_MAX_ITERATIONS},
    ConvergenceError, Match, Rating, RatingDifference, RatingScalar, UpdateError, Volatility,
};

pub const DEFAULT_RATING: f64 = 1500.0;
pub const DEFAULT_DEVIATION: f64 = 350.0;
pub const DEFAULT_VOLATILITY: f64 = 0.06;
pub const DEFAULT_TAU: f64 = 0.5;

/// Ratings by player name.
pub type RatingTable = FxHashMap<String, Rating>;

/// Collects optional settings. Anything left unset is filled in with the
/// documented default by [`RatingSystemBuilder::build()`], so an explicit
/// zero is never mistaken for a missing value.
#[derive(Debug, Clone, Default)]
pub struct RatingSystemBuilder {
    tau: Option<f64>,
    default_rating: Option<f64>,
    default_deviation: Option<f64>,
    default_volatility: Option<f64>,
    max_iterations: Option<usize>,
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    /// System constant restraining the change of volatility. Reasonable
    /// choices are between 0.3 and 1.2.
    pub fn tau(&mut self, tau: f64) -> &mut Self {
        self.tau = Some(tau);
        self
    }

    /// Rating of players that are not in the rating table.
    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        self.default_rating = Some(default_rating);
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        self.default_deviation = Some(default_deviation);
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        self.default_volatility = Some(default_volatility);
        self
    }

    /// Cap for each of the two loops of the volatility iteration.
    pub fn max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Resolves defaults. Parameters are validated by
    /// [`RatingSystem::update()`].
    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            tau: self.tau.unwrap_or(DEFAULT_TAU),
            default_rating: Rating {
                rating: RatingScalar(self.default_rating.unwrap_or(DEFAULT_RATING)),
                deviation: RatingDifference(self.default_deviation.unwrap_or(DEFAULT_DEVIATION)),
                volatility: Volatility(self.default_volatility.unwrap_or(DEFAULT_VOLATILITY)),
            },
            max_iterations: self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
        }
    }
}

/// Glicko-2 with a fixed system constant. Each call to
/// [`RatingSystem::update()`] treats its batch of matches as one rating
/// period.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    tau: f64,
    default_rating: Rating,
    max_iterations: usize,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn default_rating(&self) -> Rating {
        self.default_rating
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Computes the ratings after one rating period in which `matches` were
    /// played.
    ///
    /// The result contains every player from `ratings` and every player
    /// named in `matches`. Players without a rating start from the default
    /// rating. All games see the ratings from before the period, so the
    /// order of `matches` does not matter beyond floating point summation
    /// order. Players without games keep their rating while their deviation
    /// grows.
    ///
    /// Inputs are validated before any ratings are computed. On error no
    /// ratings are produced at all.
    pub fn update(&self, ratings: &RatingTable, matches: &[Match]) -> Result<RatingTable, UpdateError> {
        self.check(ratings, matches)?;

        let rating_of = |player: &str| ratings.get(player).unwrap_or(&self.default_rating);
        let observations = aggregate(matches, rating_of);

        let mut players: FxHashSet<&str> = ratings.keys().map(String::as_str).collect();
        players.extend(observations.keys().copied());

        debug!(
            players = players.len(),
            matches = matches.len(),
            "updating ratings"
        );

        let solver = VolatilitySolver {
            tau: self.tau,
            max_iterations: self.max_iterations,
        };

        players
            .into_par_iter()
            .map(|player| {
                let before = InternalRating::from(rating_of(player));
                let games = observations.get(player).map_or(&[][..], Vec::as_slice);
                update_player(&solver, &before, games)
                    .map(|after| {
                        let after = Rating::from(after);
                        trace!(player, games = games.len(), %after, "updated");
                        (player.to_owned(), after)
                    })
                    .map_err(|source| UpdateError::Convergence {
                        player: player.to_owned(),
                        source,
                    })
            })
            .collect()
    }

    fn check(&self, ratings: &RatingTable, matches: &[Match]) -> Result<(), UpdateError> {
        if !(self.tau > 0.0 && self.tau.is_finite()) {
            return Err(UpdateError::InvalidParameter {
                name: "tau",
                value: self.tau.to_string(),
            });
        }

        if self.default_rating.check().is_err() {
            return Err(UpdateError::InvalidParameter {
                name: "default rating",
                value: self.default_rating.to_string(),
            });
        }

        for (player, rating) in ratings {
            rating.check().map_err(|reason| UpdateError::InvalidRating {
                player: player.clone(),
                reason,
            })?;
        }

        for (index, m) in matches.iter().enumerate() {
            m.check().map_err(|reason| UpdateError::MalformedMatch {
                index,
                left: m.left.clone(),
                right: m.right.clone(),
                winner: m.winner.clone(),
                reason,
            })?;
        }

        Ok(())
    }
}

fn update_player(
    solver: &VolatilitySolver,
    player: &InternalRating,
    observations: &[Observation],
) -> Result<InternalRating, ConvergenceError> {
    let Some(variance) = estimator::variance(player, observations) else {
        return Ok(InternalRating {
            phi: player.inflated_phi(),
            ..*player
        });
    };

    let delta = estimator::delta(player, variance, observations);
    let sigma = solver.solve(player, variance, delta)?;

    let phi_star = (player.phi * player.phi + sigma * sigma).sqrt();
    let phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / variance).sqrt();
    let mu = player.mu + estimator::delta(player, phi * phi, observations);

    Ok(InternalRating { mu, phi, sigma })
}
