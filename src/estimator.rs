//! Estimated variance of a player's results and their performance delta,
//! steps 3 and 4 of the Glicko-2 update.

use crate::{encounter::Observation, internal_rating::InternalRating};

/// Estimated variance of the player's rating based only on game outcomes.
/// `None` when there are no observations.
pub(crate) fn variance(player: &InternalRating, observations: &[Observation]) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    for observation in observations {
        let g = observation.opponent.g();
        let expected = player.expected_score(&observation.opponent);
        sum += g * g * expected * (1.0 - expected);
    }
    Some(1.0 / sum)
}

/// Sum of score surprises weighted by `g`, multiplied by `scale`. With the
/// variance as scale this is the estimated improvement of the rating, with
/// the new squared deviation it is the actual change of `mu`. Zero for an
/// empty list.
pub(crate) fn delta(player: &InternalRating, scale: f64, observations: &[Observation]) -> f64 {
    let mut sum = 0.0;
    for observation in observations {
        let expected = player.expected_score(&observation.opponent);
        sum += observation.opponent.g() * (observation.score.value() - expected);
    }
    scale * sum
}
