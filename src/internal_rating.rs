use std::f64::consts::PI;

use crate::{Rating, RatingDifference, RatingScalar, Volatility};

/// Ratio between the public rating scale and the internal Glicko-2 scale.
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Public rating that maps to `mu = 0` on the internal scale.
pub const RATING_OFFSET: f64 = 1500.0;

/// A rating on the internal Glicko-2 scale, where the update equations are
/// defined. Convert with `InternalRating::from(&rating)` and
/// `Rating::from(internal)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InternalRating {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

impl From<&Rating> for InternalRating {
    #[inline]
    fn from(rating: &Rating) -> InternalRating {
        InternalRating {
            mu: (f64::from(rating.rating) - RATING_OFFSET) / INTERNAL_RATING_SCALE,
            phi: f64::from(rating.deviation) / INTERNAL_RATING_SCALE,
            sigma: f64::from(rating.volatility),
        }
    }
}

impl From<InternalRating> for Rating {
    #[inline]
    fn from(rating: InternalRating) -> Rating {
        Rating {
            rating: RatingScalar(rating.mu * INTERNAL_RATING_SCALE + RATING_OFFSET),
            deviation: RatingDifference(rating.phi * INTERNAL_RATING_SCALE),
            volatility: Volatility(rating.sigma),
        }
    }
}

impl InternalRating {
    /// Weight of a game against this rating. Opponents with a high deviation
    /// contribute less.
    #[inline]
    pub fn g(&self) -> f64 {
        1.0 / (1.0 + 3.0 * self.phi * self.phi / (PI * PI)).sqrt()
    }

    /// Expected score of `self` against `opponent`.
    #[inline]
    pub fn expected_score(&self, opponent: &InternalRating) -> f64 {
        1.0 / (1.0 + (-opponent.g() * (self.mu - opponent.mu)).exp())
    }

    /// Deviation after a rating period without games.
    #[inline]
    pub fn inflated_phi(&self) -> f64 {
        (self.phi * self.phi + self.sigma * self.sigma).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        let internal = InternalRating::from(&Rating::new(1500.0 + 173.7178, 173.7178, 0.06).unwrap());
        assert!((internal.mu - 1.0).abs() < 1e-12);
        assert!((internal.phi - 1.0).abs() < 1e-12);
        assert_eq!(internal.sigma, 0.06);
    }

    #[test]
    fn test_round_trip() {
        let rating = Rating::new(1234.5678, 87.6543, 0.0612).unwrap();
        let back = Rating::from(InternalRating::from(&rating));
        assert!((f64::from(back.rating) - 1234.5678).abs() < 1e-9);
        assert!((f64::from(back.deviation) - 87.6543).abs() < 1e-9);
        assert_eq!(back.volatility, rating.volatility);
    }

    #[test]
    fn test_g_and_expectation() {
        // Step 3 of Glickman's worked example.
        let player = InternalRating::from(&Rating::new(1500.0, 200.0, 0.06).unwrap());
        let opponent = InternalRating::from(&Rating::new(1400.0, 30.0, 0.06).unwrap());
        assert!((opponent.g() - 0.9955).abs() < 1e-4);
        assert!((player.expected_score(&opponent) - 0.639).abs() < 1e-3);

        let even = InternalRating { mu: 0.0, phi: 0.0, sigma: 0.06 };
        assert_eq!(even.g(), 1.0);
        assert_eq!(even.expected_score(&even), 0.5);
    }
}
