use std::{
    fmt,
    ops::{Add, Neg, Sub},
};

/// Number representing playing strength on the public scale, centered on
/// 1500. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl From<f64> for RatingScalar {
    #[inline]
    fn from(rating: f64) -> RatingScalar {
        RatingScalar(rating)
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

/// A difference between two ratings. Also used for the rating deviation,
/// which is measured in rating points.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl From<f64> for RatingDifference {
    #[inline]
    fn from(difference: f64) -> RatingDifference {
        RatingDifference(difference)
    }
}

impl RatingDifference {
    #[inline]
    pub fn abs(self) -> RatingDifference {
        RatingDifference(self.0.abs())
    }
}

impl Neg for RatingDifference {
    type Output = RatingDifference;

    #[inline]
    fn neg(self) -> RatingDifference {
        RatingDifference(-self.0)
    }
}

/// Number representing the degree of expected fluctuation in a rating.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Volatility(pub f64);

impl From<Volatility> for f64 {
    #[inline]
    fn from(Volatility(volatility): Volatility) -> f64 {
        volatility
    }
}

impl From<f64> for Volatility {
    #[inline]
    fn from(volatility: f64) -> Volatility {
        Volatility(volatility)
    }
}

/// Reason a [`Rating`] is rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidRating {
    #[error("rating deviation cannot be negative")]
    NegativeDeviation,
    #[error("volatility cannot be negative")]
    NegativeVolatility,
    #[error("rating, deviation and volatility must be finite")]
    NotFinite,
}

/// A player's rating on the public scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rating {
    /// Number indicating playing strength. Higher is better. The difference
    /// between two ratings determines the expected score in a game between
    /// the two players.
    pub rating: RatingScalar,
    /// Uncertainty in the rating. A range from rating minus twice the deviation
    /// to rating plus twice the deviation approximately represents a 95%
    /// confidence interval.
    pub deviation: RatingDifference,
    /// Number indicating the degree of expected fluctuation in the rating.
    pub volatility: Volatility,
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Result<Rating, InvalidRating> {
        let rating = Rating {
            rating: RatingScalar(rating),
            deviation: RatingDifference(deviation),
            volatility: Volatility(volatility),
        };
        rating.check()?;
        Ok(rating)
    }

    pub fn check(&self) -> Result<(), InvalidRating> {
        if !self.rating.0.is_finite() || !self.deviation.0.is_finite() || !self.volatility.0.is_finite() {
            return Err(InvalidRating::NotFinite);
        }
        if self.deviation.0 < 0.0 {
            return Err(InvalidRating::NegativeDeviation);
        }
        if self.volatility.0 < 0.0 {
            return Err(InvalidRating::NegativeVolatility);
        }
        Ok(())
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:.4} rd={:.4} v={:.4}",
            self.rating.0, self.deviation.0, self.volatility.0
        )
    }
}
