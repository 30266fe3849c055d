//! New volatility by Illinois false position, step 5 of the Glicko-2 update.

use tracing::trace;

use crate::{internal_rating::InternalRating, ConvergenceError};

/// Convergence tolerance on the `ln(sigma^2)` scale.
pub const CONVERGENCE_TOLERANCE: f64 = 0.000_001;

/// Default cap for both the bracket search and the Illinois iteration.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

#[derive(Debug, Copy, Clone)]
pub(crate) struct VolatilitySolver {
    pub tau: f64,
    pub max_iterations: usize,
}

impl VolatilitySolver {
    pub fn solve(
        &self,
        player: &InternalRating,
        variance: f64,
        delta: f64,
    ) -> Result<f64, ConvergenceError> {
        let InternalRating { phi, sigma, .. } = *player;

        // ln(0) has no bracket. The constraint term pins the solution there.
        if sigma == 0.0 {
            return Ok(0.0);
        }

        let tau = self.tau;
        let phi_sq = phi * phi;
        let delta_sq = delta * delta;
        let a = (sigma * sigma).ln();

        let f = |x: f64| {
            let ex = x.exp();
            let denom = phi_sq + variance + ex;
            ex * (delta_sq - phi_sq - variance - ex) / (2.0 * denom * denom) - (x - a) / (tau * tau)
        };

        let mut big_a = a;
        let mut big_b = if sigma * sigma > phi_sq + variance && delta_sq > phi_sq + variance {
            (delta_sq - phi_sq - variance).ln()
        } else {
            let mut k = 1;
            while f(a - k as f64 * tau) < 0.0 {
                k += 1;
                if k > self.max_iterations {
                    return Err(ConvergenceError::Bracket { steps: k - 1 });
                }
            }
            a - k as f64 * tau
        };

        let mut f_a = f(big_a);
        let mut f_b = f(big_b);
        if !f_a.is_finite() || !f_b.is_finite() {
            return Err(ConvergenceError::NotFinite);
        }

        let mut iterations = 0;
        while (big_b - big_a).abs() > CONVERGENCE_TOLERANCE {
            if iterations == self.max_iterations {
                return Err(ConvergenceError::Iterations {
                    iterations,
                    width: (big_b - big_a).abs(),
                });
            }
            iterations += 1;

            let big_c = big_a + (big_a - big_b) * f_a / (f_b - f_a);
            let f_c = f(big_c);
            if !f_c.is_finite() {
                return Err(ConvergenceError::NotFinite);
            }

            if f_c * f_b < 0.0 {
                big_a = big_b;
                f_a = f_b;
            } else {
                f_a /= 2.0;
            }

            big_b = big_c;
            f_b = f_c;
        }

        trace!(iterations, "volatility converged");

        let sigma = (big_a / 2.0).exp();
        if sigma.is_finite() {
            Ok(sigma)
        } else {
            Err(ConvergenceError::NotFinite)
        }
    }
}
