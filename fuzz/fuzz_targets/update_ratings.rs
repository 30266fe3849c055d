#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use glickorank::{Match, Rating, RatingDifference, RatingScalar, RatingSystem, RatingTable, UpdateError, Volatility};
use libfuzzer_sys::fuzz_target;

const PLAYERS: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Option<Rating> {
        if self.rating.is_nan() || self.deviation.is_nan() || self.volatility.is_nan() {
            None
        } else {
            Some(Rating {
                rating: RatingScalar(self.rating.clamp(-10000.0, 10000.0)),
                deviation: RatingDifference(self.deviation.clamp(0.0, 1000.0)),
                volatility: Volatility(self.volatility.clamp(0.0, 1.0)),
            })
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Game {
    left: u8,
    right: u8,
    outcome: u8,
}

impl Game {
    fn to_match(&self) -> Match {
        let left = PLAYERS[usize::from(self.left) % PLAYERS.len()];
        let right = PLAYERS[usize::from(self.right) % PLAYERS.len()];
        let winner = match self.outcome % 3 {
            0 => Some(left.to_owned()),
            1 => Some(right.to_owned()),
            _ => None,
        };
        Match::new(left, right, winner)
    }
}

#[derive(Arbitrary, Debug)]
struct Period {
    ratings: [Option<ArbitraryRating>; 4],
    games: Vec<Game>,
    tau: f64,
}

fn assert_rating(rating: &Rating) {
    assert!(f64::from(rating.rating).is_finite());
    assert!(f64::from(rating.deviation).is_finite());
    assert!(f64::from(rating.volatility).is_finite());
    assert!(f64::from(rating.deviation) >= 0.0);
    assert!(f64::from(rating.volatility) >= 0.0);
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(period) = Period::arbitrary(&mut u) else {
        return;
    };
    if period.tau.is_nan() {
        return;
    }

    let mut ratings = RatingTable::default();
    for (player, rating) in PLAYERS.iter().zip(period.ratings) {
        if let Some(rating) = rating.and_then(ArbitraryRating::into_clamped) {
            ratings.insert(player.to_string(), rating);
        }
    }
    let matches: Vec<Match> = period.games.iter().map(Game::to_match).collect();

    let rating_system = RatingSystem::builder()
        .tau(period.tau.clamp(0.01, 2.0))
        .build();

    match rating_system.update(&ratings, &matches) {
        Ok(after) => after.values().for_each(assert_rating),
        Err(UpdateError::MalformedMatch { .. } | UpdateError::Convergence { .. }) => {}
        Err(err) => panic!("unexpected error: {err}"),
    }
});
