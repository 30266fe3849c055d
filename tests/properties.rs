use glickorank::{InternalRating, Match, Rating, RatingSystem, RatingTable};
use proptest::prelude::*;

const PLAYERS: [&str; 5] = ["ann", "ben", "cat", "dan", "eve"];

fn rating() -> impl Strategy<Value = Rating> {
    (500.0..2500.0f64, 30.0..350.0f64, 0.03..0.1f64)
        .prop_map(|(rating, deviation, volatility)| Rating::new(rating, deviation, volatility).unwrap())
}

fn table() -> impl Strategy<Value = RatingTable> {
    prop::collection::vec(rating(), PLAYERS.len()).prop_map(|ratings| {
        PLAYERS
            .iter()
            .map(|player| player.to_string())
            .zip(ratings)
            .collect()
    })
}

fn game() -> impl Strategy<Value = Match> {
    (0..PLAYERS.len(), 1..PLAYERS.len(), 0..3u8).prop_map(|(left, offset, outcome)| {
        let right = PLAYERS[(left + offset) % PLAYERS.len()];
        let left = PLAYERS[left];
        let winner = match outcome {
            0 => Some(left.to_owned()),
            1 => Some(right.to_owned()),
            _ => None,
        };
        Match::new(left, right, winner)
    })
}

proptest! {
    #[test]
    fn scale_round_trip(
        rating in -5000.0..5000.0f64,
        deviation in 0.0..1000.0f64,
        volatility in 0.0..1.0f64
    ) {
        let original = Rating::new(rating, deviation, volatility).unwrap();
        let back = Rating::from(InternalRating::from(&original));
        prop_assert!((f64::from(back.rating) - rating).abs() < 1e-9);
        prop_assert!((f64::from(back.deviation) - deviation).abs() < 1e-9);
        prop_assert!((f64::from(back.volatility) - volatility).abs() < 1e-9);
    }

    #[test]
    fn sides_are_interchangeable(before in table(), m in game()) {
        let rating_system = RatingSystem::new();
        let forward = rating_system.update(&before, &[m.clone()]);
        let backward = rating_system.update(&before, &[m.reversed()]);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn idle_players_only_gain_deviation(before in table()) {
        let rating_system = RatingSystem::new();
        let after = rating_system.update(&before, &[]).unwrap();
        prop_assert_eq!(after.len(), before.len());
        for (player, old) in &before {
            let new = after[player];
            prop_assert!((new.rating - old.rating).abs().0 < 1e-9);
            prop_assert_eq!(new.volatility, old.volatility);
            prop_assert!(new.deviation > old.deviation);
        }
    }

    #[test]
    fn updates_are_deterministic(
        before in table(),
        matches in prop::collection::vec(game(), 0..30)
    ) {
        let rating_system = RatingSystem::new();
        let first = rating_system.update(&before, &matches).unwrap();
        let second = rating_system.update(&before, &matches).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn winning_never_lowers_rating(
        player in rating(),
        opponents in prop::collection::vec(rating(), 1..5),
        win in any::<bool>()
    ) {
        let mut before = RatingTable::default();
        before.insert("me".to_owned(), player);
        let mut matches = Vec::new();
        for (i, opponent) in opponents.into_iter().enumerate() {
            let name = format!("opponent{i}");
            before.insert(name.clone(), opponent);
            matches.push(if win {
                Match::win("me", name)
            } else {
                Match::win(name, "me")
            });
        }

        let after = RatingSystem::new().update(&before, &matches).unwrap();

        if win {
            prop_assert!(after["me"].rating >= player.rating);
        } else {
            prop_assert!(after["me"].rating <= player.rating);
        }
    }

    #[test]
    fn unrated_players_start_from_default(m in game()) {
        let rating_system = RatingSystem::new();
        let implicit = rating_system.update(&RatingTable::default(), &[m.clone()]).unwrap();

        let explicit_table: RatingTable = [&m.left, &m.right]
            .into_iter()
            .map(|player| (player.clone(), rating_system.default_rating()))
            .collect();
        let explicit = rating_system.update(&explicit_table, &[m]).unwrap();

        prop_assert_eq!(implicit, explicit);
    }
}

#[test]
fn test_default_rating_values() {
    let default = RatingSystem::new().default_rating();
    assert_eq!(default, Rating::new(1500.0, 350.0, 0.06).unwrap());
}
