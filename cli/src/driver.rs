use std::{
    io,
    io::{BufRead, Write},
    num::NonZeroUsize,
};

use glickorank::{Match, RatingSystem, RatingTable, UpdateError};
use thiserror::Error;
use tracing::{debug, info};

use crate::ratingfile::{self, ParseError, Universe};

/// How the games of a namespace are split into rating periods.
#[derive(Debug, Copy, Clone, Default)]
pub struct Schedule {
    /// Games per rating period. All games form a single period if unset.
    pub batch: Option<NonZeroUsize>,
    /// Additional sweeps over the same games.
    pub repetitions: usize,
}

impl Schedule {
    /// Feeds the games through `rating_system` one period at a time, each
    /// period starting from the ratings produced by the previous one.
    pub fn run(
        &self,
        rating_system: &RatingSystem,
        mut ratings: RatingTable,
        matches: &[Match],
    ) -> Result<RatingTable, UpdateError> {
        if matches.is_empty() {
            return Ok(ratings);
        }

        let batch = self.batch.map_or(matches.len(), NonZeroUsize::get);

        for sweep in 0..=self.repetitions {
            for (period, games) in matches.chunks(batch).enumerate() {
                debug!(sweep, period, games = games.len(), "rating period");
                ratings = rating_system.update(&ratings, games)?;
            }
        }

        Ok(ratings)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to parse rating file")]
    Parse(#[from] ParseError),
    #[error("failed to update namespace {namespace:?}")]
    Update {
        namespace: String,
        #[source]
        source: UpdateError,
    },
    #[error("failed to write ratings")]
    Io(#[from] io::Error),
}

/// Reads a rating file, rates every namespace on its own and writes the
/// final ratings, namespaces in lexicographic order.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    rating_system: &RatingSystem,
    schedule: &Schedule,
) -> Result<(), RunError> {
    let universes = ratingfile::read(input, &rating_system.default_rating())?;

    for universe in universes.into_values() {
        let Universe {
            name,
            max_timestamp,
            ratings,
            matches,
        } = universe;

        info!(
            namespace = %name,
            ratings = ratings.len(),
            matches = matches.len(),
            "rating namespace"
        );

        let ratings = schedule
            .run(rating_system, ratings, &matches)
            .map_err(|source| RunError::Update {
                namespace: name.clone(),
                source,
            })?;

        ratingfile::write_ratings(&mut output, &format!("{max_timestamp} {name} "), &ratings)?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use glickorank::Rating;

    use super::*;

    fn games() -> Vec<Match> {
        vec![
            Match::win("a", "b"),
            Match::draw("b", "c"),
            Match::win("c", "a"),
            Match::win("a", "d"),
            Match::draw("d", "b"),
        ]
    }

    fn start() -> RatingTable {
        [("a".to_owned(), Rating::new(1600.0, 120.0, 0.06).unwrap())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_single_period() {
        let rating_system = RatingSystem::new();
        let matches = games();

        let scheduled = Schedule::default()
            .run(&rating_system, start(), &matches)
            .unwrap();
        let direct = rating_system.update(&start(), &matches).unwrap();

        assert_eq!(scheduled, direct);
    }

    #[test]
    fn test_batches_chain_updates() {
        let rating_system = RatingSystem::new();
        let matches = games();
        let schedule = Schedule {
            batch: NonZeroUsize::new(2),
            repetitions: 0,
        };

        let scheduled = schedule.run(&rating_system, start(), &matches).unwrap();

        let mut expected = start();
        for games in [&matches[0..2], &matches[2..4], &matches[4..5]] {
            expected = rating_system.update(&expected, games).unwrap();
        }

        assert_eq!(scheduled, expected);
    }

    #[test]
    fn test_repetitions_chain_sweeps() {
        let rating_system = RatingSystem::new();
        let matches = games();
        let schedule = Schedule {
            batch: NonZeroUsize::new(3),
            repetitions: 2,
        };

        let scheduled = schedule.run(&rating_system, start(), &matches).unwrap();

        let mut expected = start();
        for _ in 0..3 {
            expected = rating_system.update(&expected, &matches[0..3]).unwrap();
            expected = rating_system.update(&expected, &matches[3..5]).unwrap();
        }

        assert_eq!(scheduled, expected);
    }

    #[test]
    fn test_no_games_no_periods() {
        let rating_system = RatingSystem::new();
        let schedule = Schedule {
            batch: None,
            repetitions: 3,
        };
        assert_eq!(schedule.run(&rating_system, start(), &[]).unwrap(), start());
    }

    #[test]
    fn test_update_error_names_namespace() {
        let rating_system = RatingSystem::builder().tau(0.0).build();
        let result = run(
            "1 ns a b 1-0\n".as_bytes(),
            Vec::new(),
            &rating_system,
            &Schedule::default(),
        );
        match result {
            Err(RunError::Update { namespace, source }) => {
                assert_eq!(namespace, "ns");
                assert!(matches!(source, UpdateError::InvalidParameter { name: "tau", .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
