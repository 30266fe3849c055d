use rustc_hash::FxHashMap;

use crate::{internal_rating::InternalRating, MalformedMatch, Rating, Score};

/// A game between two players. A missing winner is a draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub left: String,
    pub right: String,
    pub winner: Option<String>,
}

impl Match {
    pub fn new(left: impl Into<String>, right: impl Into<String>, winner: Option<String>) -> Match {
        Match {
            left: left.into(),
            right: right.into(),
            winner,
        }
    }

    /// A decisive game, listing the winner on the left.
    pub fn win(winner: impl Into<String>, loser: impl Into<String>) -> Match {
        let winner = winner.into();
        Match {
            winner: Some(winner.clone()),
            left: winner,
            right: loser.into(),
        }
    }

    pub fn draw(left: impl Into<String>, right: impl Into<String>) -> Match {
        Match::new(left, right, None)
    }

    pub fn check(&self) -> Result<(), MalformedMatch> {
        if self.left.is_empty() {
            return Err(MalformedMatch::MissingLeft);
        }
        if self.right.is_empty() {
            return Err(MalformedMatch::MissingRight);
        }
        if self.left == self.right {
            return Err(MalformedMatch::SelfMatch);
        }
        match self.winner {
            Some(ref winner) if *winner != self.left && *winner != self.right => {
                Err(MalformedMatch::WinnerNotParticipant)
            }
            _ => Ok(()),
        }
    }

    /// The same game with sides swapped.
    #[must_use]
    pub fn reversed(&self) -> Match {
        Match {
            left: self.right.clone(),
            right: self.left.clone(),
            winner: self.winner.clone(),
        }
    }

    /// Score of the left player. Assumes the match passed [`Match::check`].
    pub fn left_score(&self) -> Score {
        match self.winner {
            None => Score::DRAW,
            Some(ref winner) if *winner == self.left => Score::WIN,
            Some(_) => Score::LOSS,
        }
    }
}

/// One player's view of one game.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Observation {
    pub opponent: InternalRating,
    pub score: Score,
}

/// Groups the games of a batch by player. Both sides of a game see the
/// opponent's rating as returned by `rating_of`, which must not reflect
/// updates from the current batch. Observations are listed in match order.
pub(crate) fn aggregate<'a, F>(matches: &'a [Match], rating_of: F) -> FxHashMap<&'a str, Vec<Observation>>
where
    F: Fn(&str) -> &'a Rating,
{
    let mut by_player: FxHashMap<&'a str, Vec<Observation>> = FxHashMap::default();

    for m in matches {
        let left_score = m.left_score();
        let left_rating = InternalRating::from(rating_of(m.left.as_str()));
        let right_rating = InternalRating::from(rating_of(m.right.as_str()));

        by_player.entry(m.left.as_str()).or_default().push(Observation {
            opponent: right_rating,
            score: left_score,
        });
        by_player.entry(m.right.as_str()).or_default().push(Observation {
            opponent: left_rating,
            score: left_score.opposite(),
        });
    }

    by_player
}
