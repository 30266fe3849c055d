//! Line based rating file format.
//!
//! ```text
//! # <timestamp> <namespace> <rating> <player> [rd=<deviation>] [v=<volatility>]
//! 1700000000 chess 1500 alice rd=200 v=0.06
//! # <timestamp> <namespace> <left> <right> <result>
//! 1700000100 chess alice bob 1-0
//! ```
//!
//! Results are `1-0`, `0-1`, `0.5-0.5` or `1/2-1/2`. Each namespace is an
//! independent pool of players. Ratings are written in the rating record
//! format, so output can be read back in.

use std::{
    cmp::Reverse,
    collections::BTreeMap,
    io,
    io::{BufRead, Write},
    str::FromStr,
};

use glickorank::{InvalidRating, Match, Rating, RatingTable};
use ordered_float::OrderedFloat;
use thiserror::Error;
use tracing::warn;

/// Ratings and games of one namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Universe {
    pub name: String,
    pub max_timestamp: u64,
    pub ratings: RatingTable,
    /// Games in file order.
    pub matches: Vec<Match>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: {kind}")]
    Syntax { line: usize, kind: SyntaxError },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("expected at least 4 fields, got {0}")]
    TooFewFields(usize),
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),
    #[error("invalid name {0:?}")]
    InvalidName(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("invalid result {0:?}")]
    InvalidResult(String),
    #[error("unexpected field {0:?}")]
    UnexpectedField(String),
    #[error("invalid rating: {0}")]
    InvalidRating(#[from] InvalidRating),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum GameResult {
    LeftWins,
    RightWins,
    Draw,
}

impl FromStr for GameResult {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1-0" => GameResult::LeftWins,
            "0-1" => GameResult::RightWins,
            "0.5-0.5" | "1/2-1/2" => GameResult::Draw,
            _ => return Err(SyntaxError::InvalidResult(s.to_owned())),
        })
    }
}

#[derive(Debug, PartialEq)]
enum Record {
    Rating { player: String, rating: Rating },
    Game(Match),
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn name(s: &str) -> Result<String, SyntaxError> {
    if is_name(s) {
        Ok(s.to_owned())
    } else {
        Err(SyntaxError::InvalidName(s.to_owned()))
    }
}

fn number(s: &str) -> Result<f64, SyntaxError> {
    s.parse()
        .map_err(|_| SyntaxError::InvalidNumber(s.to_owned()))
}

fn parse_record(fields: &[&str], default: &Rating) -> Result<Record, SyntaxError> {
    match *fields {
        [left, right, result] if !result.contains('=') => {
            let left = name(left)?;
            let right = name(right)?;
            let winner = match result.parse::<GameResult>()? {
                GameResult::LeftWins => Some(left.clone()),
                GameResult::RightWins => Some(right.clone()),
                GameResult::Draw => None,
            };
            Ok(Record::Game(Match::new(left, right, winner)))
        }
        [rating, player, ref options @ ..] => {
            let rating = number(rating)?;
            let player = name(player)?;
            let mut deviation = None;
            let mut volatility = None;
            for &option in options {
                match option.split_once('=') {
                    Some(("rd", value)) if deviation.is_none() => deviation = Some(number(value)?),
                    Some(("v", value)) if volatility.is_none() => volatility = Some(number(value)?),
                    _ => return Err(SyntaxError::UnexpectedField(option.to_owned())),
                }
            }
            let rating = Rating::new(
                rating,
                deviation.unwrap_or(f64::from(default.deviation)),
                volatility.unwrap_or(f64::from(default.volatility)),
            )?;
            Ok(Record::Rating { player, rating })
        }
        _ => Err(SyntaxError::TooFewFields(fields.len() + 2)),
    }
}

fn parse_line(line: &str, default: &Rating) -> Result<Option<(u64, String, Record)>, SyntaxError> {
    let line = match line.split_once('#') {
        Some((content, _comment)) => content,
        None => line,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    match *fields {
        [] => Ok(None),
        [timestamp, namespace, ref rest @ ..] if rest.len() >= 2 => {
            let timestamp = timestamp
                .parse()
                .map_err(|_| SyntaxError::InvalidTimestamp(timestamp.to_owned()))?;
            let namespace = name(namespace)?;
            Ok(Some((timestamp, namespace, parse_record(rest, default)?)))
        }
        _ => Err(SyntaxError::TooFewFields(fields.len())),
    }
}

/// Reads all namespaces from a rating file. Rating records without `rd` or
/// `v` take them from `default`.
pub fn read<R: BufRead>(reader: R, default: &Rating) -> Result<BTreeMap<String, Universe>, ParseError> {
    let mut universes: BTreeMap<String, Universe> = BTreeMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;

        let Some((timestamp, namespace, record)) =
            parse_line(&line, default).map_err(|kind| ParseError::Syntax { line: number, kind })?
        else {
            continue;
        };

        let universe = universes
            .entry(namespace)
            .or_insert_with_key(|namespace| Universe {
                name: namespace.clone(),
                ..Universe::default()
            });
        universe.max_timestamp = universe.max_timestamp.max(timestamp);

        match record {
            Record::Rating { player, rating } => {
                if universe.ratings.insert(player.clone(), rating).is_some() {
                    warn!(line = number, namespace = %universe.name, player = %player, "rating redefined");
                }
            }
            Record::Game(m) => universe.matches.push(m),
        }
    }

    Ok(universes)
}

/// Writes one rating record per player, highest rating first. Every line
/// starts with `prefix`.
pub fn write_ratings<W: Write>(mut writer: W, prefix: &str, ratings: &RatingTable) -> io::Result<()> {
    let mut sorted: Vec<(&String, &Rating)> = ratings.iter().collect();
    sorted.sort_by_key(|&(player, rating)| (Reverse(OrderedFloat(f64::from(rating.rating))), player));

    for (player, rating) in sorted {
        writeln!(
            writer,
            "{}{:.4} {} rd={:.4} v={:.4}",
            prefix,
            f64::from(rating.rating),
            player,
            f64::from(rating.deviation),
            f64::from(rating.volatility)
        )?;
    }

    Ok(())
}
