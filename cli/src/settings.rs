//! Optional settings from a TOML file and the command line.
//!
//! ```toml
//! tau = 0.5
//! max_iterations = 10000
//!
//! [default_rating]
//! rating = 1500
//! deviation = 350
//! volatility = 0.06
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use glickorank::RatingSystem;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tau: Option<f64>,
    pub max_iterations: Option<usize>,
    pub default_rating: DefaultRating,
}

/// Starting point for players that have no rating yet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultRating {
    pub rating: Option<f64>,
    pub deviation: Option<f64>,
    pub volatility: Option<f64>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| SettingsError::Toml {
            path: path.to_owned(),
            source,
        })
    }

    /// Values set in `overrides` take precedence.
    #[must_use]
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            tau: overrides.tau.or(self.tau),
            max_iterations: overrides.max_iterations.or(self.max_iterations),
            default_rating: DefaultRating {
                rating: overrides.default_rating.rating.or(self.default_rating.rating),
                deviation: overrides.default_rating.deviation.or(self.default_rating.deviation),
                volatility: overrides.default_rating.volatility.or(self.default_rating.volatility),
            },
        }
    }

    /// Fills in library defaults for anything that is still unset.
    pub fn rating_system(&self) -> RatingSystem {
        let mut builder = RatingSystem::builder();
        if let Some(tau) = self.tau {
            builder.tau(tau);
        }
        if let Some(max_iterations) = self.max_iterations {
            builder.max_iterations(max_iterations);
        }
        if let Some(rating) = self.default_rating.rating {
            builder.default_rating(rating);
        }
        if let Some(deviation) = self.default_rating.deviation {
            builder.default_deviation(deviation);
        }
        if let Some(volatility) = self.default_rating.volatility {
            builder.default_volatility(volatility);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use glickorank::Rating;

    use super::*;

    #[test]
    fn test_parse() {
        let settings: Settings = toml::from_str(
            r#"
            tau = 0.3

            [default_rating]
            deviation = 0
            "#,
        )
        .unwrap();

        assert_eq!(settings.tau, Some(0.3));
        assert_eq!(settings.max_iterations, None);
        assert_eq!(settings.default_rating.rating, None);
        assert_eq!(settings.default_rating.deviation, Some(0.0));
    }

    #[test]
    fn test_unknown_field() {
        assert!(toml::from_str::<Settings>("tua = 0.3").is_err());
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        let settings = Settings {
            default_rating: DefaultRating {
                volatility: Some(0.0),
                ..DefaultRating::default()
            },
            ..Settings::default()
        };
        let rating_system = settings.rating_system();
        assert_eq!(
            rating_system.default_rating(),
            Rating::new(1500.0, 350.0, 0.0).unwrap()
        );
    }

    #[test]
    fn test_merge() {
        let file = Settings {
            tau: Some(0.3),
            max_iterations: Some(50),
            default_rating: DefaultRating {
                rating: Some(1200.0),
                deviation: Some(200.0),
                volatility: None,
            },
        };
        let flags = Settings {
            tau: Some(0.9),
            default_rating: DefaultRating {
                deviation: Some(100.0),
                ..DefaultRating::default()
            },
            ..Settings::default()
        };

        let rating_system = file.merge(flags).rating_system();
        assert_eq!(rating_system.tau(), 0.9);
        assert_eq!(rating_system.max_iterations(), 50);
        assert_eq!(
            rating_system.default_rating(),
            Rating::new(1200.0, 100.0, 0.06).unwrap()
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::load(Path::new("/nonexistent/glickorank.toml")),
            Err(SettingsError::Io { .. })
        ));
    }
}
