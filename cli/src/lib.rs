//! Reads rating files, runs them through [`glickorank`] and writes the
//! resulting ratings.

pub mod driver;
pub mod ratingfile;
pub mod settings;
