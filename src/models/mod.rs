use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod prediction;

pub use prediction::Prediction;

/// Real-valued score a user assigns to a film
pub type Rating = f64;

/// Rating recorded for a film the user liked
pub const LIKE_RATING: Rating = 1.0;

/// Identifier of a user in the external catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Identifier of a film in the external catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilmId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for FilmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

impl From<i64> for FilmId {
    fn from(id: i64) -> Self {
        FilmId(id)
    }
}
