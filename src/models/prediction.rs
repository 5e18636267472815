use serde::{Deserialize, Serialize};

use super::Rating;

/// Per-film outcome of the predictor for one user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rating", rename_all = "snake_case")]
pub enum Prediction {
    /// The user rated this film; the rating passes through untouched
    Known(Rating),
    /// Slope One estimate backed by at least one co-rating
    Predicted(Rating),
    /// No co-rating evidence; never to be read as a score
    NoInformation,
}

impl Prediction {
    /// Score usable for ranking, if any
    pub fn score(&self) -> Option<Rating> {
        match self {
            Prediction::Known(rating) | Prediction::Predicted(rating) => Some(*rating),
            Prediction::NoInformation => None,
        }
    }
}
