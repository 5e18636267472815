use std::collections::BTreeMap;

use crate::models::{FilmId, Prediction, Rating, UserId};

use super::{
    deviation::DifferenceMatrix,
    rating_matrix::{RatingMatrix, UserRatings},
};

/// Post-processed predictions of one user over the catalog
pub type UserPredictions = BTreeMap<FilmId, Prediction>;

/// Post-processed predictions for every user with at least one rating
pub type PredictionMatrix = BTreeMap<UserId, UserPredictions>;

/// Weighted Slope One estimates for one user
///
/// For every film `k` of the difference matrix:
/// `sum_j (dev(k, j) + r_j) * freq(k, j) / sum_j freq(k, j)` over the films
/// `j` the user rated. Films with no supporting co-rating are left out
/// instead of being given a placeholder.
pub fn raw_predictions(ratings: &UserRatings, diffs: &DifferenceMatrix) -> BTreeMap<FilmId, Rating> {
    let mut predictions = BTreeMap::new();

    for candidate in diffs.films() {
        let mut weighted_sum = 0.0;
        let mut weight_total: u64 = 0;

        for (rated, rating) in ratings {
            if let Some(stats) = diffs.oriented(candidate, *rated) {
                let weight = f64::from(stats.frequency);
                weighted_sum += (stats.deviation + rating) * weight;
                weight_total += u64::from(stats.frequency);
            }
        }

        if weight_total > 0 {
            predictions.insert(candidate, weighted_sum / weight_total as f64);
        }
    }

    predictions
}

/// Predictions of one user over the whole catalog
///
/// Known ratings win over estimates. Catalog films with neither are marked
/// `Prediction::NoInformation`.
pub fn predict_for_user(
    ratings: &UserRatings,
    diffs: &DifferenceMatrix,
    films: &[FilmId],
) -> UserPredictions {
    let raw = raw_predictions(ratings, diffs);

    films
        .iter()
        .map(|film_id| {
            let prediction = match (ratings.get(film_id), raw.get(film_id)) {
                (Some(known), _) => Prediction::Known(*known),
                (None, Some(estimate)) => Prediction::Predicted(*estimate),
                (None, None) => Prediction::NoInformation,
            };
            (*film_id, prediction)
        })
        .collect()
}

/// Predictions for every user who rated at least one film
///
/// Each row is computed from that user's ratings alone; nothing accumulated
/// for one user is visible to the next.
pub fn predict_all(
    ratings: &RatingMatrix,
    diffs: &DifferenceMatrix,
    films: &[FilmId],
) -> PredictionMatrix {
    ratings
        .rows()
        .map(|(user_id, row)| (user_id, predict_for_user(row, diffs, films)))
        .collect()
}
