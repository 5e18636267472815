//! Slope One collaborative filtering
//!
//! The pipeline runs leaf first: ratings, pairwise deviations, per-user
//! predictions, then selection. Every matrix is a local value of a single
//! call; nothing is cached or shared between calls, so concurrent requests
//! need no synchronization.

use std::collections::HashMap;

use crate::models::{FilmId, UserId};

pub mod deviation;
pub mod filter;
pub mod predictor;
pub mod rating_matrix;

pub use deviation::{DifferenceMatrix, FilmPair, PairStats};
pub use filter::{select_recommendations, RecommendationOptions};
pub use predictor::{predict_all, predict_for_user, raw_predictions, PredictionMatrix, UserPredictions};
pub use rating_matrix::{RatingMatrix, UserRatings};

/// Recommends films for `target` from the like relation
///
/// Returns films the user has not liked, best estimate first. A user without
/// likes, an empty catalog or an empty like relation all yield an empty list.
/// The caller is expected to have checked that `target` exists.
pub fn recommend(
    target: UserId,
    users: &[UserId],
    films: &[FilmId],
    liked_films: &HashMap<UserId, Vec<FilmId>>,
    options: &RecommendationOptions,
) -> Vec<FilmId> {
    let ratings = RatingMatrix::from_likes(users, films, liked_films);
    recommend_from_ratings(target, &ratings, films, options)
}

/// Recommends films for `target` from an already built rating matrix
///
/// Works for graded ratings as well as for the binary like signal.
pub fn recommend_from_ratings(
    target: UserId,
    ratings: &RatingMatrix,
    films: &[FilmId],
    options: &RecommendationOptions,
) -> Vec<FilmId> {
    let Some(own_ratings) = ratings.ratings_of(target) else {
        tracing::debug!(user_id = %target, "User has no ratings, nothing to recommend");
        return Vec::new();
    };

    if films.is_empty() {
        return Vec::new();
    }

    let diffs = DifferenceMatrix::build(ratings);
    let predictions = predict_for_user(own_ratings, &diffs, films);
    let recommended = select_recommendations(&predictions, own_ratings, options);

    tracing::debug!(
        user_id = %target,
        rated = own_ratings.len(),
        candidates = predictions.len(),
        recommended = recommended.len(),
        "Slope One recommendations computed"
    );

    recommended
}
