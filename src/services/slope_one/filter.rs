use crate::{
    config::Config,
    models::{FilmId, Prediction, Rating},
};

use super::{predictor::UserPredictions, rating_matrix::UserRatings};

/// Tunables of the final selection step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationOptions {
    /// Estimates must be strictly greater than this value
    pub threshold: Rating,
    /// Keep at most this many films
    pub limit: Option<usize>,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            limit: None,
        }
    }
}

impl From<&Config> for RecommendationOptions {
    fn from(config: &Config) -> Self {
        Self {
            threshold: config.recommendation_threshold,
            limit: config.max_recommendations,
        }
    }
}

/// Turns one user's predictions into an ordered recommendation list
///
/// Drops films the user already rated and films without information, keeps
/// estimates above the threshold, then orders by descending estimate with
/// ascending film id breaking ties.
pub fn select_recommendations(
    predictions: &UserPredictions,
    own_ratings: &UserRatings,
    options: &RecommendationOptions,
) -> Vec<FilmId> {
    let mut candidates: Vec<(FilmId, Rating)> = predictions
        .iter()
        .filter(|(film_id, prediction)| {
            !own_ratings.contains_key(*film_id) && !matches!(prediction, Prediction::Known(_))
        })
        .filter_map(|(film_id, prediction)| prediction.score().map(|score| (*film_id, score)))
        .filter(|(_, estimate)| *estimate > options.threshold)
        .collect();

    candidates.sort_by(|(a_id, a_score), (b_id, b_score)| {
        b_score.total_cmp(a_score).then_with(|| a_id.cmp(b_id))
    });

    let limit = options.limit.unwrap_or(candidates.len());
    candidates
        .into_iter()
        .take(limit)
        .map(|(film_id, _)| film_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions(entries: &[(i64, Prediction)]) -> UserPredictions {
        entries.iter().map(|(f, p)| (FilmId(*f), *p)).collect()
    }

    fn ratings(entries: &[(i64, f64)]) -> UserRatings {
        entries.iter().map(|(f, r)| (FilmId(*f), *r)).collect()
    }

    #[test]
    fn test_orders_by_score_then_id() {
        let preds = predictions(&[
            (4, Prediction::Predicted(2.0)),
            (1, Prediction::Predicted(3.5)),
            (3, Prediction::Predicted(2.0)),
            (2, Prediction::Predicted(0.5)),
        ]);

        let result = select_recommendations(&preds, &UserRatings::new(), &Default::default());

        assert_eq!(result, vec![FilmId(1), FilmId(3), FilmId(4), FilmId(2)]);
    }

    #[test]
    fn test_seen_films_are_excluded() {
        let preds = predictions(&[
            (1, Prediction::Known(1.0)),
            (2, Prediction::Predicted(1.0)),
        ]);
        let own = ratings(&[(1, 1.0)]);

        let result = select_recommendations(&preds, &own, &Default::default());

        assert_eq!(result, vec![FilmId(2)]);
    }

    #[test]
    fn test_own_ratings_exclude_even_raw_estimates() {
        let preds = predictions(&[(1, Prediction::Predicted(4.0))]);
        let own = ratings(&[(1, 2.0)]);

        assert!(select_recommendations(&preds, &own, &Default::default()).is_empty());
    }

    #[test]
    fn test_no_information_never_recommended() {
        let preds = predictions(&[(1, Prediction::NoInformation)]);
        let options = RecommendationOptions {
            threshold: -100.0,
            limit: None,
        };

        assert!(select_recommendations(&preds, &UserRatings::new(), &options).is_empty());
    }

    #[test]
    fn test_known_predictions_are_excluded_without_own_rating() {
        let preds = predictions(&[
            (1, Prediction::Known(5.0)),
            (2, Prediction::NoInformation),
            (3, Prediction::Predicted(2.0)),
        ]);
        let options = RecommendationOptions {
            threshold: -100.0,
            limit: None,
        };

        let result = select_recommendations(&preds, &UserRatings::new(), &options);
        assert_eq!(result, vec![FilmId(3)]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let preds = predictions(&[
            (1, Prediction::Predicted(0.0)),
            (2, Prediction::Predicted(-0.5)),
            (3, Prediction::Predicted(0.25)),
        ]);

        let result = select_recommendations(&preds, &UserRatings::new(), &Default::default());
        assert_eq!(result, vec![FilmId(3)]);

        let raised = RecommendationOptions {
            threshold: 0.25,
            limit: None,
        };
        assert!(select_recommendations(&preds, &UserRatings::new(), &raised).is_empty());
    }

    #[test]
    fn test_limit_keeps_best_films() {
        let preds = predictions(&[
            (1, Prediction::Predicted(1.0)),
            (2, Prediction::Predicted(3.0)),
            (3, Prediction::Predicted(2.0)),
        ]);
        let options = RecommendationOptions {
            threshold: 0.0,
            limit: Some(2),
        };

        let result = select_recommendations(&preds, &UserRatings::new(), &options);
        assert_eq!(result, vec![FilmId(2), FilmId(3)]);
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            recommendation_threshold: 1.5,
            max_recommendations: Some(5),
            ..Config::default()
        };

        let options = RecommendationOptions::from(&config);
        assert_eq!(options.threshold, 1.5);
        assert_eq!(options.limit, Some(5));
    }
}
