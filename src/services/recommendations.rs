use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{FilmId, UserId},
    request_id::RequestId,
    services::{
        providers::LikeStore,
        slope_one::{self, RecommendationOptions},
    },
};

/// Generates personalized film recommendations
///
/// Reads users, films and likes through the configured [`LikeStore`], checks
/// that the requested user exists, then runs Slope One over a fresh snapshot
/// of the like relation. Nothing computed for one request survives into the
/// next.
pub struct RecommendationService {
    store: Arc<dyn LikeStore>,
    options: RecommendationOptions,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn LikeStore>, config: &Config) -> Self {
        Self::with_options(store, RecommendationOptions::from(config))
    }

    pub fn with_options(store: Arc<dyn LikeStore>, options: RecommendationOptions) -> Self {
        Self { store, options }
    }

    /// Films recommended to `user_id`, best first
    pub async fn recommendations_for(&self, user_id: UserId) -> AppResult<Vec<FilmId>> {
        self.recommendations_for_request(user_id, RequestId::new())
            .await
    }

    /// Same as [`Self::recommendations_for`] with a caller supplied request ID
    #[instrument(skip(self), fields(store = self.store.name()))]
    pub async fn recommendations_for_request(
        &self,
        user_id: UserId,
        request_id: RequestId,
    ) -> AppResult<Vec<FilmId>> {
        let start = Instant::now();

        let users = self.store.list_users().await?;
        if !users.contains(&user_id) {
            tracing::warn!(
                request_id = %request_id,
                user_id = %user_id,
                "Recommendations requested for unknown user"
            );
            return Err(AppError::UserNotFound(user_id));
        }

        let films = self.store.list_films().await?;
        let liked_films = self.fetch_likes(&users).await?;

        tracing::info!(
            request_id = %request_id,
            users = users.len(),
            films = films.len(),
            "Like data fetched"
        );

        let recommended =
            slope_one::recommend(user_id, &users, &films, &liked_films, &self.options);

        tracing::info!(
            request_id = %request_id,
            user_id = %user_id,
            recommended = recommended.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(recommended)
    }

    /// Fetches every user's likes in parallel
    ///
    /// Any failed fetch fails the whole request: recommendations computed
    /// from a partial like relation would silently differ.
    async fn fetch_likes(&self, users: &[UserId]) -> AppResult<HashMap<UserId, Vec<FilmId>>> {
        let mut tasks = Vec::with_capacity(users.len());

        for user_id in users.iter().copied() {
            let store = Arc::clone(&self.store);
            let task = tokio::spawn(async move { store.liked_films(user_id).await });
            tasks.push((user_id, task));
        }

        let mut liked_films = HashMap::with_capacity(tasks.len());
        for (user_id, task) in tasks {
            match task.await {
                Ok(Ok(films)) => {
                    liked_films.insert(user_id, films);
                }
                Ok(Err(e)) => {
                    tracing::error!(user_id = %user_id, error = %e, "Like fetch failed");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(user_id = %user_id, error = %e, "Task join error");
                    return Err(AppError::Internal(e.to_string()));
                }
            }
        }

        Ok(liked_films)
    }
}
