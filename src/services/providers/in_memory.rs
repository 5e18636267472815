use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::LikeStore;
use crate::{
    error::{AppError, AppResult},
    models::{FilmId, UserId},
};

/// Like store kept entirely in process memory
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Clone, Default)]
pub struct InMemoryLikeStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    users: BTreeSet<UserId>,
    films: BTreeSet<FilmId>,
    likes: BTreeMap<UserId, BTreeSet<FilmId>>,
}

/// Serialized form of the whole store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<UserId>,
    #[serde(default)]
    pub films: Vec<FilmId>,
    #[serde(default)]
    pub likes: BTreeMap<UserId, Vec<FilmId>>,
}

impl InMemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot, checking every like against the catalog
    pub async fn from_snapshot(snapshot: Snapshot) -> AppResult<Self> {
        let store = Self::new();
        for user_id in snapshot.users {
            store.add_user(user_id).await;
        }
        for film_id in snapshot.films {
            store.add_film(film_id).await;
        }
        for (user_id, films) in snapshot.likes {
            for film_id in films {
                store.add_like(user_id, film_id).await?;
            }
        }
        Ok(store)
    }

    /// Builds a store from a JSON snapshot
    ///
    /// Expected shape: `{"users": [1, 2], "films": [10], "likes": {"1": [10]}}`.
    pub async fn from_json(json: &str) -> AppResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot).await
    }

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        Snapshot {
            users: inner.users.iter().copied().collect(),
            films: inner.films.iter().copied().collect(),
            likes: inner
                .likes
                .iter()
                .filter(|(_, films)| !films.is_empty())
                .map(|(user_id, films)| (*user_id, films.iter().copied().collect()))
                .collect(),
        }
    }

    pub async fn add_user(&self, user_id: UserId) {
        self.inner.write().await.users.insert(user_id);
    }

    pub async fn add_film(&self, film_id: FilmId) {
        self.inner.write().await.films.insert(film_id);
    }

    /// Records that `user_id` liked `film_id`; liking twice is a no-op
    pub async fn add_like(&self, user_id: UserId, film_id: FilmId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains(&user_id) {
            return Err(AppError::UserNotFound(user_id));
        }
        if !inner.films.contains(&film_id) {
            return Err(AppError::FilmNotFound(film_id));
        }
        inner.likes.entry(user_id).or_default().insert(film_id);
        tracing::debug!(user_id = %user_id, film_id = %film_id, "Like recorded");
        Ok(())
    }

    /// Removes a like; returns whether one was present
    pub async fn remove_like(&self, user_id: UserId, film_id: FilmId) -> bool {
        let mut inner = self.inner.write().await;
        inner
            .likes
            .get_mut(&user_id)
            .map(|films| films.remove(&film_id))
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl LikeStore for InMemoryLikeStore {
    async fn list_users(&self) -> AppResult<Vec<UserId>> {
        Ok(self.inner.read().await.users.iter().copied().collect())
    }

    async fn list_films(&self) -> AppResult<Vec<FilmId>> {
        Ok(self.inner.read().await.films.iter().copied().collect())
    }

    async fn liked_films(&self, user_id: UserId) -> AppResult<Vec<FilmId>> {
        let inner = self.inner.read().await;
        Ok(inner
            .likes
            .get(&user_id)
            .map(|films| films.iter().copied().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> InMemoryLikeStore {
        let store = InMemoryLikeStore::new();
        store.add_user(UserId(1)).await;
        store.add_user(UserId(2)).await;
        store.add_film(FilmId(10)).await;
        store.add_film(FilmId(20)).await;
        store
    }

    #[tokio::test]
    async fn test_likes_are_listed_in_film_order() {
        let store = seeded().await;
        store.add_like(UserId(1), FilmId(20)).await.unwrap();
        store.add_like(UserId(1), FilmId(10)).await.unwrap();
        store.add_like(UserId(1), FilmId(20)).await.unwrap();

        let liked = store.liked_films(UserId(1)).await.unwrap();
        assert_eq!(liked, vec![FilmId(10), FilmId(20)]);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_likes() {
        let store = seeded().await;
        assert!(store.liked_films(UserId(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_like_requires_known_user_and_film() {
        let store = seeded().await;

        let result = store.add_like(UserId(99), FilmId(10)).await;
        assert!(matches!(result, Err(AppError::UserNotFound(UserId(99)))));

        let result = store.add_like(UserId(1), FilmId(99)).await;
        assert!(matches!(result, Err(AppError::FilmNotFound(FilmId(99)))));
    }

    #[tokio::test]
    async fn test_remove_like() {
        let store = seeded().await;
        store.add_like(UserId(2), FilmId(10)).await.unwrap();

        assert!(store.remove_like(UserId(2), FilmId(10)).await);
        assert!(!store.remove_like(UserId(2), FilmId(10)).await);
        assert!(store.liked_films(UserId(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = seeded().await;
        let clone = store.clone();
        clone.add_like(UserId(1), FilmId(10)).await.unwrap();

        assert_eq!(store.liked_films(UserId(1)).await.unwrap(), vec![FilmId(10)]);
    }

    #[tokio::test]
    async fn test_json_snapshot_round_trip() {
        let json = r#"{"users": [2, 1], "films": [20, 10], "likes": {"1": [10, 20], "2": [20]}}"#;
        let store = InMemoryLikeStore::from_json(json).await.unwrap();

        assert_eq!(store.list_users().await.unwrap(), vec![UserId(1), UserId(2)]);
        assert_eq!(store.list_films().await.unwrap(), vec![FilmId(10), FilmId(20)]);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.likes[&UserId(2)], vec![FilmId(20)]);

        let restored = InMemoryLikeStore::from_snapshot(snapshot.clone()).await.unwrap();
        assert_eq!(restored.snapshot().await, snapshot);
    }

    #[tokio::test]
    async fn test_snapshot_with_dangling_like_is_rejected() {
        let json = r#"{"users": [1], "films": [10], "likes": {"1": [11]}}"#;
        let result = InMemoryLikeStore::from_json(json).await;
        assert!(matches!(result, Err(AppError::FilmNotFound(FilmId(11)))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_snapshot_error() {
        let result = InMemoryLikeStore::from_json("{\"users\": [\"x\"]}").await;
        assert!(matches!(result, Err(AppError::Snapshot(_))));
    }
}
