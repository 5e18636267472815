use crate::{
    error::AppResult,
    models::{FilmId, UserId},
};

pub mod in_memory;

pub use in_memory::InMemoryLikeStore;

/// Read access to the catalog and the like relation
///
/// Implementations sit in front of whatever stores users, films and likes.
/// The recommender only reads through this trait and never writes back.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LikeStore: Send + Sync {
    /// All known users
    async fn list_users(&self) -> AppResult<Vec<UserId>>;

    /// All films in the catalog
    async fn list_films(&self) -> AppResult<Vec<FilmId>>;

    /// Films the given user has liked
    ///
    /// An unknown user has liked nothing.
    async fn liked_films(&self, user_id: UserId) -> AppResult<Vec<FilmId>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
