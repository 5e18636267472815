use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    error::{AppError, AppResult},
    models::{FilmId, Rating, UserId, LIKE_RATING},
};

/// Known ratings of a single user
pub type UserRatings = BTreeMap<FilmId, Rating>;

/// Sparse user-by-film table of known preference signals
///
/// A missing entry means "no signal", never a zero or negative rating. Users
/// without a single rating have no row at all. Ordered maps keep every
/// downstream iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingMatrix {
    rows: BTreeMap<UserId, UserRatings>,
}

impl RatingMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the binary matrix used by the like path
    ///
    /// Every liked film present in `films` gets a rating of 1.0. Likes outside
    /// the catalog and likes of users not listed in `users` are ignored.
    pub fn from_likes(
        users: &[UserId],
        films: &[FilmId],
        liked_films: &HashMap<UserId, Vec<FilmId>>,
    ) -> Self {
        let catalog: BTreeSet<FilmId> = films.iter().copied().collect();
        let mut matrix = Self::new();

        for user_id in users {
            let Some(liked) = liked_films.get(user_id) else {
                continue;
            };

            let row: UserRatings = liked
                .iter()
                .filter(|film_id| catalog.contains(film_id))
                .map(|film_id| (*film_id, LIKE_RATING))
                .collect();

            if !row.is_empty() {
                matrix.rows.insert(*user_id, row);
            }
        }

        tracing::debug!(
            users = users.len(),
            films = films.len(),
            rated_users = matrix.rows.len(),
            "Rating matrix built from likes"
        );

        matrix
    }

    /// Builds a matrix from graded ratings
    pub fn from_ratings<I>(ratings: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (UserId, FilmId, Rating)>,
    {
        let mut matrix = Self::new();
        for (user_id, film_id, rating) in ratings {
            matrix.insert(user_id, film_id, rating)?;
        }
        Ok(matrix)
    }

    /// Records a rating, replacing any previous rating of the same film
    pub fn insert(&mut self, user_id: UserId, film_id: FilmId, rating: Rating) -> AppResult<()> {
        if !rating.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "rating of film {} by user {} must be finite, got {}",
                film_id, user_id, rating
            )));
        }
        self.rows.entry(user_id).or_default().insert(film_id, rating);
        Ok(())
    }

    pub fn ratings_of(&self, user_id: UserId) -> Option<&UserRatings> {
        self.rows.get(&user_id)
    }

    pub fn rating(&self, user_id: UserId, film_id: FilmId) -> Option<Rating> {
        self.rows.get(&user_id)?.get(&film_id).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (UserId, &UserRatings)> + '_ {
        self.rows.iter().map(|(user_id, row)| (*user_id, row))
    }

    pub fn user_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
