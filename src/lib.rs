//! Slope One film recommendations over a like relation
//!
//! [`services::slope_one`] holds the pure, stateless engine.
//! [`RecommendationService`] is the calling layer: it validates the user,
//! reads the like relation through a [`LikeStore`] and runs the engine.

pub mod config;
pub mod error;
pub mod models;
pub mod request_id;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{FilmId, Prediction, Rating, UserId};
pub use services::slope_one::{recommend, RecommendationOptions};
pub use services::{InMemoryLikeStore, LikeStore, RecommendationService};
