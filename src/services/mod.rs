pub mod providers;
pub mod recommendations;
pub mod slope_one;

pub use providers::{InMemoryLikeStore, LikeStore};
pub use recommendations::RecommendationService;
