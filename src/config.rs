use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Prefix shared by every environment variable the recommender reads
pub const ENV_PREFIX: &str = "RECOMMENDER_";

/// Recommender configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Predictions must be strictly greater than this to be recommended
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: f64,

    /// Upper bound on the number of films returned, unbounded when absent
    #[serde(default)]
    pub max_recommendations: Option<usize>,

    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_recommendation_threshold() -> f64 {
    0.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recommendation_threshold: default_recommendation_threshold(),
            max_recommendations: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from an explicit set of `(name, value)` pairs
    ///
    /// Names carry the `RECOMMENDER_` prefix, exactly as they would appear in
    /// the process environment.
    pub fn from_vars<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if !self.recommendation_threshold.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "recommendation threshold must be finite, got {}",
                self.recommendation_threshold
            )));
        }
        if self.max_recommendations == Some(0) {
            return Err(AppError::InvalidInput(
                "max recommendations must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
