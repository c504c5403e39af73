use serde::Deserialize;

use crate::services::title_matcher::MatchAlgorithm;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the movie catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum fuzzy score (0.0 - 1.0) a title needs to count as a match
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// String similarity metric used for title matching
    #[serde(default)]
    pub match_algorithm: MatchAlgorithm,

    /// Number of recommendations returned when the request gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound accepted for a request's limit
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_catalog_path() -> String {
    "movies.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_match_threshold() -> f64 {
    0.6
}

fn default_limit() -> usize {
    30
}

fn default_max_limit() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            host: default_host(),
            port: default_port(),
            match_threshold: default_match_threshold(),
            match_algorithm: MatchAlgorithm::default(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            anyhow::bail!(
                "MATCH_THRESHOLD must be between 0 and 1, got {}",
                self.match_threshold
            );
        }
        if self.default_limit == 0 {
            anyhow::bail!("DEFAULT_LIMIT must be at least 1");
        }
        if self.default_limit > self.max_limit {
            anyhow::bail!(
                "DEFAULT_LIMIT ({}) exceeds MAX_LIMIT ({})",
                self.default_limit,
                self.max_limit
            );
        }
        Ok(())
    }
}
