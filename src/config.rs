use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::scoring::ScoringWeights;
use crate::store::memory::DEFAULT_MIN_PAIR_FREQUENCY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
        }
    }
}

impl LimitsConfig {
    /// Non-positive limits fall back to the default; oversized ones are clamped.
    pub fn normalize(&self, requested: i64) -> usize {
        let max_limit = self.max_limit.max(1);
        if requested <= 0 {
            return self.default_limit.clamp(1, max_limit);
        }
        usize::try_from(requested)
            .unwrap_or(max_limit)
            .min(max_limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub concurrency: usize,
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout_ms: 5000,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub min_pair_frequency: u64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            min_pair_frequency: DEFAULT_MIN_PAIR_FREQUENCY,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub weights: ScoringWeights,
    pub limits: LimitsConfig,
    pub engine: EngineConfig,
    pub statistics: StatisticsConfig,
}

impl RecommenderConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => RecommenderConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read config: {}", err))?;
        let config: Self =
            toml::from_str(&contents).map_err(|err| format!("failed to parse config: {}", err))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.weights
            .validate()
            .map_err(|err| format!("invalid config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create config dir: {}", err))?;
            }
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_parse::<usize>("RECOMMENDER_DEFAULT_LIMIT") {
            self.limits.default_limit = value;
        }
        if let Some(value) = env_parse::<usize>("RECOMMENDER_MAX_LIMIT") {
            self.limits.max_limit = value;
        }
        if let Some(value) = env_parse::<usize>("RECOMMENDER_CONCURRENCY") {
            self.engine.concurrency = value;
        }
        if let Some(value) = env_parse::<u64>("RECOMMENDER_TIMEOUT_MS") {
            self.engine.timeout_ms = value;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse::<T>().ok())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RECOMMENDER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/recommender.toml")))
}
