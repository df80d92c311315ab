use crate::core::converter::WorkSchedule;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const ENV_CACHE_DIR: &str = "S_CALC_CACHE_DIR";
pub const ENV_CACHE_TTL: &str = "S_CALC_CACHE_TTL";
pub const ENV_HOURS_PER_DAY: &str = "S_HOURS_DAY";
pub const ENV_DAYS_PER_MONTH: &str = "S_DAYS_MONTH";

const DEFAULT_TTL_HOURS: u32 = 24;
/// Longest accepted cache TTL, 100 years.
pub const MAX_TTL_HOURS: u32 = 876_000;

fn default_ttl_hours() -> u32 {
    DEFAULT_TTL_HOURS
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "s-calc").context("Could not determine project directories")
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CacheConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            dir: None,
            ttl_hours: DEFAULT_TTL_HOURS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.ttl_hours))
    }

    /// The configured directory, or the platform cache directory for s-calc.
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }
        Ok(project_dirs()?.cache_dir().to_path_buf())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub primary: ProviderConfig,
    pub fallback: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            primary: ProviderConfig {
                base_url: "https://api.exchangerate-api.com".to_string(),
            },
            fallback: ProviderConfig {
                base_url: "https://api.exchangerate.host".to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub schedule: WorkSchedule,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config file (explicit path, else the default location if it
    /// exists, else defaults) and applies environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Self::load_from_path(&default_path)?
                } else {
                    debug!("No config file at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        debug!("Loaded config: {config:#?}");
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.schedule.hours_per_day > 0 && self.schedule.days_per_month > 0,
            "schedule.hours_per_day and schedule.days_per_month must be positive"
        );
        anyhow::ensure!(
            self.cache.ttl_hours <= MAX_TTL_HOURS,
            "cache.ttl_hours must be at most {MAX_TTL_HOURS}"
        );
        Ok(())
    }

    /// Overrides settings from `S_CALC_*`/`S_*` variables resolved by `lookup`.
    /// Values that do not parse as positive integers, or exceed their limit,
    /// are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|d| !d.trim().is_empty()) {
            self.cache.dir = Some(PathBuf::from(dir));
        }
        if let Some(ttl) = positive_override(&lookup, ENV_CACHE_TTL, MAX_TTL_HOURS) {
            self.cache.ttl_hours = ttl;
        }
        if let Some(hours) = positive_override(&lookup, ENV_HOURS_PER_DAY, u32::MAX) {
            self.schedule.hours_per_day = hours;
        }
        if let Some(days) = positive_override(&lookup, ENV_DAYS_PER_MONTH, u32::MAX) {
            self.schedule.days_per_month = days;
        }
    }
}

fn positive_override<F>(lookup: &F, key: &str, max: u32) -> Option<u32>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 && value <= max => Some(value),
        _ => {
            warn!(variable = key, value = %raw, "Ignoring invalid override");
            None
        }
    }
}
