//! Application configuration loaded from `<data_dir>/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reports::builders::{COACHING_MIN_ENTRIES, DETAILED_MIN_ENTRIES, WEEKLY_MIN_ENTRIES};
use crate::reports::history::{COACHING_HISTORY_LIMIT, DETAILED_HISTORY_LIMIT, WEEKLY_HISTORY_LIMIT};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

type Result<T> = std::result::Result<T, ConfigError>;

/// Entitlements backing the config feature gate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Unlocks every report
    pub pro: bool,
    /// Individual feature ids unlocked without `pro`
    pub unlocked: Vec<String>,
}

/// Weekly insight window, minimum volume and history cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySettings {
    pub window_days: u32,
    pub min_entries: usize,
    pub history_limit: usize,
}

impl Default for WeeklySettings {
    fn default() -> Self {
        Self {
            window_days: 7,
            min_entries: WEEKLY_MIN_ENTRIES,
            history_limit: WEEKLY_HISTORY_LIMIT,
        }
    }
}

/// Coaching window, minimum volume and history cap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingSettings {
    pub window_days: u32,
    pub min_entries: usize,
    pub history_limit: usize,
}

impl Default for CoachingSettings {
    fn default() -> Self {
        Self {
            window_days: 14,
            min_entries: COACHING_MIN_ENTRIES,
            history_limit: COACHING_HISTORY_LIMIT,
        }
    }
}

/// Detailed reports take their window from the requested period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedSettings {
    pub min_entries: usize,
    pub history_limit: usize,
}

impl Default for DetailedSettings {
    fn default() -> Self {
        Self {
            min_entries: DETAILED_MIN_ENTRIES,
            history_limit: DETAILED_HISTORY_LIMIT,
        }
    }
}

/// Missing sections and missing keys fall back to their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub features: FeaturesConfig,
    pub weekly: WeeklySettings,
    pub coaching: CoachingSettings,
    pub detailed: DetailedSettings,
}

impl AppConfig {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load `config.toml` from `data_dir`; a missing file yields defaults
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path_in(data_dir);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: AppConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.validate()?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(Self::path_in(data_dir), contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, window_days) in [
            ("weekly", self.weekly.window_days),
            ("coaching", self.coaching.window_days),
        ] {
            if window_days == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{}.window_days must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(temp.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.features.pro);
        assert_eq!(config.weekly.window_days, 7);
        assert_eq!(config.coaching.min_entries, 5);
        assert_eq!(config.detailed.history_limit, 15);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[features]\npro = true\n\n[coaching]\nwindow_days = 21\nmin_entries = 7\nhistory_limit = 4\n",
        )
        .unwrap();

        let config = AppConfig::load(temp.path()).unwrap();
        assert!(config.features.pro);
        assert_eq!(config.coaching.window_days, 21);
        assert_eq!(config.coaching.history_limit, 4);
        assert_eq!(config.weekly, AppConfig::default().weekly);
    }

    #[test]
    fn test_full_sections_use_snake_case_keys() {
        let contents = "[weekly]\nwindow_days = 10\nmin_entries = 4\nhistory_limit = 8\n\n\
                        [detailed]\nmin_entries = 6\nhistory_limit = 2\n";
        let config: AppConfig = toml::from_str(contents).unwrap();
        assert_eq!(config.weekly.window_days, 10);
        assert_eq!(config.weekly.min_entries, 4);
        assert_eq!(config.weekly.history_limit, 8);
        assert_eq!(config.detailed.min_entries, 6);
        assert_eq!(config.detailed.history_limit, 2);
        assert_eq!(config.coaching, CoachingSettings::default());
    }

    #[test]
    fn test_missing_keys_fall_back_to_section_defaults() {
        let config: AppConfig = toml::from_str("[coaching]\nhistory_limit = 4\n").unwrap();
        assert_eq!(config.coaching.history_limit, 4);
        assert_eq!(config.coaching.window_days, 14);
        assert_eq!(config.coaching.min_entries, COACHING_MIN_ENTRIES);
        assert_eq!(config.weekly, WeeklySettings::default());
    }

    #[test]
    fn test_saved_file_uses_snake_case_keys() {
        let temp = TempDir::new().unwrap();
        AppConfig::default().save(temp.path()).unwrap();
        let contents = fs::read_to_string(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(contents.contains("window_days = 7"));
        assert!(contents.contains("history_limit = 15"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "features = [").unwrap();

        let err = AppConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_zero_window_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[weekly]\nwindow_days = 0\n",
        )
        .unwrap();
        assert!(matches!(
            AppConfig::load(temp.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.features.unlocked = vec!["weekly_insights".to_string()];
        config.save(temp.path()).unwrap();

        assert_eq!(AppConfig::load(temp.path()).unwrap(), config);
    }
}
