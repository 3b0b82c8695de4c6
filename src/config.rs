//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/twentyq/twentyq.toml`
//! 3. Environment variables: `TWENTYQ_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_SEED;

/// Unified configuration for twentyq.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Answer held by the root of a fresh tree (default: "duck")
    pub seed_answer: String,
    /// Default tree store for save/load (default: none)
    pub store_path: Option<PathBuf>,
    /// Save the tree right after it learns something (default: false)
    pub autosave: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_answer: DEFAULT_SEED.to_string(),
            store_path: None,
            autosave: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub seed_answer: Option<String>,
    pub store_path: Option<PathBuf>,
    pub autosave: Option<bool>,
}

/// Get the XDG config directory for twentyq.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "twentyq").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("twentyq.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_raw_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            seed_answer: overlay
                .seed_answer
                .clone()
                .unwrap_or_else(|| self.seed_answer.clone()),
            store_path: overlay
                .store_path
                .clone()
                .or_else(|| self.store_path.clone()),
            autosave: overlay.autosave.unwrap_or(self.autosave),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the store path.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.store_path {
            let raw = path.to_string_lossy();
            let expanded = shellexpand::full(raw.as_ref())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            self.store_path = Some(PathBuf::from(expanded));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.seed_answer.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "seed_answer must not be empty".to_string(),
            });
        }
        if self.seed_answer.contains(['\n', '\r']) {
            return Err(ApplicationError::Config {
                message: "seed_answer must be a single line".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist. When `None` the
    ///   global config is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;
        Ok(current)
    }

    /// Apply TWENTYQ_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TWENTYQ").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("seed_answer") {
            settings.seed_answer = val;
        }
        if let Ok(val) = config.get_string("store_path") {
            settings.store_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("autosave") {
            settings.autosave = val;
        }

        Ok(settings)
    }

    /// Settings as TOML, for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_seed_with_duck() {
        let settings = Settings::default();
        assert_eq!(settings.seed_answer, "duck");
        assert_eq!(settings.store_path, None);
        assert!(!settings.autosave);
    }

    #[test]
    fn test_merge_with_overlay_wins_where_specified() {
        let base = Settings {
            seed_answer: "duck".to_string(),
            store_path: Some(PathBuf::from("/tmp/base.txt")),
            autosave: true,
        };
        let overlay = parse_raw_settings(r#"seed_answer = "cat""#).unwrap();

        let result = base.merge_with(&overlay);

        assert_eq!(result.seed_answer, "cat");
        assert_eq!(result.store_path, Some(PathBuf::from("/tmp/base.txt")));
        assert!(result.autosave);
    }

    #[test]
    fn test_merge_with_empty_overlay_keeps_base() {
        let base = Settings::default();
        let overlay = parse_raw_settings("").unwrap();
        assert_eq!(base.merge_with(&overlay), base);
    }

    #[test]
    fn test_parse_raw_settings_reads_all_fields() {
        let raw = parse_raw_settings(
            r#"
seed_answer = "penguin"
store_path = "/var/lib/twentyq/tree.txt"
autosave = true
"#,
        )
        .unwrap();
        assert_eq!(raw.seed_answer.as_deref(), Some("penguin"));
        assert_eq!(
            raw.store_path,
            Some(PathBuf::from("/var/lib/twentyq/tree.txt"))
        );
        assert_eq!(raw.autosave, Some(true));
    }

    #[test]
    fn test_parse_raw_settings_rejects_wrong_types() {
        assert!(parse_raw_settings("autosave = \"often\"").is_err());
    }

    #[test]
    fn test_validate_rejects_blank_seed() {
        let settings = Settings {
            seed_answer: "  ".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn test_expand_paths_leaves_plain_path_alone() {
        let mut settings = Settings {
            store_path: Some(PathBuf::from("/plain/tree.txt")),
            ..Settings::default()
        };
        settings.expand_paths();
        assert_eq!(settings.store_path, Some(PathBuf::from("/plain/tree.txt")));
    }

    #[test]
    fn test_to_toml_round_trips_through_raw_settings() {
        let settings = Settings {
            seed_answer: "owl".to_string(),
            store_path: Some(PathBuf::from("/tmp/owl.txt")),
            autosave: true,
        };
        let raw = parse_raw_settings(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
