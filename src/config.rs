use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants;
use crate::error::{ImporterError, Result};
use crate::pipeline::processing::classify::ClassificationRules;

/// Runtime configuration. Every section falls back to the built-in defaults,
/// so an empty TOML file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub import: ImportConfig,
    pub collection: CollectionConfig,
    pub classification: ClassificationRules,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub csv_path: PathBuf,
    pub collection_path: PathBuf,
    pub export_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(constants::DEFAULT_CSV_PATH),
            collection_path: PathBuf::from(constants::DEFAULT_COLLECTION_PATH),
            export_path: PathBuf::from(constants::DEFAULT_EXPORT_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// State code rows must carry to be imported; empty disables the filter
    pub target_state: String,
    pub fallback_start_id: u64,
    pub company_type: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            target_state: constants::DEFAULT_TARGET_STATE.to_string(),
            fallback_start_id: constants::DEFAULT_FALLBACK_START_ID,
            company_type: constants::DEFAULT_COMPANY_TYPE.to_string(),
        }
    }
}

/// Wrapper text of the persisted collection file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub header: String,
    pub footer: String,
    pub closing_delimiter: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            header: constants::DEFAULT_COLLECTION_HEADER.to_string(),
            footer: constants::DEFAULT_COLLECTION_FOOTER.to_string(),
            closing_delimiter: constants::DEFAULT_CLOSING_DELIMITER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `explicit`, then `$COMPANY_IMPORTER_CONFIG`,
    /// then `company_importer.toml` in the working directory, and apply
    /// environment overrides on top.
    ///
    /// Only the implicit default file may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(constants::ENV_CONFIG).ok().map(PathBuf::from));

        let mut config = match named {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = Path::new(constants::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using built-in defaults", constants::DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ImporterError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `COMPANY_IMPORTER_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(constants::ENV_CSV).filter(|v| !v.trim().is_empty()) {
            self.paths.csv_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(constants::ENV_COLLECTION).filter(|v| !v.trim().is_empty()) {
            self.paths.collection_path = PathBuf::from(v);
        }
        // An empty value is meaningful here: it turns the state filter off
        if let Some(v) = lookup(constants::ENV_TARGET_STATE) {
            self.import.target_state = v.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.csv_path.as_os_str().is_empty() {
            return Err(ImporterError::Config("paths.csv_path must not be empty".to_string()));
        }
        if self.paths.collection_path.as_os_str().is_empty() {
            return Err(ImporterError::Config(
                "paths.collection_path must not be empty".to_string(),
            ));
        }
        if self.collection.closing_delimiter.is_empty() {
            return Err(ImporterError::Config(
                "collection.closing_delimiter must not be empty".to_string(),
            ));
        }
        self.classification.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Industry, Region};
    use std::collections::HashMap;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.import.target_state, "HI");
        assert_eq!(config.import.fallback_start_id, 120);
        assert_eq!(config.import.company_type, "Public Company");
        assert_eq!(config.collection.closing_delimiter, "];");
        assert_eq!(config.classification.industries[0].industry, Industry::Technology);
        assert_eq!(config.classification.regions[0].region, Region::Oahu);
        config.validate().unwrap();
    }

    #[test]
    fn toml_sections_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            [paths]
            csv_path = "in/pacific.csv"

            [import]
            target_state = "ca"
            fallback_start_id = 1

            [[classification.industries]]
            industry = "Energy"
            keywords = ["solar"]
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.csv_path, PathBuf::from("in/pacific.csv"));
        assert_eq!(config.paths.collection_path, PathBuf::from(constants::DEFAULT_COLLECTION_PATH));
        assert_eq!(config.import.target_state, "ca");
        assert_eq!(config.import.fallback_start_id, 1);
        assert_eq!(config.classification.industries.len(), 1);
        assert_eq!(config.classification.industries[0].industry, Industry::Energy);
        // regions were not given, so the built-in list is kept
        assert_eq!(config.classification.regions.len(), 4);
    }

    #[test]
    fn env_overrides_apply_on_top() {
        let vars: HashMap<&str, &str> = [
            (constants::ENV_CSV, "/tmp/rows.csv"),
            (constants::ENV_COLLECTION, "/tmp/companies.ts"),
            (constants::ENV_TARGET_STATE, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.paths.csv_path, PathBuf::from("/tmp/rows.csv"));
        assert_eq!(config.paths.collection_path, PathBuf::from("/tmp/companies.ts"));
        assert_eq!(config.import.target_state, "");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ImporterError::Config(_)));
    }

    #[test]
    fn validate_rejects_empty_keyword_sets() {
        let config = Config::from_toml_str(
            r#"
            [[classification.industries]]
            industry = "Retail"
            keywords = []
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
