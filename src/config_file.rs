//! Configuration file handling.
//!
//! Settings are stored as JSON. Every field is optional; missing fields take
//! the defaults below, and command line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::artifacts::ArtifactStore;
use crate::error::FeatureTuiError;
use crate::types::{Universe, FEATURE_COUNT, MIN_SELECTION};

/// Default location of the metrics CSV
pub const DEFAULT_METRICS_PATH: &str = "assets/metrics.csv";

/// Default artifact base location
pub const DEFAULT_ARTIFACT_BASE: &str = "assets";

/// Startup settings that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Metrics CSV location: a file path or an http(s) URL
    pub metrics_path: PathBuf,
    /// Directory or URL prefix holding the plot images
    pub artifact_base: String,
    /// Optional file extension appended to plot locators (e.g. "svg")
    pub artifact_extension: Option<String>,
    /// Smallest selectable combination
    pub min_selection: usize,
    /// Display labels overriding the built-in feature names
    pub feature_labels: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metrics_path: PathBuf::from(DEFAULT_METRICS_PATH),
            artifact_base: DEFAULT_ARTIFACT_BASE.to_string(),
            artifact_extension: None,
            min_selection: MIN_SELECTION,
            feature_labels: None,
        }
    }
}

impl Settings {
    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path.as_ref()))?;

        let settings: Self =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.min_selection == 0 || self.min_selection > FEATURE_COUNT {
            return Err(FeatureTuiError::invalid_configuration(format!(
                "min_selection must be between 1 and {}, got {}",
                FEATURE_COUNT, self.min_selection
            )));
        }

        if self.metrics_path.as_os_str().is_empty() {
            return Err(FeatureTuiError::invalid_configuration(
                "metrics_path must be specified",
            ));
        }

        if let Some(labels) = &self.feature_labels {
            Universe::from_labels(labels.clone())?;
        }

        Ok(())
    }

    /// Feature universe with any configured label overrides
    pub fn universe(&self) -> crate::error::Result<Universe> {
        match &self.feature_labels {
            Some(labels) => Universe::from_labels(labels.clone()),
            None => Ok(Universe::default()),
        }
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(self.artifact_base.clone(), self.artifact_extension.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.min_selection, 6);
        assert_eq!(settings.universe().map(|u| u.len()).ok(), Some(12));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "artifact_extension": "svg" }"#).expect("valid json");
        assert_eq!(settings.artifact_extension.as_deref(), Some("svg"));
        assert_eq!(settings.metrics_path, PathBuf::from(DEFAULT_METRICS_PATH));
        assert_eq!(
            settings.artifact_store().refs_for(3).prediction,
            "assets/prediction3.svg"
        );
    }

    #[test]
    fn test_invalid_min_selection() {
        let mut settings = Settings::default();
        settings.min_selection = 13;
        assert!(matches!(
            settings.validate(),
            Err(FeatureTuiError::InvalidConfiguration(_))
        ));
        settings.min_selection = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_wrong_label_count_rejected() {
        let settings = Settings {
            feature_labels: Some(vec!["only one".to_string()]),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
        assert!(settings.universe().is_err());
    }
}
