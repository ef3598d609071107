//! Plot artifact locators
//!
//! Plots are produced elsewhere and stored under a base location. This module
//! only derives their locator strings; it never reads the bytes.

use serde::{Deserialize, Serialize};

/// Locators of the two plots tied to one combination table position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRefs {
    /// Predicted vs. real consumption over time
    pub prediction: String,
    /// Predicted vs. real consumption scatter
    pub scatter: String,
}

/// Naming scheme of the artifact store: `<base>/prediction{position}` and
/// `<base>/scatter{position}`, with an optional file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStore {
    base: String,
    extension: Option<String>,
}

impl ArtifactStore {
    pub fn new(base: impl Into<String>, extension: Option<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            extension: extension
                .map(|e| e.trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Locators for a combination table position
    pub fn refs_for(&self, position: usize) -> ArtifactRefs {
        ArtifactRefs {
            prediction: self.locator(&format!("prediction{}", position)),
            scatter: self.locator(&format!("scatter{}", position)),
        }
    }

    /// Position independent plot of power consumption against each feature
    pub fn exploration_plot(&self) -> String {
        self.locator("params_scatter_plots")
    }

    fn locator(&self, name: &str) -> String {
        let file = match &self.extension {
            Some(ext) => format!("{}.{}", name, ext),
            None => name.to_string(),
        };
        if self.base.is_empty() {
            file
        } else {
            format!("{}/{}", self.base, file)
        }
    }
}
