//! Model catalog
//!
//! Bundles the startup-built data (universe, combination table, metrics,
//! artifact naming) and exposes the display boundary: a function from the
//! current selection to a structured, render-ready result. Per-request errors
//! never escape this boundary; they become a status plus the fallback model.

use crate::artifacts::{ArtifactRefs, ArtifactStore};
use crate::config_file::Settings;
use crate::engine::combinations::{Combination, CombinationTable};
use crate::error::{FeatureTuiError, Result};
use crate::logic::resolver::{self, Resolution, FALLBACK_POSITION};
use crate::metrics::MetricsTable;
use crate::types::Universe;
use serde::Serialize;
use strum::Display;
use tracing::{debug, error, info};

/// Outcome of presenting one selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelectionStatus {
    /// Selection matched a model
    Ready,
    /// Too few features selected
    Insufficient,
    /// An entry was not a valid feature index
    Invalid,
    /// Selection should have matched but did not
    Inconsistent,
}

/// Everything the presentation layer needs to draw one selection result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayResult {
    pub status: SelectionStatus,
    /// User-facing prompt or validation message
    pub label: String,
    /// Position of the model whose results are shown
    pub position: usize,
    pub combination: Option<Combination>,
    pub artifacts: ArtifactRefs,
    pub metrics_text: String,
}

impl DisplayResult {
    pub fn is_ready(&self) -> bool {
        self.status == SelectionStatus::Ready
    }
}

/// Prompt shown alongside a resolved selection
pub const READY_LABEL: &str = "Select the desired features:";

/// Immutable, startup-built model index
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    universe: Universe,
    table: CombinationTable,
    metrics: MetricsTable,
    artifacts: ArtifactStore,
}

impl ModelCatalog {
    /// Assemble a catalog from already loaded parts.
    ///
    /// The universe must match the table's universe size and the metrics
    /// table must have one row per table position.
    pub fn new(
        universe: Universe,
        table: CombinationTable,
        metrics: MetricsTable,
        artifacts: ArtifactStore,
    ) -> Result<Self> {
        if universe.len() != table.universe_size() {
            return Err(FeatureTuiError::invalid_configuration(format!(
                "universe has {} features but the combination table expects {}",
                universe.len(),
                table.universe_size()
            )));
        }
        if metrics.len() != table.len() {
            return Err(FeatureTuiError::metrics_load(format!(
                "metrics table has {} rows, combination table has {} entries",
                metrics.len(),
                table.len()
            )));
        }
        Ok(Self {
            universe,
            table,
            metrics,
            artifacts,
        })
    }

    /// Build the table and load the metrics described by `settings`.
    pub fn load(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let universe = settings.universe()?;
        let table = CombinationTable::build(universe.len(), settings.min_selection)?;
        info!(
            "Combination table built: {} entries (sizes {}..={})",
            table.len(),
            table.min_size(),
            table.universe_size()
        );
        let metrics = MetricsTable::load(&settings.metrics_path, table.len())?;
        info!("Metrics loaded: {} rows", metrics.len());
        let artifacts = settings.artifact_store();
        info!("Artifact base: {}", artifacts.base());
        Self::new(universe, table, metrics, artifacts)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn table(&self) -> &CombinationTable {
        &self.table
    }

    pub fn metrics(&self) -> &MetricsTable {
        &self.metrics
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn min_selection(&self) -> usize {
        self.table.min_size()
    }

    /// Resolve feature indices, surfacing every error to the caller.
    pub fn resolve(&self, selected: &[usize]) -> Result<Resolution> {
        resolver::resolve(selected, &self.table, &self.metrics, &self.artifacts)
    }

    /// Display boundary for raw entries (strings from a UI or command line).
    pub fn present<S: AsRef<str>>(&self, raw: &[S]) -> DisplayResult {
        match resolver::parse_selection(raw, self.table.universe_size()) {
            Ok(indices) => self.present_indices(&indices),
            Err(e) => self.recover(e),
        }
    }

    /// Display boundary for feature indices.
    pub fn present_indices(&self, selected: &[usize]) -> DisplayResult {
        match self.resolve(selected) {
            Ok(res) => {
                debug!("Selection resolved to position {}", res.position);
                DisplayResult {
                    status: SelectionStatus::Ready,
                    label: READY_LABEL.to_string(),
                    position: res.position,
                    metrics_text: resolver::metrics_summary(&res.metrics),
                    combination: Some(res.combination),
                    artifacts: res.artifacts,
                }
            }
            Err(e) => self.recover(e),
        }
    }

    fn recover(&self, err: FeatureTuiError) -> DisplayResult {
        let (status, label) = match &err {
            FeatureTuiError::InsufficientSelection { required, .. } => (
                SelectionStatus::Insufficient,
                format!("! Please select at least {} features.", required),
            ),
            FeatureTuiError::InvalidSelectionFormat(msg) => {
                debug!("Rejected selection: {}", msg);
                (SelectionStatus::Invalid, format!("! Invalid selection: {}", msg))
            }
            other => {
                error!("Selection resolution failed: {}", other);
                (
                    SelectionStatus::Inconsistent,
                    "! Internal error: selection could not be matched to a model.".to_string(),
                )
            }
        };

        DisplayResult {
            status,
            label,
            position: FALLBACK_POSITION,
            combination: self.table.get(FALLBACK_POSITION).cloned(),
            artifacts: self.artifacts.refs_for(FALLBACK_POSITION),
            metrics_text: self
                .metrics
                .get(FALLBACK_POSITION)
                .map(resolver::metrics_summary)
                .unwrap_or_default(),
        }
    }
}
