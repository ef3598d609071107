//! featuretui Library
//!
//! Maps a user's choice of input features to the precomputed regression
//! model trained on exactly that subset, and surfaces its accuracy metrics
//! and plot locators.

pub mod app;
pub mod artifacts;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod logic;
pub mod metrics;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use artifacts::{ArtifactRefs, ArtifactStore};
pub use catalog::{DisplayResult, ModelCatalog, SelectionStatus};
pub use config_file::Settings;
pub use engine::combinations::{expected_table_len, Combination, CombinationTable};
pub use error::FeatureTuiError;
pub use logic::resolver::{metrics_summary, parse_selection, resolve, Resolution};
pub use metrics::{MetricsRow, MetricsTable};
pub use types::{Feature, Universe, FEATURE_COUNT, MIN_SELECTION};
