//! Selection Resolver
//!
//! Turns the set of features a user ticked into the combination table
//! position of the matching model, then collects that model's metrics row and
//! plot locators.
//!
//! # Resolution Steps
//!
//! | Step | Outcome on failure |
//! |------|--------------------|
//! | Parse raw entries into indices | `InvalidSelectionFormat` |
//! | Normalize (dedupe + sort) | never fails |
//! | Check size >= minimum | `InsufficientSelection` |
//! | Locate exact sequence in table | `InternalInconsistency` |
//!
//! # Design
//!
//! - **Pure logic**: no I/O, no shared state; the same selection always
//!   resolves to the same result
//! - **Set semantics**: input order and duplicates do not matter

use crate::artifacts::{ArtifactRefs, ArtifactStore};
use crate::engine::combinations::{Combination, CombinationTable};
use crate::error::{FeatureTuiError, Result};
use crate::metrics::{MetricsRow, MetricsTable};
use serde::Serialize;
use std::collections::BTreeSet;

/// Position shown when a selection cannot be resolved: the first
/// minimum-size combination.
pub const FALLBACK_POSITION: usize = 0;

/// A successfully resolved selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub position: usize,
    pub combination: Combination,
    pub metrics: MetricsRow,
    pub artifacts: ArtifactRefs,
}

// ============================================================================
// Input Handling
// ============================================================================

/// Parse raw selection entries (as delivered by a UI or the command line)
/// into feature indices.
///
/// Every entry must be a non-negative integer below `universe_size`;
/// surrounding whitespace is ignored.
pub fn parse_selection<S: AsRef<str>>(raw: &[S], universe_size: usize) -> Result<Vec<usize>> {
    raw.iter()
        .map(|entry| {
            let entry = entry.as_ref().trim();
            let index: usize = entry.parse().map_err(|_| {
                FeatureTuiError::invalid_selection(format!("'{}' is not a feature index", entry))
            })?;
            if index >= universe_size {
                return Err(FeatureTuiError::invalid_selection(format!(
                    "feature index {} is out of range 0..{}",
                    index, universe_size
                )));
            }
            Ok(index)
        })
        .collect()
}

/// Deduplicate and sort into the canonical increasing sequence.
pub fn normalize_selection(indices: &[usize]) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve a selection of feature indices against the combination table.
///
/// # Errors
///
/// - `InvalidSelectionFormat` if an index is outside the universe
/// - `InsufficientSelection` if fewer than `table.min_size()` distinct
///   indices remain after normalization; callers fall back to
///   [`FALLBACK_POSITION`]
/// - `InternalInconsistency` if a valid selection has no table entry or no
///   metrics row
pub fn resolve(
    selected: &[usize],
    table: &CombinationTable,
    metrics: &MetricsTable,
    store: &ArtifactStore,
) -> Result<Resolution> {
    let normalized = normalize_selection(selected);

    if let Some(&bad) = normalized.iter().find(|&&i| i >= table.universe_size()) {
        return Err(FeatureTuiError::invalid_selection(format!(
            "feature index {} is out of range 0..{}",
            bad,
            table.universe_size()
        )));
    }

    if normalized.len() < table.min_size() {
        return Err(FeatureTuiError::InsufficientSelection {
            selected: normalized.len(),
            required: table.min_size(),
        });
    }

    let position = table.position_of(&normalized).ok_or_else(|| {
        FeatureTuiError::internal_inconsistency(format!(
            "selection {:?} has no entry in the combination table",
            normalized
        ))
    })?;

    let metrics = *metrics.get(position).ok_or_else(|| {
        FeatureTuiError::internal_inconsistency(format!(
            "no metrics row for position {}",
            position
        ))
    })?;

    let combination = Combination::from_sorted(normalized).ok_or_else(|| {
        FeatureTuiError::internal_inconsistency("normalized selection is not increasing")
    })?;

    Ok(Resolution {
        position,
        combination,
        metrics,
        artifacts: store.refs_for(position),
    })
}

/// Format a metrics row as a labeled text block, one metric per line, in the
/// order R2, MAE, MBE, MSE, RMSE, cvRMSE, NMBE.
pub fn metrics_summary(row: &MetricsRow) -> String {
    row.labeled()
        .iter()
        .map(|(label, value)| format!("{:<8}{}", format!("{}:", label), value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (CombinationTable, MetricsTable, ArtifactStore) {
        let table = CombinationTable::build(12, 6).expect("standard table");
        let metrics = (0..table.len())
            .map(|p| MetricsRow {
                r2: p as f64,
                mae: 1.0,
                mbe: 0.0,
                mse: 2.0,
                rmse: 1.5,
                cv_rmse: 10.0,
                nmbe: -0.5,
            })
            .collect();
        (table, metrics, ArtifactStore::new("assets", None))
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection(&["3", " 0 ", "11"], 12).ok(), Some(vec![3, 0, 11]));
        assert!(matches!(
            parse_selection(&["3", "x"], 12),
            Err(FeatureTuiError::InvalidSelectionFormat(_))
        ));
        assert!(parse_selection(&["12"], 12).is_err());
        assert!(parse_selection(&["-1"], 12).is_err());
        assert!(parse_selection(&["2.5"], 12).is_err());
        assert_eq!(parse_selection::<&str>(&[], 12).ok(), Some(vec![]));
    }

    #[test]
    fn test_normalize_selection() {
        assert_eq!(normalize_selection(&[5, 1, 5, 3, 1]), vec![1, 3, 5]);
        assert!(normalize_selection(&[]).is_empty());
    }

    #[test]
    fn test_minimum_selection_resolves_to_zero() {
        let (table, metrics, store) = fixture();
        let res = resolve(&[0, 1, 2, 3, 4, 5], &table, &metrics, &store).expect("resolves");
        assert_eq!(res.position, 0);
        assert_eq!(res.metrics, *metrics.get(0).expect("row 0"));
        assert_eq!(res.artifacts.prediction, "assets/prediction0");
        assert_eq!(res.artifacts.scatter, "assets/scatter0");
    }

    #[test]
    fn test_full_selection_resolves_to_last() {
        let (table, metrics, store) = fixture();
        let res = resolve(&[7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 6], &table, &metrics, &store)
            .expect("resolves");
        assert_eq!(res.position, 2509);
        assert_eq!(res.combination.len(), 12);
        assert_eq!(res.metrics.r2, 2509.0);
    }

    #[test]
    fn test_five_features_is_insufficient() {
        let (table, metrics, store) = fixture();
        let err = resolve(&[0, 1, 2, 3, 4], &table, &metrics, &store).unwrap_err();
        assert!(matches!(
            err,
            FeatureTuiError::InsufficientSelection {
                selected: 5,
                required: 6
            }
        ));
    }

    #[test]
    fn test_duplicates_collapse_before_size_check() {
        let (table, metrics, store) = fixture();
        let err = resolve(&[0, 0, 1, 1, 2, 2, 3], &table, &metrics, &store).unwrap_err();
        assert!(matches!(err, FeatureTuiError::InsufficientSelection { selected: 4, .. }));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let (table, metrics, store) = fixture();
        let err = resolve(&[0, 1, 2, 3, 4, 99], &table, &metrics, &store).unwrap_err();
        assert!(matches!(err, FeatureTuiError::InvalidSelectionFormat(_)));
    }

    #[test]
    fn test_missing_metrics_row_is_inconsistent() {
        let (table, _, store) = fixture();
        let short: MetricsTable = std::iter::empty().collect();
        let err = resolve(&[0, 1, 2, 3, 4, 5], &table, &short, &store).unwrap_err();
        assert!(matches!(err, FeatureTuiError::InternalInconsistency(_)));
    }

    #[test]
    fn test_metrics_summary_layout() {
        let row = MetricsRow {
            r2: 0.93,
            mae: 1.25,
            mbe: -0.5,
            mse: 4.0,
            rmse: 2.0,
            cv_rmse: 12.5,
            nmbe: 0.01,
        };
        assert_eq!(
            metrics_summary(&row),
            "R2:     0.93\nMAE:    1.25\nMBE:    -0.5\nMSE:    4\nRMSE:   2\ncvRMSE: 12.5\nNMBE:   0.01"
        );
    }
}
