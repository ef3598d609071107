//! Combination Enumerator
//!
//! Produces the ordered table of every feature subset a model exists for.
//! A subset's position in this table is the key used to address its metrics
//! row and its plot artifacts, so the order is a stable contract.
//!
//! # Ordering
//!
//! | Level | Rule |
//! |-------|------|
//! | Group | By subset size, ascending (`min_size`, ..., `universe_size`) |
//! | Within group | Lexicographic k-subsets of `0..universe_size` |
//!
//! For a 12 feature universe with a minimum of 6 this yields 2510 entries:
//! position 0 is `[0, 1, 2, 3, 4, 5]` and position 2509 is `[0, 1, ..., 11]`.
//!
//! # Design
//!
//! - **Pure logic**: built once at startup, immutable afterwards
//! - **O(1) lookup**: a map from the canonical sequence to its position is
//!   built alongside the ordered list

use crate::error::{FeatureTuiError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Combination
// ============================================================================

/// A strictly increasing sequence of feature indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<usize>);

impl Combination {
    /// Wrap an already sorted, duplicate free sequence.
    ///
    /// Returns `None` if the sequence is not strictly increasing.
    pub fn from_sorted(indices: Vec<usize>) -> Option<Self> {
        if indices.windows(2).all(|w| w[0] < w[1]) {
            Some(Self(indices))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

// Hashes like its inner Vec, so map lookups can borrow a plain slice
impl Borrow<[usize]> for Combination {
    fn borrow(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

// ============================================================================
// Combination Table
// ============================================================================

/// Number of entries `CombinationTable::build` produces: Σ C(n, k) for
/// k in `min_size..=universe_size`.
pub fn expected_table_len(universe_size: usize, min_size: usize) -> usize {
    (min_size..=universe_size)
        .map(|k| binomial(universe_size, k))
        .sum()
}

fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// The complete ordered enumeration of valid feature subsets.
#[derive(Debug, Clone)]
pub struct CombinationTable {
    universe_size: usize,
    min_size: usize,
    entries: Vec<Combination>,
    positions: HashMap<Combination, usize>,
}

impl CombinationTable {
    /// Enumerate every subset of `0..universe_size` with at least `min_size`
    /// elements.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `min_size` is zero or exceeds `universe_size`.
    pub fn build(universe_size: usize, min_size: usize) -> Result<Self> {
        if min_size == 0 {
            return Err(FeatureTuiError::invalid_configuration(
                "minimum combination size must be at least 1",
            ));
        }
        if min_size > universe_size {
            return Err(FeatureTuiError::invalid_configuration(format!(
                "minimum combination size {} exceeds universe size {}",
                min_size, universe_size
            )));
        }

        let mut entries = Vec::with_capacity(expected_table_len(universe_size, min_size));
        for size in min_size..=universe_size {
            // itertools yields k-subsets in lexicographic order
            entries.extend((0..universe_size).combinations(size).map(Combination));
        }

        let positions = entries
            .iter()
            .enumerate()
            .map(|(pos, comb)| (comb.clone(), pos))
            .collect();

        Ok(Self {
            universe_size,
            min_size,
            entries,
            positions,
        })
    }

    /// Position of an exact increasing sequence, if present.
    pub fn position_of(&self, sequence: &[usize]) -> Option<usize> {
        self.positions.get(sequence).copied()
    }

    pub fn get(&self, position: usize) -> Option<&Combination> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.entries.iter()
    }

    /// Positions covered by combinations of exactly `size` elements.
    pub fn size_range(&self, size: usize) -> std::ops::Range<usize> {
        if size < self.min_size || size > self.universe_size {
            return 0..0;
        }
        let start = expected_table_len(self.universe_size, self.min_size)
            - expected_table_len(self.universe_size, size);
        start..start + binomial(self.universe_size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> CombinationTable {
        CombinationTable::build(12, 6).expect("standard table builds") // test: known-good input
    }

    #[test]
    fn test_standard_table_len() {
        assert_eq!(standard().len(), 2510);
        assert_eq!(expected_table_len(12, 6), 2510);
    }

    #[test]
    fn test_first_and_last_entries() {
        let table = standard();
        assert_eq!(table.get(0).map(Combination::as_slice), Some(&[0, 1, 2, 3, 4, 5][..]));
        assert_eq!(
            table.get(2509).map(Combination::as_slice),
            Some(&(0..12).collect::<Vec<_>>()[..])
        );
        assert!(table.get(2510).is_none());
    }

    #[test]
    fn test_entries_are_valid_and_unique() {
        let table = standard();
        let mut seen = std::collections::HashSet::new();
        for comb in table.iter() {
            assert!((6..=12).contains(&comb.len()));
            assert!(comb.as_slice().windows(2).all(|w| w[0] < w[1]));
            assert!(comb.iter().all(|i| i < 12));
            assert!(seen.insert(comb.clone()), "duplicate {}", comb);
        }
    }

    #[test]
    fn test_ordering_law() {
        let table = standard();
        let entries: Vec<_> = table.iter().collect();
        for pair in entries.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.len() < b.len() || (a.len() == b.len() && a.as_slice() < b.as_slice()),
                "{} must precede {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_group_boundaries() {
        let table = standard();
        // C(12,6) = 924 six-element subsets come first
        assert_eq!(table.size_range(6), 0..924);
        assert_eq!(table.get(923).map(Combination::as_slice), Some(&[6, 7, 8, 9, 10, 11][..]));
        assert_eq!(table.get(924).map(Combination::as_slice), Some(&[0, 1, 2, 3, 4, 5, 6][..]));
        assert_eq!(table.size_range(12), 2509..2510);
        assert_eq!(table.size_range(5), 0..0);
    }

    #[test]
    fn test_position_lookup() {
        let table = standard();
        assert_eq!(table.position_of(&[0, 1, 2, 3, 4, 5]), Some(0));
        assert_eq!(table.position_of(&[0, 1, 2, 3, 4, 6]), Some(1));
        assert_eq!(table.position_of(&(0..12).collect::<Vec<_>>()), Some(2509));
        assert_eq!(table.position_of(&[0, 1, 2]), None);
        assert_eq!(table.position_of(&[5, 4, 3, 2, 1, 0]), None);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = standard();
        let b = standard();
        assert!(a.iter().eq(b.iter()));
    }

    #[test]
    fn test_small_universes() {
        assert_eq!(CombinationTable::build(4, 1).map(|t| t.len()).ok(), Some(15));
        assert_eq!(CombinationTable::build(5, 5).map(|t| t.len()).ok(), Some(1));
        let table = CombinationTable::build(4, 2).expect("builds"); // test: known-good input
        let rendered: Vec<String> = table.iter().take(7).map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            ["[0, 1]", "[0, 2]", "[0, 3]", "[1, 2]", "[1, 3]", "[2, 3]", "[0, 1, 2]"]
        );
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            CombinationTable::build(12, 13),
            Err(FeatureTuiError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CombinationTable::build(12, 0),
            Err(FeatureTuiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_combination_from_sorted() {
        assert!(Combination::from_sorted(vec![0, 2, 5]).is_some());
        assert!(Combination::from_sorted(vec![0, 0, 5]).is_none());
        assert!(Combination::from_sorted(vec![3, 1]).is_none());
        let comb = Combination::from_sorted(vec![1, 4]).expect("sorted"); // test: known-good input
        assert!(comb.contains(4));
        assert!(!comb.contains(2));
    }
}
