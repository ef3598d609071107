//! Combination engine
//!
//! Builds the immutable, ordered table of feature subsets that addresses the
//! precomputed models.

pub mod combinations;
