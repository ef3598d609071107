//! Selection logic
//!
//! Pure, stateless resolution of user selections against the startup-built
//! combination table and metrics.

pub mod resolver;

pub use resolver::{metrics_summary, normalize_selection, parse_selection, resolve, Resolution};
