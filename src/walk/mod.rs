// src/walk/mod.rs
// =============================================================================
// This module walks linked-data graphs.
//
// Features:
// - Breadth-first walk starting from one URI, following object URIs
// - Closed set so every URI is fetched at most once per walk
// - Pluggable filter deciding which triples are visited and followed
// - Optional concurrent fetching that keeps the sequential visit order
// - Optional cancellation between fetch rounds
// =============================================================================

mod filter;
mod walker;

pub use filter::{Admit, AdmitAll, ObjectIsUri, PredicateIn};
pub use walker::{WalkConfig, WalkError, WalkStats, Walker};
