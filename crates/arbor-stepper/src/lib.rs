//! Arbor Stepper
//!
//! Deterministic single-source minimum-spanning-tree construction, emitted
//! one observable micro-step at a time.
//!
//! # Algorithm
//!
//! An edge-list variant of Prim's algorithm with no priority queue. Each
//! round relaxes every edge that crosses the visited boundary, selects the
//! cheapest crossing edge whose weight equals the recorded distance of its
//! outside endpoint, and commits it. Every round yields two snapshots (the
//! edge under consideration, then the commit), bracketed by a start
//! announcement, a source-visit step, and a final summary.
//!
//! # Determinism
//!
//! Ties are broken by edge list order: the first edge encountered with the
//! globally smallest weight wins. Identical input always produces the
//! identical snapshot sequence, which is what makes recorded runs
//! replayable.
//!
//! # Snapshots
//!
//! Each [`AlgorithmState`] is fully owned. Later progress never mutates an
//! earlier snapshot, so a consumer can hold the whole sequence and navigate
//! it freely.

mod error;
mod prim;
mod state;

pub use error::{Error, Result};
pub use prim::{run, PrimStepper};
pub use state::{AlgorithmState, CrossingEdge, Direction, DistanceRow};
