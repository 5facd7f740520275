//! Arbor Engine
//!
//! Paced execution and replay of recorded algorithm runs.
//!
//! The engine owns the run lifecycle. [`RunController::begin_run`] snapshots
//! a graph, spawns a driver task that pulls states from the stepper at a
//! configurable pace, and records every state in an append-only log. While
//! the driver is running the published status follows the live tail; once the
//! run is paused, completed or cancelled the log becomes a timeline that can
//! be stepped, held and sought like a transport.
//!
//! Consumers observe the engine through a [`tokio::sync::watch`] channel:
//! [`RunController::subscribe`] yields a receiver that always carries the
//! latest [`EngineStatus`]. There is no event queue to drain and a slow
//! consumer only ever misses intermediate frames, never the current one.

mod config;
mod controller;
mod status;

pub use config::EngineConfig;
pub use controller::{HoldDirection, RunController};
pub use status::{EngineStatus, RunPhase};
