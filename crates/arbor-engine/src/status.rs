//! Published run status.

use arbor_stepper::AlgorithmState;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the run controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run is active. The log may still hold a cancelled run.
    Idle,
    /// The driver is pulling and publishing states.
    Running,
    /// The driver is blocked; the log is frozen and navigable.
    Paused,
    /// The stepper is exhausted; the log is final and navigable.
    Completed,
}

impl RunPhase {
    /// Whether a driver task currently owns the run.
    pub fn is_active(&self) -> bool {
        matches!(self, RunPhase::Running | RunPhase::Paused)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Status snapshot published on every observable change.
///
/// `state` is the full current snapshot, never a partial one: the controller
/// publishes a state only after it is completely built and logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub phase: RunPhase,
    /// Index of the current state within the log, if any state is current.
    pub current_index: Option<usize>,
    pub log_len: usize,
    pub speed_multiplier: u32,
    /// Whether the speed boost is currently held.
    pub boost: bool,
    pub state: Option<AlgorithmState>,
}

impl EngineStatus {
    /// The status of a controller with no run and an empty log.
    pub fn idle(speed_multiplier: u32) -> Self {
        Self {
            phase: RunPhase::Idle,
            current_index: None,
            log_len: 0,
            speed_multiplier,
            boost: false,
            state: None,
        }
    }
}
