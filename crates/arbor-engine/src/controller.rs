//! The run controller.
//!
//! One state machine object owns the whole run lifecycle: the driver task
//! that paces the stepper, the pause gate, cancellation, and the replay
//! transport over the recorded log. All mutable run state lives behind this
//! controller; callers hold cheap clones of it.
//!
//! # Generations
//!
//! Every `begin_run`, `cancel` and `reset` bumps a generation counter on a
//! watch channel. The driver task checks the generation before every append
//! and publish and at every suspension point, so a driver from a cancelled
//! run can never write into a newer run's log or status, even if it is
//! still winding down.

use std::iter::Peekable;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arbor_graph::{Edge, Node, NodeId};
use arbor_stepper::{AlgorithmState, PrimStepper};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::status::{EngineStatus, RunPhase};

/// Which way a hold auto-repeats through the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldDirection {
    Forward,
    Backward,
}

/// Handle to the run state machine.
///
/// Cloning is cheap; all clones share the same run. Operations that arrive
/// in the wrong phase are silent no-ops, matching an interactive surface
/// where buttons can always be pressed. Only malformed graph input raises an
/// error.
#[derive(Clone)]
pub struct RunController {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    /// The run log. The driver task is the only writer.
    log: RwLock<Vec<AlgorithmState>>,
    /// Published status; every observable change goes through here.
    status: watch::Sender<EngineStatus>,
    /// Run generation fence.
    run_seq: watch::Sender<u64>,
    /// Pause gate for the driver.
    paused: watch::Sender<bool>,
    speed: AtomicU32,
    boost: AtomicBool,
    /// The active hold auto-repeat task, if any.
    hold: Mutex<Option<JoinHandle<()>>>,
}

impl EngineInner {
    /// Interval between published states, sampled at the start of each wait.
    fn pacing_interval(&self) -> Duration {
        let speed = if self.boost.load(Ordering::Relaxed) {
            self.speed.load(Ordering::Relaxed).max(1)
        } else {
            1
        };
        self.config.base_interval / speed
    }

    /// Interval between hold auto-repeat steps, sampled when the hold starts.
    fn repeat_interval(&self) -> Duration {
        self.config.base_interval / self.speed.load(Ordering::Relaxed).max(1)
    }

    fn bump_seq(&self) {
        let next = *self.run_seq.borrow() + 1;
        self.run_seq.send_replace(next);
    }
}

impl RunController {
    /// Create a controller with the given timing configuration.
    pub fn new(config: EngineConfig) -> Self {
        let speed = config.speed_multiplier.max(1);
        let (status, _) = watch::channel(EngineStatus::idle(speed));
        let (run_seq, _) = watch::channel(0u64);
        let (paused, _) = watch::channel(false);

        Self {
            inner: Arc::new(EngineInner {
                config,
                log: RwLock::new(Vec::new()),
                status,
                run_seq,
                paused,
                speed: AtomicU32::new(speed),
                boost: AtomicBool::new(false),
                hold: Mutex::new(None),
            }),
        }
    }

    /// The timing configuration this controller was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Subscribe to status updates. The receiver always starts with the
    /// current status.
    pub fn subscribe(&self) -> watch::Receiver<EngineStatus> {
        self.inner.status.subscribe()
    }

    /// The current published status.
    pub fn status(&self) -> EngineStatus {
        self.inner.status.borrow().clone()
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.inner.status.borrow().phase
    }

    /// The current state snapshot, if a run has published anything.
    pub fn current_state(&self) -> Option<AlgorithmState> {
        self.inner.status.borrow().state.clone()
    }

    /// Number of states recorded so far.
    pub async fn log_len(&self) -> usize {
        self.inner.log.read().await.len()
    }

    /// The recorded state at the given index.
    pub async fn state_at(&self, index: usize) -> Option<AlgorithmState> {
        self.inner.log.read().await.get(index).cloned()
    }

    /// The full recorded timeline.
    pub async fn log(&self) -> Vec<AlgorithmState> {
        self.inner.log.read().await.clone()
    }

    /// Start a run over the given graph snapshot.
    ///
    /// Returns `Ok(false)` without touching anything when the graph is empty
    /// or when the controller is not idle; a completed run must be reset
    /// first. Malformed input (unknown edge endpoints, unknown source,
    /// duplicate ids) is an error.
    ///
    /// On acceptance the opening state is recorded and published before this
    /// method returns; a driver task paces out the rest.
    pub async fn begin_run(
        &self,
        nodes: &[Node],
        edges: &[Edge],
        directed: bool,
        source: NodeId,
    ) -> arbor_stepper::Result<bool> {
        if nodes.is_empty() {
            debug!("Ignoring run request for an empty graph");
            return Ok(false);
        }

        let mut stepper = PrimStepper::new(nodes, edges, directed, source)?.peekable();
        let Some(first) = stepper.next() else {
            return Ok(false);
        };

        // The idle check and the transition to Running are one atomic status
        // update; two racing calls cannot both observe Idle. The opening
        // state is published in the same update.
        let mut phase = RunPhase::Idle;
        let accepted = self.inner.status.send_if_modified(|s| {
            phase = s.phase;
            if phase != RunPhase::Idle {
                return false;
            }
            s.phase = RunPhase::Running;
            s.current_index = Some(0);
            s.log_len = 1;
            s.state = Some(first.clone());
            true
        });
        if !accepted {
            debug!(%phase, "Ignoring run request while not idle");
            return Ok(false);
        }

        self.inner.bump_seq();
        let seq = *self.inner.run_seq.borrow();
        {
            let mut log = self.inner.log.write().await;
            if *self.inner.run_seq.borrow() == seq {
                log.clear();
                log.push(first);
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            directed,
            source = %source,
            "Starting run"
        );

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            drive(inner, stepper, seq).await;
        });
        Ok(true)
    }

    /// Freeze log growth. Only meaningful while running.
    pub fn pause(&self) {
        if self.inner.status.borrow().phase != RunPhase::Running {
            return;
        }
        self.inner.paused.send_replace(true);
        self.inner.status.send_modify(|s| s.phase = RunPhase::Paused);
        debug!("Run paused");
    }

    /// Resume a paused run.
    pub fn resume(&self) {
        if self.inner.status.borrow().phase != RunPhase::Paused {
            return;
        }
        self.inner.paused.send_replace(false);
        self.inner.status.send_modify(|s| s.phase = RunPhase::Running);
        debug!("Run resumed");
    }

    /// Set the speed multiplier, clamped to at least 1. Applies to waits
    /// that start after the change.
    pub fn set_speed_multiplier(&self, multiplier: u32) {
        let clamped = multiplier.max(1);
        self.inner.speed.store(clamped, Ordering::SeqCst);
        self.inner
            .status
            .send_modify(|s| s.speed_multiplier = clamped);
    }

    /// Engage or release the speed boost. While engaged the driver paces at
    /// `base_interval / speed_multiplier`.
    pub fn set_boost(&self, active: bool) {
        self.inner.boost.store(active, Ordering::SeqCst);
        self.inner.status.send_modify(|s| s.boost = active);
    }

    /// Abandon the active run, keeping the log as far as it progressed.
    ///
    /// The recorded states stay navigable; `reset` discards them.
    pub fn cancel(&self) {
        if !self.inner.status.borrow().phase.is_active() {
            return;
        }
        self.inner.bump_seq();
        self.inner.paused.send_replace(false);
        self.inner.status.send_modify(|s| s.phase = RunPhase::Idle);
        debug!("Run cancelled, log preserved");
    }

    /// Discard the run log and return to a pristine idle state.
    ///
    /// Cancels any driver, releases any hold, and clears pause and boost.
    /// The speed multiplier is kept.
    pub async fn reset(&self) {
        self.inner.bump_seq();
        self.release_hold().await;
        self.inner.paused.send_replace(false);
        self.inner.boost.store(false, Ordering::SeqCst);
        self.inner.log.write().await.clear();
        self.inner.status.send_modify(|s| {
            s.phase = RunPhase::Idle;
            s.current_index = None;
            s.log_len = 0;
            s.boost = false;
            s.state = None;
        });
        debug!("Engine reset");
    }

    /// Move the current state one step toward the end of the log.
    ///
    /// No-op while running, on an empty log, or at the last state. Returns
    /// whether the index moved.
    pub async fn step_forward(&self) -> bool {
        let Some((current, len)) = self.navigable().await else {
            return false;
        };
        if current + 1 >= len {
            return false;
        }
        self.restore(current + 1).await
    }

    /// Move the current state one step toward the start of the log.
    pub async fn step_backward(&self) -> bool {
        let Some((current, _)) = self.navigable().await else {
            return false;
        };
        if current == 0 {
            return false;
        }
        self.restore(current - 1).await
    }

    /// Jump to an arbitrary log index, clamped to the recorded range.
    pub async fn seek(&self, index: usize) -> bool {
        let Some((current, len)) = self.navigable().await else {
            return false;
        };
        let clamped = index.min(len - 1);
        if clamped == current {
            return false;
        }
        self.restore(clamped).await
    }

    /// Step once in the given direction. Same rules as the directional
    /// methods.
    pub async fn step(&self, direction: HoldDirection) -> bool {
        match direction {
            HoldDirection::Forward => self.step_forward().await,
            HoldDirection::Backward => self.step_backward().await,
        }
    }

    /// See [`hold`](Self::hold).
    pub async fn hold_forward(&self) {
        self.hold(HoldDirection::Forward).await;
    }

    /// See [`hold`](Self::hold).
    pub async fn hold_backward(&self) {
        self.hold(HoldDirection::Backward).await;
    }

    /// Step once, then auto-repeat after the debounce until released or the
    /// log boundary is reached.
    ///
    /// The repeat interval is `base_interval / speed_multiplier`, sampled
    /// when the hold starts. Starting a new hold releases the previous one;
    /// a hold that cannot move stops without arming the repeat.
    pub async fn hold(&self, direction: HoldDirection) {
        self.release_hold().await;

        if !self.step(direction).await {
            return;
        }

        let controller = self.clone();
        let debounce = self.inner.config.hold_debounce;
        let interval = self.inner.repeat_interval();
        trace!(?direction, ?interval, "Hold engaged");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            loop {
                tokio::time::sleep(interval).await;
                if !controller.step(direction).await {
                    break;
                }
            }
        });
        *self.inner.hold.lock().await = Some(handle);
    }

    /// Stop any hold auto-repeat. Safe to call at any time, repeatedly.
    pub async fn release_hold(&self) {
        if let Some(handle) = self.inner.hold.lock().await.take() {
            handle.abort();
            trace!("Hold released");
        }
    }

    /// Where transport navigation currently stands, if it is permitted.
    /// The live tail owns the current state while running.
    async fn navigable(&self) -> Option<(usize, usize)> {
        let (phase, current) = {
            let status = self.inner.status.borrow();
            (status.phase, status.current_index)
        };
        if phase == RunPhase::Running {
            return None;
        }
        let len = self.inner.log.read().await.len();
        if len == 0 {
            return None;
        }
        Some((current.unwrap_or(0), len))
    }

    /// Replace the published current state with the stored snapshot.
    async fn restore(&self, index: usize) -> bool {
        let (state, len) = {
            let log = self.inner.log.read().await;
            (log.get(index).cloned(), log.len())
        };
        let Some(state) = state else {
            return false;
        };
        self.inner.status.send_modify(|s| {
            s.current_index = Some(index);
            s.log_len = len;
            s.state = Some(state);
        });
        trace!(index, "Restored snapshot");
        true
    }
}

impl Default for RunController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// The driver task. Paces out the states the run has left, records and
/// publishes each one, and observes pause and cancellation between pulls.
/// The last state and the `Completed` phase go out in a single status
/// update, so the published current state at completion is always the
/// closing summary.
async fn drive(inner: Arc<EngineInner>, mut stepper: Peekable<PrimStepper>, seq: u64) {
    let mut seq_rx = inner.run_seq.subscribe();
    let mut pause_rx = inner.paused.subscribe();

    loop {
        // Speed changes affect future waits; sample the interval here.
        let wait = inner.pacing_interval();
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = seq_rx.changed() => {
                if *seq_rx.borrow() != seq {
                    return;
                }
            }
        }

        // Block while paused, waking on resume or cancellation.
        loop {
            if *seq_rx.borrow() != seq {
                return;
            }
            if !*pause_rx.borrow_and_update() {
                break;
            }
            tokio::select! {
                _ = pause_rx.changed() => {}
                _ = seq_rx.changed() => {}
            }
        }

        let Some(state) = stepper.next() else {
            return;
        };
        let done = stepper.peek().is_none();

        let index = {
            let mut log = inner.log.write().await;
            if *seq_rx.borrow() != seq {
                return;
            }
            log.push(state.clone());
            log.len() - 1
        };
        let published = inner.status.send_if_modified(|s| {
            if *inner.run_seq.borrow() != seq || !s.phase.is_active() {
                return false;
            }
            if done {
                s.phase = RunPhase::Completed;
            }
            s.current_index = Some(index);
            s.log_len = index + 1;
            s.state = Some(state);
            true
        });
        if !published {
            return;
        }
        trace!(index, "Published state");

        if done {
            debug!("Run completed");
            return;
        }
    }
}
