//! Helpers shared by the scenario modules.

use std::time::Duration;

use arbor_engine::{RunController, RunPhase};
use arbor_graph::{Graph, NodeId};

use crate::fast_config;

/// Start a run over the given graph and assert that it was accepted.
pub async fn start(controller: &RunController, graph: &Graph, source: NodeId) {
    let started = controller
        .begin_run(graph.nodes(), graph.edges(), graph.directed(), source)
        .await
        .unwrap();
    assert!(started, "run was refused");
}

/// Block until the controller publishes the given phase.
pub async fn wait_for_phase(controller: &RunController, phase: RunPhase) {
    let mut rx = controller.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if rx.borrow_and_update().phase == phase {
                break;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
}

/// Block until at least `len` states have been recorded.
pub async fn wait_for_log_len(controller: &RunController, len: usize) {
    let mut rx = controller.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if rx.borrow_and_update().log_len >= len {
                break;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
}

/// Run the graph to completion on a fresh fast engine.
pub async fn completed_run(graph: &Graph, source: NodeId) -> RunController {
    let controller = RunController::new(fast_config());
    start(&controller, graph, source).await;
    wait_for_phase(&controller, RunPhase::Completed).await;
    controller
}
