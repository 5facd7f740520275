//! Replay transport scenarios: navigating a recorded timeline.

use std::time::Duration;

use arbor_engine::{RunController, RunPhase};
use arbor_graph::NodeId;

use crate::support::{completed_run, start, wait_for_log_len, wait_for_phase};
use crate::{fast_config, path_graph, triangle_graph};

#[tokio::test]
async fn pause_navigate_resume_keeps_the_timeline_intact() {
    let config = fast_config().with_base_interval(Duration::from_millis(20));
    let controller = RunController::new(config);
    let graph = path_graph(5).unwrap();

    start(&controller, &graph, NodeId(0)).await;
    wait_for_log_len(&controller, 3).await;
    controller.pause();

    // While paused the recorded prefix is freely navigable.
    let parked = controller.status().current_index.unwrap();
    assert!(controller.step_backward().await);
    let back = controller.status().current_index.unwrap();
    assert_eq!(back, parked - 1);
    assert_eq!(
        controller.current_state(),
        controller.state_at(back).await
    );
    assert!(controller.step_forward().await);

    controller.resume();
    wait_for_phase(&controller, RunPhase::Completed).await;

    // The full timeline arrived despite the detour.
    let log = controller.log().await;
    assert_eq!(log.len(), 2 * graph.node_count() + 1);
    assert_eq!(controller.status().current_index, Some(log.len() - 1));
}

#[tokio::test]
async fn rewind_restores_deep_equal_snapshots() {
    let graph = path_graph(4).unwrap();
    let controller = completed_run(&graph, NodeId(0)).await;
    let log = controller.log().await;

    // Walk backward to the start, checking every restored state against the
    // recorded one, then forward again to the end.
    for expected in (0..log.len() - 1).rev() {
        assert!(controller.step_backward().await);
        assert_eq!(controller.status().current_index, Some(expected));
        assert_eq!(controller.current_state().as_ref(), Some(&log[expected]));
    }
    assert!(!controller.step_backward().await);

    for expected in 1..log.len() {
        assert!(controller.step_forward().await);
        assert_eq!(controller.current_state().as_ref(), Some(&log[expected]));
    }
    assert!(!controller.step_forward().await);
}

#[tokio::test]
async fn seek_jumps_anywhere_in_the_recorded_range() {
    let graph = path_graph(6).unwrap();
    let controller = completed_run(&graph, NodeId(0)).await;
    let log = controller.log().await;

    assert!(controller.seek(0).await);
    assert_eq!(controller.current_state().as_ref(), Some(&log[0]));

    assert!(controller.seek(log.len() / 2).await);
    assert_eq!(
        controller.current_state().as_ref(),
        Some(&log[log.len() / 2])
    );

    // Out-of-range indexes clamp to the last state.
    assert!(controller.seek(usize::MAX).await);
    assert_eq!(controller.status().current_index, Some(log.len() - 1));
}

#[tokio::test]
async fn hold_walks_the_timeline_in_both_directions() {
    let graph = triangle_graph().unwrap();
    let controller = completed_run(&graph, NodeId(0)).await;
    let end = controller.log_len().await - 1;

    controller.hold_backward().await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    controller.release_hold().await;
    assert_eq!(controller.status().current_index, Some(0));

    controller.hold_forward().await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    controller.release_hold().await;
    assert_eq!(controller.status().current_index, Some(end));
}

#[tokio::test]
async fn cancel_keeps_the_partial_timeline_navigable() {
    let config = fast_config().with_base_interval(Duration::from_millis(20));
    let controller = RunController::new(config);
    let graph = path_graph(8).unwrap();

    start(&controller, &graph, NodeId(0)).await;
    wait_for_log_len(&controller, 4).await;
    controller.cancel();
    assert_eq!(controller.phase(), RunPhase::Idle);

    let len = controller.log_len().await;
    assert!(len >= 4);

    // The preserved prefix replays like a finished run.
    assert!(controller.seek(0).await);
    assert!(controller.step_forward().await);
    assert_eq!(controller.status().current_index, Some(1));

    // A reset discards it.
    controller.reset().await;
    assert_eq!(controller.log_len().await, 0);
    assert!(!controller.step_forward().await);
}
