//! Full-run scenarios through the paced engine.

use std::time::Duration;

use arbor_engine::{RunController, RunPhase};
use arbor_graph::NodeId;

use crate::support::{completed_run, start, wait_for_log_len, wait_for_phase};
use crate::{fast_config, path_graph, split_graph, triangle_graph};

#[tokio::test]
async fn paced_runs_are_deterministic() {
    let graph = path_graph(6).unwrap();
    let first = completed_run(&graph, NodeId(0)).await;
    let second = completed_run(&graph, NodeId(0)).await;

    let reference: Vec<_> =
        arbor_stepper::run(graph.nodes(), graph.edges(), graph.directed(), NodeId(0))
            .unwrap()
            .collect();
    assert_eq!(first.log().await, reference);
    assert_eq!(second.log().await, reference);
}

#[tokio::test]
async fn the_worked_triangle_run() {
    let graph = triangle_graph().unwrap();
    let controller = completed_run(&graph, NodeId(0)).await;
    let log = controller.log().await;

    let labels: Vec<_> = log.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Starting Prim's Algorithm...",
            "Step 1: Starting from node 0",
            "Step 2: Considering edge (0, 1) with weight 5",
            "Step 3: Added edge (0, 1) to MST. Node 1 is now visited.",
            "Step 4: Considering edge (1, 2) with weight 3",
            "Step 5: Added edge (1, 2) to MST. Node 2 is now visited.",
            "Algorithm complete! MST has 2 edges with total weight: 8",
        ]
    );

    let last = log.last().unwrap();
    assert_eq!(last.mst_edges.len(), 2);
    assert_eq!(last.total_weight(), 8.0);
    assert_eq!(controller.status().current_index, Some(log.len() - 1));
}

#[tokio::test]
async fn disconnected_graphs_complete_with_a_partial_forest() {
    let graph = split_graph().unwrap();
    let controller = completed_run(&graph, NodeId(0)).await;

    let last = controller.current_state().unwrap();
    // Only the triangle component is reachable from node 0.
    assert_eq!(last.visited.len(), 3);
    assert_eq!(last.mst_edges.len(), 2);
    assert_eq!(
        last.label,
        "Algorithm complete! MST has 2 edges with total weight: 8"
    );
}

#[tokio::test]
async fn the_recorded_log_grows_monotonically() {
    let graph = path_graph(8).unwrap();
    let controller = completed_run(&graph, NodeId(0)).await;
    let log = controller.log().await;

    assert_eq!(log.len(), 2 * graph.node_count() + 1);
    for pair in log.windows(2) {
        assert!(pair[0].visited.is_subset(&pair[1].visited));
        let prefix = pair[0].mst_edges.len();
        assert_eq!(&pair[1].mst_edges[..prefix], &pair[0].mst_edges[..]);
    }
}

#[tokio::test]
async fn a_cleared_graph_refuses_to_run() {
    let mut graph = triangle_graph().unwrap();
    graph.clear();

    let controller = RunController::new(fast_config());
    let started = controller
        .begin_run(graph.nodes(), graph.edges(), graph.directed(), NodeId(0))
        .await
        .unwrap();

    assert!(!started);
    assert_eq!(controller.phase(), RunPhase::Idle);
    assert_eq!(controller.log_len().await, 0);
}

#[tokio::test]
async fn a_run_started_after_cancel_owns_the_log() {
    let slow = fast_config().with_base_interval(Duration::from_millis(30));
    let controller = RunController::new(slow);
    let long = path_graph(10).unwrap();
    let short = triangle_graph().unwrap();

    start(&controller, &long, NodeId(0)).await;
    wait_for_log_len(&controller, 3).await;
    controller.cancel();

    // The second run replaces the preserved log entirely; nothing from the
    // cancelled driver may leak into it.
    start(&controller, &short, NodeId(0)).await;
    wait_for_phase(&controller, RunPhase::Completed).await;

    let reference: Vec<_> =
        arbor_stepper::run(short.nodes(), short.edges(), short.directed(), NodeId(0))
            .unwrap()
            .collect();
    assert_eq!(controller.log().await, reference);
}

#[tokio::test]
async fn directedness_changes_reachability() {
    let mut graph = arbor_graph::Graph::new(true);
    let a = graph.add_node(arbor_graph::Position::new(0.0, 0.0));
    let b = graph.add_node(arbor_graph::Position::new(80.0, 0.0));
    let c = graph.add_node(arbor_graph::Position::new(160.0, 0.0));
    graph.add_edge(b, a, 1.0).unwrap();
    graph.add_edge(a, c, 4.0).unwrap();

    let controller = completed_run(&graph, a).await;
    let directed_final = controller.current_state().unwrap();
    assert_eq!(directed_final.visited.len(), 2);

    // The same edges span everything once direction is ignored.
    controller.reset().await;
    graph.set_directed(false);
    start(&controller, &graph, a).await;
    wait_for_phase(&controller, RunPhase::Completed).await;

    let undirected_final = controller.current_state().unwrap();
    assert_eq!(undirected_final.visited.len(), 3);
    assert_eq!(undirected_final.mst_edges.len(), 2);
}
