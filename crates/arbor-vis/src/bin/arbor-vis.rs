//! Arbor Visualization Server
//!
//! Serve the graph editor API and run playback frontend surface.

use arbor_engine::EngineConfig;
use arbor_graph::{Graph, Position};
use arbor_vis::VisServer;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let port: u16 = args.get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let graph = demo_graph()?;

    println!("Arbor Graph Visualizer");
    println!("======================");
    println!();
    println!("Preloaded demo graph:");
    println!("  Nodes: {}", graph.node_count());
    println!("  Edges: {}", graph.edge_count());
    println!();
    println!("Starting visualization server on http://localhost:{}", port);
    println!("Connect a frontend to edit the graph and replay runs.");
    println!();

    let server = VisServer::new(graph, EngineConfig::default());
    server.serve(port).await?;

    Ok(())
}

/// A small undirected graph so a fresh server has something to run.
/// Weights come from the on-screen distances.
fn demo_graph() -> arbor_graph::Result<Graph> {
    let mut graph = Graph::new(false);
    let a = graph.add_node(Position::new(120.0, 80.0));
    let b = graph.add_node(Position::new(320.0, 80.0));
    let c = graph.add_node(Position::new(220.0, 240.0));
    let d = graph.add_node(Position::new(420.0, 240.0));
    let e = graph.add_node(Position::new(120.0, 320.0));

    for (from, to) in [(a, b), (a, c), (b, c), (b, d), (c, d), (c, e)] {
        graph.connect(from, to)?;
    }
    Ok(graph)
}
