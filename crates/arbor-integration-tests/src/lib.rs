//! Cross-crate scenario tests.
//!
//! Exercises the graph model, the stepper and the engine together the way a
//! frontend would: edit a graph, run it at a pace, pause, navigate, cancel,
//! run again. Shared fixtures live here; the scenarios are in the test
//! modules.

use arbor_engine::EngineConfig;
use arbor_graph::{Graph, Position, Result};

#[cfg(test)]
mod engine_scenarios;
#[cfg(test)]
mod support;
#[cfg(test)]
mod transport_scenarios;

/// The worked three-node example: weights 5, 3 and 10 around a triangle.
/// From node 0 the tree takes (0, 1) then (1, 2) for a total of 8.
pub fn triangle_graph() -> Result<Graph> {
    let mut g = Graph::new(false);
    let a = g.add_node(Position::new(0.0, 0.0));
    let b = g.add_node(Position::new(100.0, 0.0));
    let c = g.add_node(Position::new(0.0, 100.0));
    g.add_edge(a, b, 5.0)?;
    g.add_edge(b, c, 3.0)?;
    g.add_edge(a, c, 10.0)?;
    Ok(g)
}

/// A path of `n` nodes with strictly increasing weights, so the expected
/// tree is the path itself.
pub fn path_graph(n: usize) -> Result<Graph> {
    let mut g = Graph::new(false);
    let ids: Vec<_> = (0..n)
        .map(|i| g.add_node(Position::new(i as f64 * 60.0, 0.0)))
        .collect();
    for pair in ids.windows(2) {
        let weight = pair[0].0 as f64 + 1.0;
        g.add_edge(pair[0], pair[1], weight)?;
    }
    Ok(g)
}

/// Two components: a triangle on nodes 0..3 and a detached pair on 3..5.
pub fn split_graph() -> Result<Graph> {
    let mut g = triangle_graph()?;
    let d = g.add_node(Position::new(400.0, 0.0));
    let e = g.add_node(Position::new(400.0, 100.0));
    g.add_edge(d, e, 1.0)?;
    Ok(g)
}

/// Engine timing suitable for tests.
pub fn fast_config() -> EngineConfig {
    EngineConfig::fast()
}
