//! The stepper itself.
//!
//! `PrimStepper` is a lazy iterator over algorithm snapshots. Pulling the
//! next item advances the algorithm by exactly one observable step, so the
//! caller decides the pacing; the stepper never blocks or waits.

use std::collections::{BTreeSet, HashMap, HashSet};

use arbor_graph::{Edge, Node, NodeId};

use crate::error::{Error, Result};
use crate::state::{AlgorithmState, CrossingEdge, Direction, DistanceRow};

/// Build a stepper for the given graph snapshot.
///
/// Validates that node ids are unique, that every edge endpoint exists, and
/// that the source exists when the node list is non-empty. An empty node
/// list is not an error; the resulting stepper yields no states.
pub fn run(nodes: &[Node], edges: &[Edge], directed: bool, source: NodeId) -> Result<PrimStepper> {
    PrimStepper::new(nodes, edges, directed, source)
}

/// Where the stepper is between two emissions.
enum Stage {
    Announce,
    VisitSource,
    Scan,
    Commit { chosen: CrossingEdge },
    Done,
}

/// Incremental MST construction over a fixed graph snapshot.
///
/// Ties between equally cheap crossing edges are broken by edge list order:
/// the first edge encountered wins. The forward orientation of an edge is
/// checked before the backward one.
pub struct PrimStepper {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    directed: bool,
    source: NodeId,
    visited: BTreeSet<NodeId>,
    mst_edges: Vec<Edge>,
    distances: HashMap<NodeId, f64>,
    previous: HashMap<NodeId, NodeId>,
    stage: Stage,
    step: u64,
}

impl PrimStepper {
    /// See [`run`].
    pub fn new(nodes: &[Node], edges: &[Edge], directed: bool, source: NodeId) -> Result<Self> {
        let mut ids = HashSet::new();
        for node in nodes {
            if !ids.insert(node.id) {
                return Err(Error::DuplicateNode(node.id));
            }
        }
        for edge in edges {
            for endpoint in [edge.from, edge.to] {
                if !ids.contains(&endpoint) {
                    return Err(Error::UnknownNode(endpoint));
                }
            }
        }

        let stage = if nodes.is_empty() {
            Stage::Done
        } else {
            if !ids.contains(&source) {
                return Err(Error::UnknownSource(source));
            }
            Stage::Announce
        };

        let mut distances = HashMap::new();
        if !nodes.is_empty() {
            distances.insert(source, 0.0);
        }

        Ok(Self {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            directed,
            source,
            visited: BTreeSet::new(),
            mst_edges: Vec::new(),
            distances,
            previous: HashMap::new(),
            stage,
            step: 2,
        })
    }

    /// Upper bound on the number of states this stepper can emit.
    ///
    /// Two lead-in states, two per committed edge, and a summary.
    pub fn max_states(&self) -> usize {
        if self.nodes.is_empty() {
            0
        } else {
            2 * self.nodes.len() + 1
        }
    }

    fn distance(&self, id: NodeId) -> f64 {
        self.distances.get(&id).copied().unwrap_or(f64::INFINITY)
    }

    fn name_of(&self, id: NodeId) -> &str {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.name.as_str())
            .unwrap_or("?")
    }

    /// Relax every edge crossing the visited boundary; returns the nodes
    /// whose tentative distance improved.
    fn relax_round(&mut self) -> BTreeSet<NodeId> {
        let mut relaxed = BTreeSet::new();
        for i in 0..self.edges.len() {
            let edge = self.edges[i];
            if self.visited.contains(&edge.from) && !self.visited.contains(&edge.to) {
                if edge.weight < self.distance(edge.to) {
                    self.distances.insert(edge.to, edge.weight);
                    self.previous.insert(edge.to, edge.from);
                    relaxed.insert(edge.to);
                }
            } else if !self.directed
                && self.visited.contains(&edge.to)
                && !self.visited.contains(&edge.from)
                && edge.weight < self.distance(edge.from)
            {
                self.distances.insert(edge.from, edge.weight);
                self.previous.insert(edge.from, edge.to);
                relaxed.insert(edge.from);
            }
        }
        relaxed
    }

    /// Pick the cheapest crossing edge whose weight equals the recorded
    /// distance of its outside endpoint. First match at the minimum wins.
    fn select(&self) -> Option<CrossingEdge> {
        let mut best: Option<CrossingEdge> = None;
        let mut min_weight = f64::INFINITY;
        for edge in &self.edges {
            if self.visited.contains(&edge.from) && !self.visited.contains(&edge.to) {
                if edge.weight == self.distance(edge.to) && edge.weight < min_weight {
                    min_weight = edge.weight;
                    best = Some(CrossingEdge {
                        edge: *edge,
                        direction: Direction::Forward,
                    });
                }
            } else if !self.directed
                && self.visited.contains(&edge.to)
                && !self.visited.contains(&edge.from)
                && edge.weight == self.distance(edge.from)
                && edge.weight < min_weight
            {
                min_weight = edge.weight;
                best = Some(CrossingEdge {
                    edge: *edge,
                    direction: Direction::Backward,
                });
            }
        }
        best
    }

    fn snapshot(
        &self,
        current_edge: Option<CrossingEdge>,
        changed_nodes: BTreeSet<NodeId>,
        label: String,
    ) -> AlgorithmState {
        let distance_table = self
            .nodes
            .iter()
            .map(|node| {
                let d = self.distance(node.id);
                DistanceRow {
                    node_id: node.id,
                    node_name: node.name.clone(),
                    visited: self.visited.contains(&node.id),
                    distance: d.is_finite().then_some(d),
                    previous: self.previous.get(&node.id).map(|p| self.name_of(*p).to_string()),
                }
            })
            .collect();

        AlgorithmState {
            visited: self.visited.clone(),
            mst_edges: self.mst_edges.clone(),
            current_edge,
            distance_table,
            changed_nodes,
            label,
        }
    }

    fn summary(&self) -> AlgorithmState {
        let total: f64 = self.mst_edges.iter().map(|e| e.weight).sum();
        let label = format!(
            "Algorithm complete! MST has {} edges with total weight: {}",
            self.mst_edges.len(),
            total
        );
        self.snapshot(None, BTreeSet::new(), label)
    }
}

impl Iterator for PrimStepper {
    type Item = AlgorithmState;

    fn next(&mut self) -> Option<AlgorithmState> {
        match std::mem::replace(&mut self.stage, Stage::Done) {
            Stage::Announce => {
                self.stage = Stage::VisitSource;
                Some(self.snapshot(
                    None,
                    BTreeSet::new(),
                    "Starting Prim's Algorithm...".to_string(),
                ))
            }
            Stage::VisitSource => {
                self.visited.insert(self.source);
                self.stage = Stage::Scan;
                let label = format!("Step 1: Starting from node {}", self.name_of(self.source));
                Some(self.snapshot(None, BTreeSet::from([self.source]), label))
            }
            Stage::Scan => {
                if self.visited.len() >= self.nodes.len() {
                    return Some(self.summary());
                }
                let relaxed = self.relax_round();
                match self.select() {
                    Some(chosen) => {
                        let label = format!(
                            "Step {}: Considering edge ({}, {}) with weight {}",
                            self.step,
                            self.name_of(chosen.edge.from),
                            self.name_of(chosen.edge.to),
                            chosen.edge.weight
                        );
                        let state = self.snapshot(Some(chosen), relaxed, label);
                        self.stage = Stage::Commit { chosen };
                        Some(state)
                    }
                    // No crossing edge left: the rest is unreachable.
                    None => Some(self.summary()),
                }
            }
            Stage::Commit { chosen } => {
                let target = chosen.outside();
                self.visited.insert(target);
                self.mst_edges.push(chosen.edge);
                let label = format!(
                    "Step {}: Added edge ({}, {}) to MST. Node {} is now visited.",
                    self.step + 1,
                    self.name_of(chosen.edge.from),
                    self.name_of(chosen.edge.to),
                    self.name_of(target)
                );
                self.step += 2;
                self.stage = Stage::Scan;
                Some(self.snapshot(None, BTreeSet::from([target]), label))
            }
            Stage::Done => None,
        }
    }
}
