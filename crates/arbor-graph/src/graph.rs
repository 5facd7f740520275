//! The mutable graph document.
//!
//! A graph owns insertion-ordered node and edge lists plus the directedness
//! flag and the id counter. All editing goes through methods so the
//! invariants (stable ids, no self-loops, no duplicate pairs) hold at every
//! point a caller can observe.

use std::collections::HashSet;

use crate::edge::{default_weight, Edge};
use crate::error::{Error, Result};
use crate::node::{Node, NodeId, Position};

/// A weighted graph under interactive editing.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    directed: bool,
    next_id: u64,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    /// Build a graph from plain node and edge lists.
    ///
    /// Validates the same invariants as incremental editing: node ids must be
    /// unique, edge endpoints must exist, and self-loops and duplicate pairs
    /// are rejected. The id counter resumes above the largest id present.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, directed: bool) -> Result<Self> {
        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.id) {
                return Err(Error::DuplicateNode(node.id));
            }
        }
        for (i, edge) in edges.iter().enumerate() {
            for endpoint in [edge.from, edge.to] {
                if !seen.contains(&endpoint) {
                    return Err(Error::UnknownNode(endpoint));
                }
            }
            if edge.is_self_loop() {
                return Err(Error::SelfLoop(edge.from));
            }
            if edges[..i].iter().any(|e| e.connects(edge.from, edge.to, directed)) {
                return Err(Error::DuplicateEdge(edge.from, edge.to));
            }
        }
        let next_id = nodes.iter().map(|n| n.id.0 + 1).max().unwrap_or(0);
        Ok(Self {
            nodes,
            edges,
            directed,
            next_id,
        })
    }

    /// Whether edges are interpreted as one-way.
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Change how edges are interpreted.
    ///
    /// Existing edges are kept as stored. Switching from directed to
    /// undirected can leave two edges over the same unordered pair; the
    /// duplicate check only guards edits made while the flag is set.
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether a node with the given id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Whether any edge joins the given endpoints under the current
    /// directedness.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| e.connects(from, to, self.directed))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node at the given position.
    ///
    /// The node is named after its id. Ids are never reused, so the returned
    /// id stays unambiguous even after other nodes are removed.
    pub fn add_node(&mut self, position: Position) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node::new(id, position));
        id
    }

    /// Add an edge with an explicit weight.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
        self.ensure_node(from)?;
        self.ensure_node(to)?;
        if from == to {
            return Err(Error::SelfLoop(from));
        }
        if self.has_edge(from, to) {
            return Err(Error::DuplicateEdge(from, to));
        }
        self.edges.push(Edge::new(from, to, weight));
        Ok(())
    }

    /// Add an edge weighted by the distance between its endpoints.
    ///
    /// See [`default_weight`] for the scaling rule.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let a = self.node(from).ok_or(Error::UnknownNode(from))?;
        let b = self.node(to).ok_or(Error::UnknownNode(to))?;
        let weight = default_weight(&a.position, &b.position);
        self.add_edge(from, to, weight)
    }

    /// Rename a node. Identity and incident edges are unaffected.
    pub fn rename_node(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let node = self.node_mut(id)?;
        node.name = name.into();
        Ok(())
    }

    /// Move a node. Weights of existing edges are unaffected.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<()> {
        let node = self.node_mut(id)?;
        node.position = position;
        Ok(())
    }

    /// Change the weight of the edge joining the given endpoints.
    pub fn set_edge_weight(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
        let directed = self.directed;
        let edge = self
            .edges
            .iter_mut()
            .find(|e| e.connects(from, to, directed))
            .ok_or(Error::UnknownEdge(from, to))?;
        edge.weight = weight;
        Ok(())
    }

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return Err(Error::UnknownNode(id));
        }
        self.edges.retain(|e| !e.touches(id));
        Ok(())
    }

    /// Remove the edge joining the given endpoints.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let directed = self.directed;
        let index = self
            .edges
            .iter()
            .position(|e| e.connects(from, to, directed))
            .ok_or(Error::UnknownEdge(from, to))?;
        self.edges.remove(index);
        Ok(())
    }

    /// Remove everything and restart id allocation from zero.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_id = 0;
    }

    fn ensure_node(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownNode(id))
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::UnknownNode(id))
    }
}
