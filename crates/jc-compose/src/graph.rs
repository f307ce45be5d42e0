//! The composed junction graph.

use rustc_hash::FxHashSet;

use jc_core::{ConfigError, ConfigResult};
use jc_layout::{Node, NodeKind};
use jc_topology::{Connection, Edge, EdgeIndex};

/// Nodes, edges, and connections of a central junction and its neighbors in
/// one coordinate frame.
///
/// Built by [`NetworkComposer`](crate::NetworkComposer); fields are `pub` for
/// inspection and emission.  Element order is the traversal order used for
/// output files.
#[derive(Clone, Debug, Default)]
pub struct JunctionGraph {
    pub nodes:       Vec<Node>,
    pub edges:       Vec<Edge>,
    pub connections: Vec<Connection>,
}

impl JunctionGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Connections leaving `edge`.
    pub fn connections_from<'a>(&'a self, edge: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.from_edge == edge)
    }

    /// Check the structural invariants of the graph:
    ///
    /// - node ids are unique, edge ids are unique;
    /// - every edge starts and ends at an existing node;
    /// - every connection references existing edges with in-range lanes.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut node_ids: FxHashSet<&str> = FxHashSet::default();
        for n in &self.nodes {
            if !node_ids.insert(n.id.as_str()) {
                return Err(ConfigError::DuplicateNodeId(n.id.clone()));
            }
        }

        let mut edge_ids: FxHashSet<&str> = FxHashSet::default();
        for e in &self.edges {
            if !edge_ids.insert(e.id.as_str()) {
                return Err(ConfigError::DuplicateEdgeId(e.id.clone()));
            }
            for end in [&e.from, &e.to] {
                if !node_ids.contains(end.as_str()) {
                    return Err(ConfigError::DanglingEdge { edge: e.id.clone(), node: end.clone() });
                }
            }
        }

        let index = EdgeIndex::from_edges(&self.edges);
        for c in &self.connections {
            index.check_lane(&c.from_edge, c.from_lane)?;
            index.check_lane(&c.to_edge, c.to_lane)?;
        }
        Ok(())
    }
}
