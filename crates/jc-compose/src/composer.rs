//! Fluent builder that composes a central junction and its neighbors.

use std::collections::BTreeMap;

use tracing::debug;

use jc_core::{
    ApproachNaming, ApproachRef, ConfigError, ConfigResult, JunctionDescription,
    NeighborDescription, NetworkDescription, Point3, CENTRAL_JUNCTION_ID,
};
use jc_layout::{layout_junction, Node};
use jc_topology::{resolve_connections, synthesize_edges, EdgeIndex};

use crate::JunctionGraph;

/// Fluent builder for a [`JunctionGraph`].
///
/// # Inputs
///
/// - the central junction description (required), placed at the origin
///   with id `TL`;
/// - neighbor descriptions keyed by central approach node id (optional).
///   When any neighbor is given, every central approach needs one.
///
/// # Example
///
/// ```rust,ignore
/// let graph = NetworkComposer::new(central)
///     .neighbor("A", north_neighbor)
///     .neighbor("B", east_neighbor)
///     .compose()?;
/// ```
#[derive(Clone, Debug)]
pub struct NetworkComposer {
    central:   JunctionDescription,
    neighbors: BTreeMap<String, NeighborDescription>,
}

impl NetworkComposer {
    pub fn new(central: JunctionDescription) -> Self {
        Self { central, neighbors: BTreeMap::new() }
    }

    pub fn from_description(description: NetworkDescription) -> Self {
        Self { central: description.central, neighbors: description.neighbors }
    }

    /// Attach a neighbor junction at central approach node `id`.
    pub fn neighbor(mut self, id: impl Into<String>, description: NeighborDescription) -> Self {
        self.neighbors.insert(id.into(), description);
        self
    }

    /// Attach several neighbors at once.
    pub fn neighbors(mut self, neighbors: impl IntoIterator<Item = (String, NeighborDescription)>) -> Self {
        self.neighbors.extend(neighbors);
        self
    }

    /// Run layout, edge synthesis, and connection resolution for every
    /// junction and merge the results.
    ///
    /// Fails with a [`ConfigError`] on any malformed description; the
    /// returned graph has passed [`JunctionGraph::validate`].
    pub fn compose(&self) -> ConfigResult<JunctionGraph> {
        // ── Central junction ──────────────────────────────────────────────
        self.central.validate()?;
        let naming = ApproachNaming::central(self.central.len())?;
        self.check_neighbor_keys(&naming)?;

        let layout = layout_junction(&self.central, &naming, Point3::ORIGIN)?;
        let central_edges = synthesize_edges(&self.central, &naming)?;

        let mut graph = JunctionGraph::default();
        graph.nodes.push(Node::center(CENTRAL_JUNCTION_ID));

        // ── Clockwise traversal: approach, staging, neighbor ──────────────
        let mut attached: Vec<(ApproachNaming, &NeighborDescription)> = Vec::new();
        for placement in &layout.placements {
            graph.nodes.push(placement.node.clone());
            graph.nodes.extend(placement.staging.iter().cloned());
            graph.edges.extend(
                central_edges
                    .iter()
                    .filter(|e| e.approach == placement.approach)
                    .cloned(),
            );

            let Some(neighbor) = self.neighbors.get(&placement.node.id) else {
                continue;
            };

            neighbor.junction.validate()?;
            let sub_naming = ApproachNaming::neighbor(&placement.node.id, neighbor.junction.len())?;
            let sub_layout = layout_junction(&neighbor.junction, &sub_naming, placement.node.pos)?;
            graph.nodes.extend(sub_layout.nodes().cloned());
            graph.edges.extend(synthesize_edges(&neighbor.junction, &sub_naming)?);

            attached.push((sub_naming, neighbor));
        }

        // ── Connections: central first, then neighbors in key order ───────
        let index = EdgeIndex::from_edges(&graph.edges);
        graph.connections = resolve_connections(&self.central, None, &naming, &index)?;

        attached.sort_by(|a, b| a.0.junction_id().cmp(b.0.junction_id()));
        for (sub_naming, neighbor) in &attached {
            graph.connections.extend(resolve_connections(
                &neighbor.junction,
                Some(&neighbor.back_link),
                sub_naming,
                &index,
            )?);
        }

        graph.validate()?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            connections = graph.connection_count(),
            neighbors = self.neighbors.len(),
            "composed junction graph"
        );
        Ok(graph)
    }

    /// Neighbor keys must name central approaches, and once any neighbor is
    /// configured, every central approach needs one.
    fn check_neighbor_keys(&self, naming: &ApproachNaming) -> ConfigResult<()> {
        if self.neighbors.is_empty() {
            return Ok(());
        }
        for key in self.neighbors.keys() {
            if !matches!(naming.lookup(key), Some(ApproachRef::Approach(_))) {
                return Err(ConfigError::UnknownNeighbor(key.clone()));
            }
        }
        for (index, _) in self.central.iter() {
            let id = naming.node_id(index)?;
            if !self.neighbors.contains_key(id) {
                return Err(ConfigError::MissingNeighbor(id.to_owned()));
            }
        }
        Ok(())
    }
}
