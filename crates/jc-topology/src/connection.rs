//! Lane-to-lane connections through a junction.
//!
//! Each `(incoming lane → [(target, lane), …])` entry of an approach becomes
//! one [`Connection`] per target, from the approach's incoming edge (the
//! staged segment when the approach has left-turn staging) to the junction's
//! outgoing edge towards the target.  Lanes arriving over a neighbor's back
//! link come in on the central junction's outgoing edge, e.g. `TL2B`.
//!
//! Lane indices are checked against an [`EdgeIndex`] covering every edge
//! synthesized so far, so a neighbor's connections can be checked against the
//! central junction's edges.

use rustc_hash::FxHashMap;
use tracing::debug;

use jc_core::{
    ApproachNaming, ApproachRef, BackLinkSpec, ConfigError, ConfigResult, ConnectionMap,
    JunctionDescription, LaneIndex,
};

use crate::edge::Edge;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub from_edge: String,
    pub to_edge:   String,
    pub from_lane: LaneIndex,
    pub to_lane:   LaneIndex,
}

// ── EdgeIndex ─────────────────────────────────────────────────────────────────

/// Lane count by edge id.
#[derive(Clone, Debug, Default)]
pub struct EdgeIndex {
    lanes: FxHashMap<String, u32>,
}

impl EdgeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut index = Self::new();
        index.extend(edges);
        index
    }

    pub fn extend<'a>(&mut self, edges: impl IntoIterator<Item = &'a Edge>) {
        self.lanes
            .extend(edges.into_iter().map(|e| (e.id.clone(), e.num_lanes)));
    }

    pub fn lanes(&self, edge: &str) -> Option<u32> {
        self.lanes.get(edge).copied()
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Fail unless `edge` exists and has more than `lane` lanes.
    pub fn check_lane(&self, edge: &str, lane: LaneIndex) -> ConfigResult<()> {
        let lanes = self
            .lanes(edge)
            .ok_or_else(|| ConfigError::UnknownEdge(edge.to_owned()))?;
        if lane.0 >= lanes {
            return Err(ConfigError::LaneOutOfRange { edge: edge.to_owned(), lane, lanes });
        }
        Ok(())
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Expand the connection maps of one junction into explicit connections.
///
/// Back-link connections (neighbors only) come first, then each approach in
/// clockwise order; within an approach, lanes ascend and targets keep their
/// listed order.
pub fn resolve_connections(
    description: &JunctionDescription,
    back_link:   Option<&BackLinkSpec>,
    naming:      &ApproachNaming,
    edges:       &EdgeIndex,
) -> ConfigResult<Vec<Connection>> {
    let mut out = Vec::new();

    if let Some(link) = back_link {
        let from_edge = naming.incoming_edge_id(ApproachRef::BackLink)?;
        expand(&from_edge, &link.connections, naming, edges, &mut out)?;
    }

    for (index, spec) in description.iter() {
        let approach = ApproachRef::Approach(index);
        let from_edge = if spec.has_staging() {
            naming.staged_edge_id(approach)?
        } else {
            naming.incoming_edge_id(approach)?
        };
        expand(&from_edge, &spec.connections, naming, edges, &mut out)?;
    }

    debug!(junction = naming.junction_id(), connections = out.len(), "resolved connections");
    Ok(out)
}

fn expand(
    from_edge:   &str,
    connections: &ConnectionMap,
    naming:      &ApproachNaming,
    edges:       &EdgeIndex,
    out:         &mut Vec<Connection>,
) -> ConfigResult<()> {
    for (&from_lane, targets) in connections {
        edges.check_lane(from_edge, from_lane)?;
        for target in targets {
            let to_edge = naming.outgoing_edge_id(target.approach)?;
            edges.check_lane(&to_edge, target.lane)?;
            out.push(Connection {
                from_edge: from_edge.to_owned(),
                to_edge,
                from_lane,
                to_lane: target.lane,
            });
        }
    }
    Ok(())
}
