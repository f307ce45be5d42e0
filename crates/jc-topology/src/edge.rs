//! Directed edges between approach nodes and junction centers.
//!
//! Per approach, with `L` its node id and `J` the junction id:
//!
//! ```text
//! no staging:   L ──L2J──▶ J               (num_incoming lanes)
//!               J ──J2L──▶ L               (num_outgoing lanes)
//!
//! staging:      L ──L2J──▶ L_intern        (num_incoming − 1 lanes)
//!               L_intern ──L2J_intern──▶ J (num_incoming lanes)
//!               J ──J2L──▶ L               (num_outgoing lanes)
//! ```
//!
//! An edge is only emitted when it would carry at least one lane.  The
//! staged left-turn lane appears only on the short segment next to the
//! center, so the two incoming segments always account for `num_incoming`
//! lanes between them.

use tracing::debug;

use jc_core::{ApproachIndex, ApproachNaming, ApproachRef, ConfigResult, JunctionDescription};

/// Which segment of an approach an edge represents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeRole {
    /// Approach node straight to the center.
    Incoming,
    /// Approach node to staging node; through and right-turn lanes.
    Through,
    /// Staging node to center; every incoming lane including the staged one.
    Staged,
    /// Center to approach node.
    Outgoing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id:        String,
    pub from:      String,
    pub to:        String,
    /// m/s
    pub speed:     f64,
    pub num_lanes: u32,
    pub role:      EdgeRole,
    pub approach:  ApproachIndex,
}

/// Derive the edges of every approach of one junction.
pub fn synthesize_edges(
    description: &JunctionDescription,
    naming:      &ApproachNaming,
) -> ConfigResult<Vec<Edge>> {
    let junction = naming.junction_id();
    let mut edges = Vec::with_capacity(description.len() * 3);

    for (index, spec) in description.iter() {
        let node = naming.node_id(index)?;
        let approach = ApproachRef::Approach(index);
        let edge = |id: String, from: &str, to: &str, num_lanes: u32, role: EdgeRole| Edge {
            id,
            from: from.to_owned(),
            to: to.to_owned(),
            speed: spec.speed,
            num_lanes,
            role,
            approach: index,
        };

        if spec.has_staging() {
            let staging = naming.staging_node_id(index)?;
            if spec.num_incoming > 1 {
                edges.push(edge(
                    naming.incoming_edge_id(approach)?,
                    node,
                    &staging,
                    spec.num_incoming - 1,
                    EdgeRole::Through,
                ));
            }
            if spec.num_incoming > 0 {
                edges.push(edge(
                    naming.staged_edge_id(approach)?,
                    &staging,
                    junction,
                    spec.num_incoming,
                    EdgeRole::Staged,
                ));
            }
        } else if spec.num_incoming > 0 {
            edges.push(edge(
                naming.incoming_edge_id(approach)?,
                node,
                junction,
                spec.num_incoming,
                EdgeRole::Incoming,
            ));
        }

        if spec.num_outgoing > 0 {
            edges.push(edge(
                naming.outgoing_edge_id(approach)?,
                junction,
                node,
                spec.num_outgoing,
                EdgeRole::Outgoing,
            ));
        }
    }

    debug!(junction, edges = edges.len(), "synthesized edges");
    Ok(edges)
}
