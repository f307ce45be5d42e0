//! Angular placement of approach nodes around a junction center.
//!
//! # Angles
//!
//! Approaches are spread evenly over `slots` directions, clockwise, with
//! slot 0 pointing away from the central junction:
//!
//! ```text
//! angle(i) = π/2 − (angle_offset + 2π·i / slots)
//! ```
//!
//! `angle` is measured from the x-axis (east), counter-clockwise, so an
//! increasing `i` turns clockwise.  For the central junction at the origin
//! `angle_offset = 0` and slot 0 is due north.  For a neighbor junction
//! anchored at `(x, y)` the offset rotates the fan by the direction of the
//! anchor as seen from the origin, so every neighbor's approach 0 has the same
//! orientation relative to its back link.  Neighbors use `slots = n + 1`: the
//! back link occupies a slot of its own that is not enumerated.
//!
//! # Elevation
//!
//! `z = −distance · sin(slope)`; a positive slope means incoming traffic
//! climbs towards the junction, so the outer node lies below it.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::debug;

use jc_core::{ApproachIndex, ApproachNaming, ConfigResult, JunctionDescription, Point3};

use crate::node::{Node, NodeKind};

/// Rotation of a junction's approach fan given where its center sits in the
/// composed graph.
pub fn angle_offset(center: Point3) -> f64 {
    if center.is_planar_origin() {
        return 0.0;
    }
    let mut offset = if center.x != 0.0 {
        -(center.y / center.x).atan()
    } else {
        -FRAC_PI_2
    };
    if center.x < 0.0 || (center.x == 0.0 && center.y < 0.0) {
        offset += PI;
    }
    offset
}

/// Direction of approach `index` out of `slots`, radians from the x-axis.
#[inline]
pub fn approach_angle(angle_offset: f64, index: usize, slots: usize) -> f64 {
    FRAC_PI_2 - (angle_offset + TAU * index as f64 / slots as f64)
}

// ── Layout result ─────────────────────────────────────────────────────────────

/// Placement of one approach: its outer node and optional staging node.
#[derive(Clone, Debug)]
pub struct ApproachPlacement {
    pub approach: ApproachIndex,
    /// Direction from the center, radians from the x-axis.
    pub angle:    f64,
    pub node:     Node,
    pub staging:  Option<Node>,
}

/// All approach nodes of one junction.  The center node itself is owned by
/// whoever placed it (the composer, or the parent junction's layout).
#[derive(Clone, Debug)]
pub struct JunctionLayout {
    pub junction_id:  String,
    pub center:       Point3,
    pub angle_offset: f64,
    pub slots:        usize,
    pub placements:   Vec<ApproachPlacement>,
}

impl JunctionLayout {
    pub fn placement(&self, index: ApproachIndex) -> Option<&ApproachPlacement> {
        self.placements.get(index.index())
    }

    /// Nodes in clockwise order, each approach node followed by its staging
    /// node.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.placements
            .iter()
            .flat_map(|p| std::iter::once(&p.node).chain(p.staging.as_ref()))
    }

    pub fn node_count(&self) -> usize {
        self.placements.len() + self.placements.iter().filter(|p| p.staging.is_some()).count()
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Place every approach of `description` around `center`.
///
/// `naming` must have been built for this junction; it supplies node ids and
/// the number of angular slots.
pub fn layout_junction(
    description: &JunctionDescription,
    naming:      &ApproachNaming,
    center:      Point3,
) -> ConfigResult<JunctionLayout> {
    let offset = angle_offset(center);
    let slots = naming.angular_slots();

    let placements = description
        .iter()
        .map(|(index, spec)| {
            let angle = approach_angle(offset, index.index(), slots);

            let node = Node::new(
                naming.node_id(index)?,
                center.polar_offset(spec.length, angle, spec.elevation_at(spec.length)),
                NodeKind::Approach,
            );

            let staging = spec
                .left_turn_only_length
                .map(|d| -> ConfigResult<Node> {
                    Ok(Node::new(
                        naming.staging_node_id(index)?,
                        center.polar_offset(d, angle, spec.elevation_at(d)),
                        NodeKind::Staging,
                    ))
                })
                .transpose()?;

            Ok(ApproachPlacement { approach: index, angle, node, staging })
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    debug!(
        junction = naming.junction_id(),
        approaches = placements.len(),
        slots,
        angle_offset = offset,
        "laid out junction"
    );

    Ok(JunctionLayout {
        junction_id: naming.junction_id().to_owned(),
        center,
        angle_offset: offset,
        slots,
        placements,
    })
}
