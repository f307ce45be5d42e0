//! Unit tests for jc-compose.

#[cfg(test)]
mod helpers {
    use jc_core::{
        ApproachRef, ApproachSpec, BackLinkSpec, JunctionDescription, LaneIndex, LaneTarget,
        NeighborDescription,
    };

    pub fn to(approach: u32, lane: u32) -> LaneTarget {
        LaneTarget::new(ApproachRef::approach(approach), lane)
    }

    /// Four-way central junction with staging on B and a handful of turns.
    pub fn central() -> JunctionDescription {
        JunctionDescription::new(vec![
            ApproachSpec::new(2, 1, 100.0, 13.9)
                .connect(0, [to(2, 0)])
                .connect(1, [to(3, 0)]),
            ApproachSpec::new(3, 2, 100.0, 13.9)
                .with_left_turn_staging(30.0)
                .connect(0, [to(3, 0)])
                .connect(2, [to(0, 0)]),
            ApproachSpec::new(1, 1, 100.0, 13.9).connect(0, [to(0, 0), to(1, 1)]),
            ApproachSpec::new(1, 1, 100.0, 13.9),
        ])
    }

    /// Neighbor with two own approaches; lanes from the center continue to
    /// own approach 0, and own approach 1 turns back towards the center.
    pub fn neighbor() -> NeighborDescription {
        NeighborDescription::new(
            BackLinkSpec { connections: [(LaneIndex(0), vec![to(0, 0)])].into_iter().collect() },
            JunctionDescription::new(vec![
                ApproachSpec::new(1, 1, 60.0, 8.3),
                ApproachSpec::new(1, 1, 60.0, 8.3)
                    .connect(0, [LaneTarget::new(ApproachRef::BackLink, 0)]),
            ]),
        )
    }

    /// Number of `(lane, target)` pairs declared in a description.
    pub fn declared(desc: &JunctionDescription) -> usize {
        desc.approaches
            .iter()
            .flat_map(|a| a.connections.values())
            .map(Vec::len)
            .sum()
    }
}

// ── Central junction only ─────────────────────────────────────────────────────

#[cfg(test)]
mod central_only {
    use jc_core::{ApproachSpec, JunctionDescription, LaneIndex};
    use jc_layout::NodeKind;

    use crate::NetworkComposer;

    #[test]
    fn first_approach_example() {
        let desc: JunctionDescription = (0..4).map(|_| ApproachSpec::new(2, 1, 100.0, 13.9)).collect();
        let graph = NetworkComposer::new(desc).compose().unwrap();

        let a = graph.node("A").unwrap();
        assert!(a.pos.x.abs() < 1e-9 && (a.pos.y - 100.0).abs() < 1e-9 && a.pos.z == 0.0);
        assert_eq!(graph.edge("A2TL").unwrap().num_lanes, 2);
        assert_eq!(graph.edge("TL2A").unwrap().num_lanes, 1);
    }

    #[test]
    fn staging_example() {
        let desc = JunctionDescription::new(vec![
            ApproachSpec::new(3, 1, 100.0, 13.9).with_left_turn_staging(30.0),
            ApproachSpec::new(1, 1, 100.0, 13.9),
        ]);
        let graph = NetworkComposer::new(desc).compose().unwrap();

        let staging = graph.node("A_intern").unwrap();
        assert_eq!(staging.kind, NodeKind::Staging);
        assert!((staging.pos.x.hypot(staging.pos.y) - 30.0).abs() < 1e-9);

        let through = graph.edge("A2TL").unwrap();
        assert_eq!((through.from.as_str(), through.to.as_str(), through.num_lanes), ("A", "A_intern", 2));
        let staged = graph.edge("A2TL_intern").unwrap();
        assert_eq!((staged.from.as_str(), staged.to.as_str(), staged.num_lanes), ("A_intern", "TL", 3));
    }

    #[test]
    fn single_center_and_letter_ids() {
        let graph = NetworkComposer::new(super::helpers::central()).compose().unwrap();

        assert_eq!(graph.nodes_of_kind(NodeKind::Center).count(), 1);
        assert_eq!(graph.nodes[0].id, "TL");
        for n in graph.nodes.iter().filter(|n| n.kind != NodeKind::Center) {
            let base = n.id.strip_suffix("_intern").unwrap_or(&n.id);
            assert_eq!(base.len(), 1, "{}", n.id);
            assert!(base.chars().all(|c| c.is_ascii_uppercase()), "{}", n.id);
        }
    }

    #[test]
    fn traversal_order() {
        let graph = NetworkComposer::new(super::helpers::central()).compose().unwrap();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["TL", "A", "B", "B_intern", "C", "D"]);
        let edges: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            edges,
            ["A2TL", "TL2A", "B2TL", "B2TL_intern", "TL2B", "C2TL", "TL2C", "D2TL", "TL2D"]
        );
    }

    #[test]
    fn every_declared_connection_emitted_once() {
        let desc = super::helpers::central();
        let graph = NetworkComposer::new(desc.clone()).compose().unwrap();
        assert_eq!(graph.connection_count(), super::helpers::declared(&desc));

        let staged: Vec<_> = graph.connections_from("B2TL_intern").collect();
        assert_eq!(staged.len(), 2);
        assert_eq!(staged[1].to_edge, "TL2A");
        assert_eq!(staged[1].from_lane, LaneIndex(2));
        assert!(graph.connections_from("B2TL").next().is_none());
    }

    #[test]
    fn empty_central_rejected() {
        let err = NetworkComposer::new(JunctionDescription::default()).compose().unwrap_err();
        assert!(matches!(err, jc_core::ConfigError::NoApproaches { .. }));
    }

    #[test]
    fn invalid_lane_rejected() {
        let desc = JunctionDescription::new(vec![
            ApproachSpec::new(1, 1, 100.0, 13.9).connect(0, [super::helpers::to(1, 3)]),
            ApproachSpec::new(1, 2, 100.0, 13.9),
        ]);
        let err = NetworkComposer::new(desc).compose().unwrap_err();
        assert!(matches!(err, jc_core::ConfigError::LaneOutOfRange { lanes: 2, .. }));
    }
}

// ── Neighbors ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod with_neighbors {
    use jc_core::{ConfigError, JunctionDescription};
    use jc_layout::NodeKind;

    use super::helpers::{central, neighbor};
    use crate::NetworkComposer;

    fn full() -> NetworkComposer {
        ["A", "B", "C", "D"]
            .into_iter()
            .fold(NetworkComposer::new(central()), |c, id| c.neighbor(id, neighbor()))
    }

    #[test]
    fn neighbor_nodes_anchored_at_approach() {
        let graph = full().compose().unwrap();
        let anchor = graph.node("B").unwrap().pos;
        for id in ["BA", "BB"] {
            let n = graph.node(id).unwrap();
            assert_eq!(n.kind, NodeKind::Approach);
            assert!((anchor.planar_distance(n.pos) - 60.0).abs() < 1e-9, "{id}");
        }
        assert_eq!(graph.nodes_of_kind(NodeKind::Center).count(), 1);
    }

    #[test]
    fn neighbor_nodes_follow_their_anchor() {
        let graph = full().compose().unwrap();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["TL", "A", "AA", "AB", "B", "B_intern", "BA", "BB", "C", "CA", "CB", "D", "DA", "DB"]
        );
    }

    #[test]
    fn neighbor_edges_and_back_link_connections() {
        let graph = full().compose().unwrap();
        assert_eq!(graph.edge("AA2A").unwrap().to, "A");
        assert_eq!(graph.edge("A2AB").unwrap().from, "A");

        let from_center: Vec<_> = graph.connections_from("TL2C").collect();
        assert_eq!(from_center.len(), 1);
        assert_eq!(from_center[0].to_edge, "C2CA");

        let to_center: Vec<_> = graph
            .connections
            .iter()
            .filter(|c| c.to_edge == "D2TL")
            .collect();
        assert_eq!(to_center.len(), 1);
        assert_eq!(to_center[0].from_edge, "DB2D");
    }

    #[test]
    fn connection_counts_add_up() {
        let graph = full().compose().unwrap();
        let per_neighbor = super::helpers::declared(&neighbor().junction) + 1; // + back link
        assert_eq!(
            graph.connection_count(),
            super::helpers::declared(&central()) + 4 * per_neighbor
        );
    }

    #[test]
    fn back_link_to_staged_approach_uses_through_segment() {
        // B is staged with 3 incoming lanes, so B2TL has 2.
        let graph = full().compose().unwrap();
        assert_eq!(graph.edge("B2TL").unwrap().num_lanes, 2);
        assert!(graph.connections.iter().any(|c| c.from_edge == "BB2B" && c.to_edge == "B2TL"));
    }

    #[test]
    fn missing_neighbor_rejected() {
        let composer = NetworkComposer::new(central())
            .neighbor("A", neighbor())
            .neighbor("B", neighbor());
        assert!(matches!(composer.compose(), Err(ConfigError::MissingNeighbor(ref id)) if id == "C"));
    }

    #[test]
    fn unknown_neighbor_rejected() {
        let composer = full().neighbor("Z", neighbor());
        assert!(matches!(composer.compose(), Err(ConfigError::UnknownNeighbor(ref id)) if id == "Z"));
    }

    #[test]
    fn empty_neighbor_rejected() {
        let mut n = neighbor();
        n.junction = JunctionDescription::default();
        let composer = NetworkComposer::new(central())
            .neighbors(["A", "B", "C", "D"].map(|id| (id.to_owned(), n.clone())));
        assert!(matches!(composer.compose(), Err(ConfigError::NoApproaches { ref junction }) if junction == "A"));
    }

    #[test]
    fn back_link_lane_out_of_range() {
        let mut n = neighbor();
        // TL2A has a single lane.
        n.back_link.connections.insert(jc_core::LaneIndex(1), vec![super::helpers::to(0, 0)]);
        let composer = full().neighbor("A", n);
        assert!(matches!(
            composer.compose(),
            Err(ConfigError::LaneOutOfRange { ref edge, .. }) if edge == "TL2A"
        ));
    }

    #[test]
    fn neighbor_approach_with_staging() {
        use jc_core::{ApproachRef, ApproachSpec, BackLinkSpec, LaneIndex, LaneTarget, NeighborDescription};

        let staged = NeighborDescription::new(
            BackLinkSpec { connections: [(LaneIndex(0), vec![super::helpers::to(1, 0)])].into_iter().collect() },
            JunctionDescription::new(vec![
                ApproachSpec::new(2, 1, 60.0, 8.3)
                    .with_left_turn_staging(20.0)
                    .connect(1, [LaneTarget::new(ApproachRef::BackLink, 0)]),
                ApproachSpec::new(1, 1, 60.0, 8.3),
            ]),
        );
        let graph = full().neighbor("A", staged).compose().unwrap();

        let ids: Vec<_> = graph.nodes.iter().take(5).map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["TL", "A", "AA", "AA_intern", "AB"]);
        let anchor = graph.node("A").unwrap().pos;
        assert!((anchor.planar_distance(graph.node("AA_intern").unwrap().pos) - 20.0).abs() < 1e-9);

        let through = graph.edge("AA2A").unwrap();
        assert_eq!((through.from.as_str(), through.to.as_str(), through.num_lanes), ("AA", "AA_intern", 1));
        let staged_edge = graph.edge("AA2A_intern").unwrap();
        assert_eq!((staged_edge.from.as_str(), staged_edge.to.as_str(), staged_edge.num_lanes), ("AA_intern", "A", 2));

        let turns: Vec<_> = graph.connections_from("AA2A_intern").collect();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].to_edge, "A2TL");
        assert_eq!((turns[0].from_lane, turns[0].to_lane), (LaneIndex(1), LaneIndex(0)));
        assert!(graph.connections_from("AA2A").next().is_none());
        assert_eq!(graph.connections_from("TL2A").next().unwrap().to_edge, "A2AB");
    }

    #[test]
    fn neighbor_t_ids_stop_short_of_center() {
        use jc_core::{ApproachSpec, BackLinkSpec, NeighborDescription};

        let central: JunctionDescription = (0..20).map(|_| ApproachSpec::new(1, 1, 100.0, 13.9)).collect();
        let own = |n: usize| {
            NeighborDescription::new(
                BackLinkSpec::default(),
                (0..n).map(|_| ApproachSpec::new(1, 1, 40.0, 8.3)).collect(),
            )
        };
        let composer = NetworkComposer::new(central).neighbors(
            (0..20u8).map(|i| {
                let id = ((b'A' + i) as char).to_string();
                let count = if id == "T" { 12 } else { 1 };
                (id, own(count))
            }),
        );
        assert!(matches!(
            composer.compose(),
            Err(ConfigError::TooManyApproaches { ref junction, max: 11, .. }) if junction == "T"
        ));
    }

    #[test]
    fn composition_is_deterministic() {
        let a = full().compose().unwrap();
        let b = full().compose().unwrap();
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.connections, b.connections);
    }
}

// ── Graph validation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use jc_core::{ApproachIndex, ConfigError, LaneIndex, Point3};
    use jc_layout::{Node, NodeKind};
    use jc_topology::{Connection, Edge, EdgeRole};

    use crate::JunctionGraph;

    fn edge(id: &str, from: &str, to: &str, lanes: u32) -> Edge {
        Edge {
            id:        id.to_owned(),
            from:      from.to_owned(),
            to:        to.to_owned(),
            speed:     10.0,
            num_lanes: lanes,
            role:      EdgeRole::Incoming,
            approach:  ApproachIndex(0),
        }
    }

    fn small() -> JunctionGraph {
        JunctionGraph {
            nodes: vec![
                Node::center("TL"),
                Node::new("A", Point3::new(0.0, 10.0, 0.0), NodeKind::Approach),
            ],
            edges: vec![edge("A2TL", "A", "TL", 2), edge("TL2A", "TL", "A", 1)],
            connections: vec![Connection {
                from_edge: "A2TL".into(),
                to_edge:   "TL2A".into(),
                from_lane: LaneIndex(1),
                to_lane:   LaneIndex(0),
            }],
        }
    }

    #[test]
    fn valid_graph() {
        assert!(small().validate().is_ok());
    }

    #[test]
    fn duplicate_node() {
        let mut g = small();
        g.nodes.push(Node::center("A"));
        assert!(matches!(g.validate(), Err(ConfigError::DuplicateNodeId(ref id)) if id == "A"));
    }

    #[test]
    fn duplicate_edge() {
        let mut g = small();
        g.edges.push(edge("A2TL", "A", "TL", 1));
        assert!(matches!(g.validate(), Err(ConfigError::DuplicateEdgeId(_))));
    }

    #[test]
    fn dangling_edge() {
        let mut g = small();
        g.edges.push(edge("B2TL", "B", "TL", 1));
        assert!(matches!(g.validate(), Err(ConfigError::DanglingEdge { ref node, .. }) if node == "B"));
    }

    #[test]
    fn connection_lane_range() {
        let mut g = small();
        g.connections[0].to_lane = LaneIndex(1);
        assert!(matches!(g.validate(), Err(ConfigError::LaneOutOfRange { .. })));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use rustc_hash::FxHashSet;

    use jc_core::{ApproachSpec, BackLinkSpec, JunctionDescription, NeighborDescription};

    use crate::NetworkComposer;

    fn approach() -> impl Strategy<Value = ApproachSpec> {
        (0u32..4, 0u32..4, 20.0f64..200.0, prop::bool::ANY).prop_map(|(inc, out, len, staged)| {
            let a = ApproachSpec::new(inc, out, len, 13.9);
            if staged { a.with_left_turn_staging(len / 3.0) } else { a }
        })
    }

    fn junction(max: usize) -> impl Strategy<Value = JunctionDescription> {
        prop::collection::vec(approach(), 1..=max).prop_map(JunctionDescription::new)
    }

    proptest! {
        #[test]
        fn ids_unique_across_neighbors(
            central in junction(8),
            subs in prop::collection::vec(junction(6), 8),
        ) {
            let ids: Vec<String> = (0..central.len())
                .map(|i| ((b'A' + i as u8) as char).to_string())
                .collect();
            let composer = NetworkComposer::new(central).neighbors(
                ids.into_iter()
                    .zip(subs)
                    .map(|(id, j)| (id, NeighborDescription::new(BackLinkSpec::default(), j))),
            );
            let graph = composer.compose().unwrap();

            let mut seen = FxHashSet::default();
            for n in &graph.nodes {
                prop_assert!(seen.insert(n.id.clone()), "duplicate node {}", n.id);
            }
            let mut seen = FxHashSet::default();
            for e in &graph.edges {
                prop_assert!(seen.insert(e.id.clone()), "duplicate edge {}", e.id);
            }
        }
    }
}
