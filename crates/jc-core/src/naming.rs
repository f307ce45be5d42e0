//! Approach naming: the addressing scheme shared by every pipeline stage.
//!
//! Node and edge ids are derived from approach positions:
//!
//! | Entity                  | Central junction `TL` | Neighbor junction `B`  |
//! |-------------------------|-----------------------|------------------------|
//! | approach node *i*       | `A`, `B`, …           | `BA`, `BB`, …          |
//! | staging node            | `A_intern`            | `BA_intern`            |
//! | incoming edge           | `A2TL`                | `BA2B`                 |
//! | staged incoming edge    | `A2TL_intern`         | `BA2B_intern`          |
//! | outgoing edge           | `TL2A`                | `B2BA`                 |
//! | back link in / out      | —                     | `TL2B` / `B2TL`        |
//!
//! [`ApproachNaming`] is built once per junction and passed to the layout,
//! topology, and connection stages so that all of them agree on these ids.

use std::collections::HashMap;

use crate::{ApproachIndex, ApproachRef, ConfigError, ConfigResult};

/// Id of the central junction node, fixed at the origin.
pub const CENTRAL_JUNCTION_ID: &str = "TL";

/// Suffix of left-turn staging nodes and of the staged incoming edge.
pub const STAGING_SUFFIX: &str = "_intern";

/// Approaches per junction that single-letter naming can address.
pub const MAX_APPROACHES: usize = 26;

/// Letter for approach slot `i`, `A` at north.
pub fn approach_letter(i: usize) -> Option<char> {
    (i < MAX_APPROACHES).then(|| (b'A' + i as u8) as char)
}

/// Whether a junction is the global center or attached to one of its
/// approach nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JunctionRole {
    Central,
    Neighbor { central_id: String },
}

/// Bidirectional map between approach references and stable ids for one
/// junction.
#[derive(Clone, Debug)]
pub struct ApproachNaming {
    junction_id:  String,
    role:         JunctionRole,
    approach_ids: Vec<String>,
    by_id:        HashMap<String, ApproachRef>,
}

impl ApproachNaming {
    /// Naming for the central junction with `count` approaches.
    pub fn central(count: usize) -> ConfigResult<Self> {
        Self::build(CENTRAL_JUNCTION_ID.to_owned(), JunctionRole::Central, "", count)
    }

    /// Naming for the neighbor junction sitting on central approach node
    /// `junction_id`.  Its own approach ids are prefixed with `junction_id`.
    pub fn neighbor(junction_id: &str, count: usize) -> ConfigResult<Self> {
        let role = JunctionRole::Neighbor { central_id: CENTRAL_JUNCTION_ID.to_owned() };
        Self::build(junction_id.to_owned(), role, junction_id, count)
    }

    fn build(junction_id: String, role: JunctionRole, prefix: &str, count: usize) -> ConfigResult<Self> {
        if count == 0 {
            return Err(ConfigError::NoApproaches { junction: junction_id });
        }
        if count > MAX_APPROACHES {
            return Err(ConfigError::TooManyApproaches {
                junction: junction_id,
                count,
                max: MAX_APPROACHES,
            });
        }

        let approach_ids: Vec<String> = (0..count)
            .filter_map(approach_letter)
            .map(|letter| format!("{prefix}{letter}"))
            .collect();

        // Neighbor `T` would name its twelfth approach `TL`.
        if !prefix.is_empty() {
            if let Some(clash) = approach_ids.iter().position(|id| id == CENTRAL_JUNCTION_ID) {
                return Err(ConfigError::TooManyApproaches { junction: junction_id, count, max: clash });
            }
        }

        let mut by_id: HashMap<String, ApproachRef> = approach_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), ApproachRef::Approach(ApproachIndex(i as u32))))
            .collect();
        if let JunctionRole::Neighbor { central_id } = &role {
            by_id.insert(central_id.clone(), ApproachRef::BackLink);
        }

        Ok(Self { junction_id, role, approach_ids, by_id })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn junction_id(&self) -> &str {
        &self.junction_id
    }

    pub fn role(&self) -> &JunctionRole {
        &self.role
    }

    pub fn is_central(&self) -> bool {
        self.role == JunctionRole::Central
    }

    pub fn approach_count(&self) -> usize {
        self.approach_ids.len()
    }

    /// Number of evenly spaced angular slots around the junction.  A
    /// neighbor reserves one extra slot for its back link.
    pub fn angular_slots(&self) -> usize {
        match self.role {
            JunctionRole::Central => self.approach_ids.len(),
            JunctionRole::Neighbor { .. } => self.approach_ids.len() + 1,
        }
    }

    // ── Forward mapping ───────────────────────────────────────────────────

    /// Node id of approach `index`.
    pub fn node_id(&self, index: ApproachIndex) -> ConfigResult<&str> {
        self.approach_ids
            .get(index.index())
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownApproach {
                junction: self.junction_id.clone(),
                approach: index,
            })
    }

    /// Id of the road referenced by `r`: an approach node id, or the central
    /// junction id for the back link.
    pub fn name(&self, r: ApproachRef) -> ConfigResult<&str> {
        match (r, &self.role) {
            (ApproachRef::Approach(i), _) => self.node_id(i),
            (ApproachRef::BackLink, JunctionRole::Neighbor { central_id }) => Ok(central_id),
            (ApproachRef::BackLink, JunctionRole::Central) => Err(ConfigError::BackLinkOnCentral),
        }
    }

    pub fn staging_node_id(&self, index: ApproachIndex) -> ConfigResult<String> {
        Ok(format!("{}{STAGING_SUFFIX}", self.node_id(index)?))
    }

    /// `{road}2{junction}`: the edge arriving at this junction from `r`.
    pub fn incoming_edge_id(&self, r: ApproachRef) -> ConfigResult<String> {
        Ok(format!("{}2{}", self.name(r)?, self.junction_id))
    }

    /// `{road}2{junction}_intern`: the staging-to-center segment of `r`.
    pub fn staged_edge_id(&self, r: ApproachRef) -> ConfigResult<String> {
        Ok(format!("{}{STAGING_SUFFIX}", self.incoming_edge_id(r)?))
    }

    /// `{junction}2{road}`: the edge leaving this junction towards `r`.
    pub fn outgoing_edge_id(&self, r: ApproachRef) -> ConfigResult<String> {
        Ok(format!("{}2{}", self.junction_id, self.name(r)?))
    }

    // ── Reverse mapping ───────────────────────────────────────────────────

    /// Resolve a road id (approach node id or, for neighbors, the central
    /// junction id) back to its reference.
    pub fn lookup(&self, id: &str) -> Option<ApproachRef> {
        self.by_id.get(id).copied()
    }
}
