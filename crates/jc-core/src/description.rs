//! Junction descriptions: the validated input of the compiler.
//!
//! A [`JunctionDescription`] is an ordered list of [`ApproachSpec`]s.  The
//! position in the list is the approach's angular slot, enumerated clockwise
//! starting north, so the order is preserved exactly as given.
//!
//! Neighbor junctions additionally carry a [`BackLinkSpec`]: the road that
//! links them to the central junction is not one of their own approaches,
//! but lanes arriving over it still need turn connections.

use std::collections::BTreeMap;

use crate::{ApproachIndex, ConfigError, ConfigResult, LaneIndex};

// ── Connection targets ────────────────────────────────────────────────────────

/// Which road of a junction a connection refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApproachRef {
    /// One of the junction's own approaches.
    Approach(ApproachIndex),
    /// The link from a neighbor junction back to the central junction.
    BackLink,
}

impl ApproachRef {
    #[inline]
    pub fn approach(i: u32) -> Self {
        ApproachRef::Approach(ApproachIndex(i))
    }
}

impl std::fmt::Display for ApproachRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApproachRef::Approach(i) => write!(f, "approach {i}"),
            ApproachRef::BackLink => f.write_str("back link"),
        }
    }
}

/// One outgoing lane reached by an incoming lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaneTarget {
    pub approach: ApproachRef,
    pub lane:     LaneIndex,
}

impl LaneTarget {
    pub fn new(approach: ApproachRef, lane: u32) -> Self {
        Self { approach, lane: LaneIndex(lane) }
    }
}

/// Incoming lane → ordered outgoing targets.  Several targets for one lane
/// describe a lane that splits across turns.
pub type ConnectionMap = BTreeMap<LaneIndex, Vec<LaneTarget>>;

// ── ApproachSpec ──────────────────────────────────────────────────────────────

/// One road meeting a junction.
#[derive(Clone, Debug, PartialEq)]
pub struct ApproachSpec {
    /// Lanes towards the junction, including a staged left-turn lane.
    pub num_incoming: u32,
    /// Lanes away from the junction.
    pub num_outgoing: u32,
    /// Distance from junction center to approach node, metres.
    pub length: f64,
    /// Speed limit, m/s.
    pub speed: f64,
    /// Distance of the left-turn staging node from the center, if any.
    pub left_turn_only_length: Option<f64>,
    /// Radians; positive when incoming traffic climbs towards the junction.
    pub slope: f64,
    /// Signal cycle of the incoming approach, seconds.  Carried through
    /// untouched.
    pub incoming_tl_cycle_duration: Option<f64>,
    pub connections: ConnectionMap,
}

impl ApproachSpec {
    /// A plain approach with no staging, no slope and no connections.
    pub fn new(num_incoming: u32, num_outgoing: u32, length: f64, speed: f64) -> Self {
        Self {
            num_incoming,
            num_outgoing,
            length,
            speed,
            left_turn_only_length: None,
            slope: 0.0,
            incoming_tl_cycle_duration: None,
            connections: ConnectionMap::new(),
        }
    }

    pub fn with_left_turn_staging(mut self, length: f64) -> Self {
        self.left_turn_only_length = Some(length);
        self
    }

    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self
    }

    /// Append `targets` to the connections of incoming lane `lane`.
    pub fn connect(mut self, lane: u32, targets: impl IntoIterator<Item = LaneTarget>) -> Self {
        self.connections.entry(LaneIndex(lane)).or_default().extend(targets);
        self
    }

    #[inline]
    pub fn has_staging(&self) -> bool {
        self.left_turn_only_length.is_some()
    }

    /// Elevation of a point `distance` metres out along this approach.
    #[inline]
    pub fn elevation_at(&self, distance: f64) -> f64 {
        -distance * self.slope.sin()
    }

    /// Check the numeric invariants of one approach.
    ///
    /// `index` is only used to label errors.
    pub fn validate(&self, index: usize) -> ConfigResult<()> {
        let invalid = |field: &'static str, reason: String| ConfigError::InvalidValue {
            approach: index,
            field,
            reason,
        };

        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(invalid("length", format!("{} is not a positive length", self.length)));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(invalid("speed", format!("{} is not a positive speed", self.speed)));
        }
        if !self.slope.is_finite() {
            return Err(invalid("slope", format!("{} is not finite", self.slope)));
        }
        if let Some(staging) = self.left_turn_only_length {
            if !(staging.is_finite() && staging > 0.0 && staging < self.length) {
                return Err(invalid(
                    "left_turn_only_length",
                    format!("{staging} must lie strictly between 0 and length {}", self.length),
                ));
            }
        }
        if let Some(cycle) = self.incoming_tl_cycle_duration {
            if !(cycle.is_finite() && cycle >= 0.0) {
                return Err(invalid("incoming_TL_cycle_duration", format!("{cycle} is not a duration")));
            }
        }
        Ok(())
    }
}

// ── JunctionDescription ──────────────────────────────────────────────────────

/// Ordered approaches of one junction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JunctionDescription {
    pub approaches: Vec<ApproachSpec>,
}

impl JunctionDescription {
    pub fn new(approaches: Vec<ApproachSpec>) -> Self {
        Self { approaches }
    }

    pub fn len(&self) -> usize {
        self.approaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approaches.is_empty()
    }

    pub fn get(&self, index: ApproachIndex) -> Option<&ApproachSpec> {
        self.approaches.get(index.index())
    }

    /// `(index, spec)` pairs in clockwise order.
    pub fn iter(&self) -> impl Iterator<Item = (ApproachIndex, &ApproachSpec)> + '_ {
        self.approaches
            .iter()
            .enumerate()
            .map(|(i, a)| (ApproachIndex(i as u32), a))
    }

    /// Validate every approach.  Does not check naming capacity or
    /// connection lane ranges; those need the naming map and the edge set.
    pub fn validate(&self) -> ConfigResult<()> {
        self.approaches
            .iter()
            .enumerate()
            .try_for_each(|(i, a)| a.validate(i))
    }
}

impl FromIterator<ApproachSpec> for JunctionDescription {
    fn from_iter<I: IntoIterator<Item = ApproachSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ── Neighbor junctions ───────────────────────────────────────────────────────

/// Turn connections for lanes arriving over the back link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackLinkSpec {
    pub connections: ConnectionMap,
}

/// A junction attached to one of the central junction's approach nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborDescription {
    pub back_link: BackLinkSpec,
    pub junction:  JunctionDescription,
}

impl NeighborDescription {
    pub fn new(back_link: BackLinkSpec, junction: JunctionDescription) -> Self {
        Self { back_link, junction }
    }

    /// Convert the positional form, in which slot 0 stands for the back link
    /// and slots `1..` are the neighbor's own approaches.
    ///
    /// Only the `connections` of slot 0 are kept.  Integer targets are
    /// re-addressed: 0 becomes [`ApproachRef::BackLink`], `k` becomes own
    /// approach `k - 1`.  Slot 0 may not declare left-turn staging, since the
    /// back link belongs to the central junction's geometry.
    pub fn from_positional(junction_id: &str, mut slots: Vec<ApproachSpec>) -> ConfigResult<Self> {
        if slots.is_empty() {
            return Err(ConfigError::NoApproaches { junction: junction_id.to_owned() });
        }
        let link = slots.remove(0);
        if link.has_staging() {
            return Err(ConfigError::StagingOnBackLink { junction: junction_id.to_owned() });
        }

        let readdress = |map: ConnectionMap| -> ConnectionMap {
            map.into_iter()
                .map(|(lane, targets)| {
                    let targets = targets
                        .into_iter()
                        .map(|t| LaneTarget { approach: shift_positional(t.approach), lane: t.lane })
                        .collect();
                    (lane, targets)
                })
                .collect()
        };

        let approaches = slots
            .into_iter()
            .map(|mut a| {
                a.connections = readdress(std::mem::take(&mut a.connections));
                a
            })
            .collect();

        Ok(Self {
            back_link: BackLinkSpec { connections: readdress(link.connections) },
            junction:  JunctionDescription::new(approaches),
        })
    }
}

fn shift_positional(r: ApproachRef) -> ApproachRef {
    match r {
        ApproachRef::Approach(ApproachIndex(0)) => ApproachRef::BackLink,
        ApproachRef::Approach(ApproachIndex(k)) => ApproachRef::Approach(ApproachIndex(k - 1)),
        ApproachRef::BackLink => ApproachRef::BackLink,
    }
}
