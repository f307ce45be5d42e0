//! JSON description loader.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "central": [
//!     { "num_incoming": 2, "num_outgoing": 1, "length": 100, "speed": 13.9,
//!       "slope": 0.0, "left_turn_only_length": 30,
//!       "incoming_TL_cycle_duration": 60,
//!       "connections": { "0": [[1, 0]], "1": [[2, 0], [2, 1]] } },
//!     …
//!   ],
//!   "neighbors": {
//!     "A": [ { "connections": { "0": [[1, 0]] } }, { …own approach… } ],
//!     "B": { "back_link": { "connections": { "0": [[0, 0]] } },
//!            "approaches": [ { … }, { …, "connections": { "0": [["back_link", 0]] } } ] }
//!   }
//! }
//! ```
//!
//! `connections` keys are incoming lane indices; values are `[target, lane]`
//! pairs.  A neighbor given as an **array** uses positional addressing: slot 0
//! stands for the back link to the central junction (only its
//! `connections` are read) and target `k` means own approach `k - 1`.  A
//! neighbor given as an **object** addresses its own approaches directly and
//! names the back link `"back_link"`.
//!
//! `num_incoming` / `num_outgoing` default to 0.  `length`, `speed` and
//! `slope` are required.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::description::{
    ApproachRef, ApproachSpec, BackLinkSpec, ConnectionMap, JunctionDescription, LaneTarget,
    NeighborDescription,
};
use crate::{ApproachIndex, ConfigError, ConfigResult, LaneIndex};

/// Target name accepted for the back link in explicit neighbor objects.
pub const BACK_LINK_KEY: &str = "back_link";

// ── Raw records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawNetwork {
    central:   Vec<RawApproach>,
    #[serde(default)]
    neighbors: BTreeMap<String, RawNeighbor>,
}

#[derive(Deserialize)]
struct RawApproach {
    num_incoming:          Option<i64>,
    num_outgoing:          Option<i64>,
    length:                Option<f64>,
    speed:                 Option<f64>,
    left_turn_only_length: Option<f64>,
    slope:                 Option<f64>,
    #[serde(rename = "incoming_TL_cycle_duration")]
    incoming_tl_cycle_duration: Option<f64>,
    #[serde(default)]
    connections:           RawConnections,
}

#[derive(Deserialize, Default)]
struct RawBackLink {
    #[serde(default)]
    connections: RawConnections,
}

type RawConnections = BTreeMap<String, Vec<(RawTarget, i64)>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Index(i64),
    Named(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNeighbor {
    Positional(Vec<RawApproach>),
    Explicit {
        #[serde(default)]
        back_link:  RawBackLink,
        approaches: Vec<RawApproach>,
    },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// A central junction plus its neighbors, keyed by central approach node id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkDescription {
    pub central:   JunctionDescription,
    pub neighbors: BTreeMap<String, NeighborDescription>,
}

/// Load a [`NetworkDescription`] from a JSON file.
pub fn load_network_json(path: &Path) -> ConfigResult<NetworkDescription> {
    let file = std::fs::File::open(path).map_err(ConfigError::Io)?;
    load_network_reader(std::io::BufReader::new(file))
}

/// Like [`load_network_json`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R) -> ConfigResult<NetworkDescription> {
    let raw: RawNetwork =
        serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let central = convert_junction(raw.central, false)?;
    let neighbors = raw
        .neighbors
        .into_iter()
        .map(|(id, n)| convert_neighbor(&id, n).map(|d| (id, d)))
        .collect::<ConfigResult<_>>()?;

    Ok(NetworkDescription { central, neighbors })
}

/// Parse a bare JSON array of approaches as a central junction.
pub fn parse_junction(json: &str) -> ConfigResult<JunctionDescription> {
    let raw: Vec<RawApproach> =
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
    convert_junction(raw, false)
}

/// Parse one neighbor description in either the positional or the explicit
/// shape.  `junction_id` is the central approach node it attaches to.
pub fn parse_neighbor(junction_id: &str, json: &str) -> ConfigResult<NeighborDescription> {
    let raw: RawNeighbor =
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
    convert_neighbor(junction_id, raw)
}

// ── Conversion ────────────────────────────────────────────────────────────────

fn convert_neighbor(junction_id: &str, raw: RawNeighbor) -> ConfigResult<NeighborDescription> {
    match raw {
        RawNeighbor::Positional(slots) => {
            let slots = slots
                .into_iter()
                .enumerate()
                .map(|(i, a)| convert_slot(i, a, true))
                .collect::<ConfigResult<Vec<_>>>()?;
            NeighborDescription::from_positional(junction_id, slots)
        }
        RawNeighbor::Explicit { back_link, approaches } => Ok(NeighborDescription {
            back_link: BackLinkSpec { connections: convert_connections(0, back_link.connections, true)? },
            junction:  convert_junction(approaches, true)?,
        }),
    }
}

fn convert_junction(raw: Vec<RawApproach>, allow_back_link: bool) -> ConfigResult<JunctionDescription> {
    let approaches = raw
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let spec = convert_approach(i, a, allow_back_link)?;
            spec.validate(i)?;
            Ok(spec)
        })
        .collect::<ConfigResult<Vec<_>>>()?;
    Ok(JunctionDescription::new(approaches))
}

/// Positional slot 0 only contributes its connections, so its geometry
/// fields are optional.
fn convert_slot(i: usize, raw: RawApproach, allow_back_link: bool) -> ConfigResult<ApproachSpec> {
    if i == 0 {
        let staging = raw.left_turn_only_length;
        let mut spec = ApproachSpec::new(0, 0, 1.0, 1.0);
        spec.left_turn_only_length = staging;
        spec.connections = convert_connections(i, raw.connections, allow_back_link)?;
        return Ok(spec);
    }
    let spec = convert_approach(i, raw, allow_back_link)?;
    spec.validate(i)?;
    Ok(spec)
}

fn convert_approach(i: usize, raw: RawApproach, allow_back_link: bool) -> ConfigResult<ApproachSpec> {
    let required = |v: Option<f64>, field: &'static str| {
        v.ok_or(ConfigError::MissingField { approach: i, field })
    };

    Ok(ApproachSpec {
        num_incoming:               lane_count(i, "num_incoming", raw.num_incoming)?,
        num_outgoing:               lane_count(i, "num_outgoing", raw.num_outgoing)?,
        length:                     required(raw.length, "length")?,
        speed:                      required(raw.speed, "speed")?,
        left_turn_only_length:      raw.left_turn_only_length,
        slope:                      required(raw.slope, "slope")?,
        incoming_tl_cycle_duration: raw.incoming_tl_cycle_duration,
        connections:                convert_connections(i, raw.connections, allow_back_link)?,
    })
}

fn lane_count(i: usize, field: &'static str, value: Option<i64>) -> ConfigResult<u32> {
    match value {
        None => Ok(0),
        Some(v) if v < 0 => Err(ConfigError::NegativeLaneCount { approach: i, field, value: v }),
        Some(v) => u32::try_from(v).map_err(|_| ConfigError::InvalidValue {
            approach: i,
            field,
            reason:   format!("{v} lanes is out of range"),
        }),
    }
}

fn convert_connections(i: usize, raw: RawConnections, allow_back_link: bool) -> ConfigResult<ConnectionMap> {
    let invalid = |reason: String| ConfigError::InvalidValue { approach: i, field: "connections", reason };

    let mut map = ConnectionMap::new();
    for (key, targets) in raw {
        let lane: u32 = key
            .trim()
            .parse()
            .map_err(|_| invalid(format!("lane key {key:?} is not a non-negative integer")))?;

        let targets = targets
            .into_iter()
            .map(|(target, lane)| {
                let approach = match target {
                    RawTarget::Index(k) => u32::try_from(k)
                        .map(|k| ApproachRef::Approach(ApproachIndex(k)))
                        .map_err(|_| invalid(format!("target approach {k} is negative")))?,
                    RawTarget::Named(name) if name == BACK_LINK_KEY => {
                        if !allow_back_link {
                            return Err(ConfigError::BackLinkOnCentral);
                        }
                        ApproachRef::BackLink
                    }
                    RawTarget::Named(name) => {
                        return Err(invalid(format!("unknown target {name:?}")));
                    }
                };
                let lane = u32::try_from(lane)
                    .map_err(|_| invalid(format!("target lane {lane} is negative")))?;
                Ok(LaneTarget { approach, lane: LaneIndex(lane) })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        map.entry(LaneIndex(lane)).or_default().extend(targets);
    }
    Ok(map)
}
