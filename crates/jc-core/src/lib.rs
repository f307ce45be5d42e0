//! `jc-core` — foundational types for the junction network compiler.
//!
//! This crate is a dependency of every other `jc-*` crate and has no `jc-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `ApproachIndex`, `LaneIndex`                               |
//! | [`geo`]         | `Point3` in the local junction frame                       |
//! | [`description`] | `ApproachSpec`, `JunctionDescription`, `NeighborDescription` |
//! | [`naming`]      | `ApproachNaming`, id conventions shared by all stages      |
//! | [`loader`]      | JSON loading into `NetworkDescription`                     |
//! | [`error`]       | `ConfigError`, `ConfigResult`                              |

pub mod description;
pub mod error;
pub mod geo;
pub mod ids;
pub mod loader;
pub mod naming;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use description::{
    ApproachRef, ApproachSpec, BackLinkSpec, ConnectionMap, JunctionDescription, LaneTarget,
    NeighborDescription,
};
pub use error::{ConfigError, ConfigResult};
pub use geo::Point3;
pub use ids::{ApproachIndex, LaneIndex};
pub use loader::{load_network_json, load_network_reader, parse_junction, parse_neighbor, NetworkDescription};
pub use naming::{ApproachNaming, JunctionRole, CENTRAL_JUNCTION_ID, MAX_APPROACHES, STAGING_SUFFIX};
