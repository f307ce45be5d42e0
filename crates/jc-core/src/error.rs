//! Configuration error type.
//!
//! Every malformed input is reported as a [`ConfigError`] before anything is
//! written to disk.  Downstream crates return it directly or wrap it as one
//! variant of their own error enum.

use thiserror::Error;

use crate::{ApproachIndex, LaneIndex};

/// The ConfigurationError of the junction compiler.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("junction {junction} has no approaches")]
    NoApproaches { junction: String },

    #[error("junction {junction} has {count} approaches; at most {max} can be named")]
    TooManyApproaches { junction: String, count: usize, max: usize },

    #[error("approach {approach}: negative lane count {value} for `{field}`")]
    NegativeLaneCount { approach: usize, field: &'static str, value: i64 },

    #[error("approach {approach}: missing required field `{field}`")]
    MissingField { approach: usize, field: &'static str },

    #[error("approach {approach}: invalid `{field}`: {reason}")]
    InvalidValue { approach: usize, field: &'static str, reason: String },

    #[error("connection uses lane {lane} of edge {edge}, which has {lanes} lane(s)")]
    LaneOutOfRange { edge: String, lane: LaneIndex, lanes: u32 },

    #[error("connection references unknown edge {0}")]
    UnknownEdge(String),

    #[error("junction {junction} has no approach {approach}")]
    UnknownApproach { junction: String, approach: ApproachIndex },

    #[error("the central junction has no back link to reference")]
    BackLinkOnCentral,

    #[error("neighbor {junction}: the back link cannot carry a left-turn staging segment")]
    StagingOnBackLink { junction: String },

    #[error("no neighbor description for central approach {0}")]
    MissingNeighbor(String),

    #[error("neighbor description keyed by {0}, which is not a central approach")]
    UnknownNeighbor(String),

    #[error("duplicate node id {0}")]
    DuplicateNodeId(String),

    #[error("duplicate edge id {0}")]
    DuplicateEdgeId(String),

    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: String, node: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for configuration-checked operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
