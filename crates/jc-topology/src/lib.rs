//! `jc-topology` — edge synthesis and lane-connection resolution.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`edge`]       | `Edge`, `EdgeRole`, `synthesize_edges`                  |
//! | [`connection`] | `Connection`, `EdgeIndex`, `resolve_connections`        |
//!
//! Both stages take the junction's [`jc_core::ApproachNaming`], so edge ids
//! produced here are exactly the ids the resolver looks up.

pub mod connection;
pub mod edge;


pub use connection::{resolve_connections, Connection, EdgeIndex};
pub use edge::{synthesize_edges, Edge, EdgeRole};
