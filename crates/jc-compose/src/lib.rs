//! `jc-compose` — multi-junction composer.
//!
//! # Pipeline
//!
//! ```text
//! central description ──▶ layout (origin) ──▶ edges ──┐
//!   for each central approach node, clockwise:        │
//!     neighbor description ──▶ layout (anchored at    ├──▶ EdgeIndex ──▶ connections ──▶ JunctionGraph
//!       the approach node) ──▶ edges ─────────────────┘
//! ```
//!
//! Connections are resolved only after every junction's edges exist, so a
//! neighbor's back-link connections are checked against the central
//! junction's edges.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use jc_compose::NetworkComposer;
//!
//! let description = jc_core::load_network_json(path)?;
//! let graph = NetworkComposer::from_description(description).compose()?;
//! println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//! ```

pub mod composer;
pub mod graph;

#[cfg(test)]
mod tests;

pub use composer::NetworkComposer;
pub use graph::JunctionGraph;
