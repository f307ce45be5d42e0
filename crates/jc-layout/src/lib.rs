//! `jc-layout` — geometry layout engine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`layout`] | `layout_junction`, `angle_offset`, `JunctionLayout`       |
//! | [`node`]   | `Node`, `NodeKind`                                        |

pub mod layout;
pub mod node;


pub use layout::{angle_offset, approach_angle, layout_junction, ApproachPlacement, JunctionLayout};
pub use node::{Node, NodeKind};
