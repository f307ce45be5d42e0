//! `jc-emit` — intermediate network files and the external network compiler.
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`files`]     | Intermediate file names, [`OutputTarget`]                    |
//! | [`xml`]       | `nodes.nod.xml`, `edges.edg.xml`, `connections.con.xml`      |
//! | [`csv`]       | Optional `nodes.csv` node table                              |
//! | [`config`]    | [`CompilerConfig`] and its JSON loader                       |
//! | [`compiler`]  | [`NetworkCompiler`] trait, [`Netconvert`] process adapter    |
//! | [`generator`] | [`NetworkGenerator`]: compose, write, compile                |
//! | [`error`]     | [`EmitError`], [`ExternalToolError`]                         |
//!
//! # Failure model
//!
//! Anything wrong with the descriptions surfaces as an [`EmitError`] before
//! a file is written.  Once the intermediate files exist, a failing compiler
//! is reported in [`GeneratedNetwork::compiled`] and the files stay on disk.
//!
//! ```rust,ignore
//! use jc_emit::{generate_network, CompilerConfig, OutputTarget};
//!
//! let description = jc_core::load_network_json(Path::new("network.json"))?;
//! let generated = generate_network(
//!     description,
//!     Path::new("./work"),
//!     OutputTarget::default(),
//!     CompilerConfig::default().with_timeout(120.0),
//! )?;
//! ```

pub mod compiler;
pub mod config;
pub mod csv;
pub mod error;
pub mod files;
pub mod generator;
pub mod xml;


pub use compiler::{Netconvert, NetworkCompiler};
pub use config::{load_compiler_config, CompilerConfig, PROTECTED_LEFT_ARG};
pub use crate::csv::write_node_table;
pub use error::{EmitError, EmitResult, ExternalToolError};
pub use files::{
    IntermediateFiles, OutputTarget, CONNECTIONS_FILE, DEFAULT_OUTPUT, EDGES_FILE, NODES_FILE,
    NODE_TABLE_FILE,
};
pub use generator::{generate_network, GeneratedNetwork, NetworkGenerator};
pub use xml::{node_type, write_connections, write_edges, write_intermediate, write_nodes};
