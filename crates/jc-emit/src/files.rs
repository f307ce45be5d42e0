//! Locations of the intermediate files and of the compiled network.

use std::path::{Path, PathBuf};

pub const NODES_FILE:       &str = "nodes.nod.xml";
pub const EDGES_FILE:       &str = "edges.edg.xml";
pub const CONNECTIONS_FILE: &str = "connections.con.xml";
pub const NODE_TABLE_FILE:  &str = "nodes.csv";
pub const DEFAULT_OUTPUT:   &str = "net.net.xml";

/// The three files handed to the network compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntermediateFiles {
    pub nodes:       PathBuf,
    pub edges:       PathBuf,
    pub connections: PathBuf,
}

impl IntermediateFiles {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            nodes:       dir.join(NODES_FILE),
            edges:       dir.join(EDGES_FILE),
            connections: dir.join(CONNECTIONS_FILE),
        }
    }

    pub fn all_exist(&self) -> bool {
        [&self.nodes, &self.edges, &self.connections]
            .iter()
            .all(|p| p.is_file())
    }
}

/// Where the compiled network goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// Bare file name, placed inside the working directory.
    FileName(String),
    /// Used as given.
    Path(PathBuf),
}

impl OutputTarget {
    pub fn resolve(&self, working_dir: &Path) -> PathBuf {
        match self {
            OutputTarget::FileName(name) => working_dir.join(name),
            OutputTarget::Path(path) => path.clone(),
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget::FileName(DEFAULT_OUTPUT.to_owned())
    }
}
