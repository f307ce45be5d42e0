//! Node table export.
//!
//! `nodes.csv` lists every node of a composed graph, one row per node, in
//! the same order as `nodes.nod.xml`:
//!
//! ```text
//! id,kind,x,y,z
//! TL,center,0,0,0
//! A,approach,0.000000000000006123233995736766,100,-0
//! ```

use std::path::Path;

use csv::Writer;
use tracing::debug;

use jc_compose::JunctionGraph;

use crate::EmitResult;

pub const NODE_TABLE_HEADER: [&str; 5] = ["id", "kind", "x", "y", "z"];

/// Write the node table of `graph` to `path`, replacing any existing file.
pub fn write_node_table(graph: &JunctionGraph, path: &Path) -> EmitResult<()> {
    let mut w = Writer::from_path(path)?;
    w.write_record(NODE_TABLE_HEADER)?;
    for n in &graph.nodes {
        w.write_record(&[
            n.id.clone(),
            n.kind.to_string(),
            n.pos.x.to_string(),
            n.pos.y.to_string(),
            n.pos.z.to_string(),
        ])?;
    }
    w.flush()?;
    debug!(path = %path.display(), rows = graph.node_count(), "wrote node table");
    Ok(())
}
