//! Plain-XML intermediate files.
//!
//! ```xml
//! <nodes>
//!     <node id="TL" x="0" y="0" z="0" type="traffic_light_right_on_red"/>
//!     <node id="A" x="0.000000000000006" y="100" z="-0" type="traffic_light"/>
//!     <node id="A_intern" x="…" y="30" z="-0"/>
//! </nodes>
//! <edges>
//!     <edge id="A2TL" from="A" to="A_intern" speed="13.9" numLanes="2"/>
//! </edges>
//! <connections>
//!     <connection from="A2TL_intern" to="TL2C" fromLane="0" toLane="0"/>
//! </connections>
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::debug;

use jc_compose::JunctionGraph;
use jc_layout::{Node, NodeKind};
use jc_topology::{Connection, Edge};

use crate::{EmitResult, IntermediateFiles};

/// Control type written for a node; staging nodes carry none.
pub fn node_type(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Center   => Some("traffic_light_right_on_red"),
        NodeKind::Approach => Some("traffic_light"),
        NodeKind::Staging  => None,
    }
}

/// Write all three intermediate files.
pub fn write_intermediate(graph: &JunctionGraph, files: &IntermediateFiles) -> EmitResult<()> {
    write_file(&files.nodes, |out| write_nodes(graph, out))?;
    write_file(&files.edges, |out| write_edges(graph, out))?;
    write_file(&files.connections, |out| write_connections(graph, out))?;
    Ok(())
}

pub fn write_nodes<W: Write>(graph: &JunctionGraph, out: W) -> EmitResult<()> {
    write_list(out, "nodes", &graph.nodes, node_element)
}

pub fn write_edges<W: Write>(graph: &JunctionGraph, out: W) -> EmitResult<()> {
    write_list(out, "edges", &graph.edges, edge_element)
}

pub fn write_connections<W: Write>(graph: &JunctionGraph, out: W) -> EmitResult<()> {
    write_list(out, "connections", &graph.connections, connection_element)
}

// ── Elements ──────────────────────────────────────────────────────────────────

fn node_element(n: &Node) -> BytesStart<'static> {
    let mut el = BytesStart::new("node");
    el.push_attribute(("id", n.id.as_str()));
    el.push_attribute(("x", n.pos.x.to_string().as_str()));
    el.push_attribute(("y", n.pos.y.to_string().as_str()));
    el.push_attribute(("z", n.pos.z.to_string().as_str()));
    if let Some(ty) = node_type(n.kind) {
        el.push_attribute(("type", ty));
    }
    el
}

fn edge_element(e: &Edge) -> BytesStart<'static> {
    let mut el = BytesStart::new("edge");
    el.push_attribute(("id", e.id.as_str()));
    el.push_attribute(("from", e.from.as_str()));
    el.push_attribute(("to", e.to.as_str()));
    el.push_attribute(("speed", e.speed.to_string().as_str()));
    el.push_attribute(("numLanes", e.num_lanes.to_string().as_str()));
    el
}

fn connection_element(c: &Connection) -> BytesStart<'static> {
    let mut el = BytesStart::new("connection");
    el.push_attribute(("from", c.from_edge.as_str()));
    el.push_attribute(("to", c.to_edge.as_str()));
    el.push_attribute(("fromLane", c.from_lane.to_string().as_str()));
    el.push_attribute(("toLane", c.to_lane.to_string().as_str()));
    el
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_list<W: Write, T>(
    out:     W,
    root:    &str,
    items:   &[T],
    element: impl Fn(&T) -> BytesStart<'static>,
) -> EmitResult<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(root)))?;
    for item in items {
        writer.write_event(Event::Empty(element(item)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    writer.into_inner().flush()?;
    Ok(())
}

fn write_file(path: &Path, body: impl FnOnce(&mut BufWriter<File>) -> EmitResult<()>) -> EmitResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    body(&mut out)?;
    out.flush()?;
    debug!(path = %path.display(), "wrote intermediate file");
    Ok(())
}
