//! Network nodes produced by the layout engine.

use jc_core::Point3;

/// Role of a node in the junction network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The signal-controlled junction itself.
    Center,
    /// Outer end of an approach road.
    Approach,
    /// Left-turn staging point between an approach node and its center.
    Staging,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Center   => "center",
            NodeKind::Approach => "approach",
            NodeKind::Staging  => "staging",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id:   String,
    pub pos:  Point3,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<String>, pos: Point3, kind: NodeKind) -> Self {
        Self { id: id.into(), pos, kind }
    }

    /// The central junction node at the origin.
    pub fn center(id: impl Into<String>) -> Self {
        Self::new(id, Point3::ORIGIN, NodeKind::Center)
    }
}
