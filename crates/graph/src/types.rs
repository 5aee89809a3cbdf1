use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque node key, unique within a single graph response.
///
/// The lineage service emits signed 64-bit hashes; other producers may use
/// unsigned hashes or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    /// Only for values above `i64::MAX`; smaller numbers decode as `Int`
    UInt(u64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::UInt(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        i64::try_from(id).map_or(Self::UInt(id), Self::Int)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Entity in a lineage graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// Category tag (e.g. "table")
    pub group: String,

    /// Display name
    pub label: String,
}

/// Directed data flow: `from` feeds `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Snapshot of one lineage response.
///
/// Edges are not validated against the node set; see [`Graph::integrity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// The value shown before any fetch has completed
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Decode a lineage service response body
    pub fn from_json_slice(body: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn find_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.label == label)
    }
}
