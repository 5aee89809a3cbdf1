use crate::error::{GraphError, Result};
use crate::types::{Graph, Node, NodeId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// Petgraph view over a [`Graph`] snapshot.
///
/// Dangling edges are left out; duplicate ids resolve to their first node.
pub struct LineageDiGraph<'a> {
    pub graph: DiGraph<&'a Node, ()>,
    pub index: HashMap<&'a NodeId, NodeIndex>,
}

/// A node reached by traversal and its hop count from the start node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached<'a> {
    pub node: &'a Node,
    pub distance: usize,
}

impl Graph {
    pub fn to_digraph(&self) -> LineageDiGraph<'_> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            if index.contains_key(&node.id) {
                continue;
            }
            let idx = graph.add_node(node);
            index.insert(&node.id, idx);
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
                graph.add_edge(from, to, ());
            }
        }

        LineageDiGraph { graph, index }
    }

    /// Everything that feeds into `id`, nearest first
    pub fn upstream(&self, id: &NodeId) -> Result<Vec<Reached<'_>>> {
        self.to_digraph().walk(id, Direction::Incoming)
    }

    /// Everything `id` feeds into, nearest first
    pub fn downstream(&self, id: &NodeId) -> Result<Vec<Reached<'_>>> {
        self.to_digraph().walk(id, Direction::Outgoing)
    }
}

impl<'a> LineageDiGraph<'a> {
    pub fn walk(&self, start: &NodeId, direction: Direction) -> Result<Vec<Reached<'a>>> {
        let start_idx = *self
            .index
            .get(start)
            .ok_or_else(|| GraphError::NodeNotFound(start.to_string()))?;

        let mut visited = HashSet::from([start_idx]);
        let mut queue = VecDeque::from([(start_idx, 0usize)]);
        let mut reached = Vec::new();

        // Breadth-first so distances are shortest hop counts; cycles are cut by `visited`.
        while let Some((current, distance)) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, direction) {
                if visited.insert(next) {
                    reached.push(Reached {
                        node: self.graph[next],
                        distance: distance + 1,
                    });
                    queue.push_back((next, distance + 1));
                }
            }
        }

        reached.sort_by_key(|r| r.distance);
        Ok(reached)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
