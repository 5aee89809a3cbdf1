use crate::types::{Edge, Graph, NodeId};
use std::collections::HashSet;

/// Problems in a lineage response that renderers have to tolerate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Edges with an endpoint missing from the node set
    pub dangling_edges: Vec<Edge>,
    pub duplicate_ids: Vec<NodeId>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_edges.is_empty() && self.duplicate_ids.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        let dangling = self.dangling_edges.iter().map(|edge| {
            format!(
                "edge {} -> {} references a node that is not in the graph",
                edge.from, edge.to
            )
        });
        let duplicates = self
            .duplicate_ids
            .iter()
            .map(|id| format!("node id {id} appears more than once"));
        dangling.chain(duplicates).collect()
    }

    pub fn log_warnings(&self) {
        for warning in self.warnings() {
            log::warn!("Lineage graph integrity: {warning}");
        }
    }
}

impl Graph {
    /// Never fails; callers decide whether to log.
    pub fn integrity(&self) -> IntegrityReport {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        let mut duplicate_ids = Vec::new();
        for node in &self.nodes {
            if !seen.insert(&node.id) && !duplicate_ids.contains(&node.id) {
                duplicate_ids.push(node.id.clone());
            }
        }

        let dangling_edges = self
            .edges
            .iter()
            .filter(|edge| !seen.contains(&edge.from) || !seen.contains(&edge.to))
            .cloned()
            .collect();

        IntegrityReport {
            dangling_edges,
            duplicate_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;
    use pretty_assertions::assert_eq;

    fn node(id: i64) -> Node {
        Node {
            id: NodeId::Int(id),
            group: "table".to_string(),
            label: format!("T{id}"),
        }
    }

    #[test]
    fn clean_graph_has_no_warnings() {
        let graph = Graph::new(
            vec![node(1), node(2)],
            vec![Edge {
                from: NodeId::Int(1),
                to: NodeId::Int(2),
            }],
        );
        let report = graph.integrity();
        assert!(report.is_clean());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn reports_dangling_edges_and_duplicates() {
        let dangling = Edge {
            from: NodeId::Int(1),
            to: NodeId::Int(7),
        };
        let graph = Graph::new(vec![node(1), node(1), node(1)], vec![dangling.clone()]);
        let report = graph.integrity();
        assert_eq!(report.dangling_edges, vec![dangling]);
        assert_eq!(report.duplicate_ids, vec![NodeId::Int(1)]);
        assert_eq!(report.warnings().len(), 2);
    }
}
