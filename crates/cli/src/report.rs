use serde::Serialize;
use superglue_graph::{Graph, IntegrityReport, Node, Reached};
use superglue_lineage::{LineageSnapshot, LineageView, LoadingStatus};
use superglue_protocol::{ErrorEnvelope, LineageQuery, SuggestionRecord};

/// `lineage --json` output
#[derive(Debug, Serialize)]
pub struct LineageReport<'a> {
    pub query: &'a LineageQuery,
    pub status: LoadingStatus,
    pub message: Option<&'static str>,
    pub graph: &'a Graph,
    pub warnings: Vec<String>,
    pub error: Option<ErrorEnvelope>,
}

impl<'a> LineageReport<'a> {
    pub fn new(
        query: &'a LineageQuery,
        snapshot: &'a LineageSnapshot,
        error: Option<ErrorEnvelope>,
    ) -> Self {
        Self {
            query,
            status: snapshot.status,
            message: LineageView::from_snapshot(snapshot).message(),
            graph: &snapshot.graph,
            warnings: snapshot.graph.integrity().warnings(),
            error,
        }
    }
}

pub fn render_lineage(query: &LineageQuery, snapshot: &LineageSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Lineage for {} ({}, depth {})\n",
        query.entity_name, query.entity_type, query.depth
    ));

    let graph = match LineageView::from_snapshot(snapshot) {
        LineageView::Ready(graph) => graph,
        view => {
            out.push_str(view.message().unwrap_or_default());
            out.push('\n');
            return out;
        }
    };

    out.push_str(&format!(
        "{} nodes, {} edges\n",
        graph.node_count(),
        graph.edge_count()
    ));

    match graph.find_by_label(&query.entity_name) {
        Some(root) => {
            render_walk(&mut out, "Upstream", graph.upstream(&root.id).unwrap_or_default());
            render_walk(
                &mut out,
                "Downstream",
                graph.downstream(&root.id).unwrap_or_default(),
            );
        }
        None => {
            out.push_str("(entity itself is not part of the returned graph)\n");
        }
    }

    if !graph.edges.is_empty() {
        out.push_str("\nEdges:\n");
        for edge in &graph.edges {
            out.push_str(&format!(
                "  {} -> {}\n",
                label_or_id(graph.node(&edge.from), &edge.from.to_string()),
                label_or_id(graph.node(&edge.to), &edge.to.to_string())
            ));
        }
    }

    render_integrity(&mut out, &graph.integrity());
    out
}

fn render_walk(out: &mut String, title: &str, reached: Vec<Reached<'_>>) {
    out.push_str(&format!("\n{title} ({}):\n", reached.len()));
    for step in reached {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            step.distance, step.node.label, step.node.group
        ));
    }
}

fn render_integrity(out: &mut String, report: &IntegrityReport) {
    if report.is_clean() {
        return;
    }
    out.push_str("\nWarnings:\n");
    for warning in report.warnings() {
        out.push_str(&format!("  {warning}\n"));
    }
}

fn label_or_id<'a>(node: Option<&'a Node>, id: &'a str) -> &'a str {
    node.map_or(id, |node| node.label.as_str())
}

pub fn render_suggestions(suggestions: &[SuggestionRecord]) -> String {
    if suggestions.is_empty() {
        return "No matching entities\n".to_string();
    }

    let headers = ["Schema", "Name", "Type", "Platform", "Link"];
    let rows: Vec<[String; 5]> = suggestions
        .iter()
        .map(|s| {
            [
                s.job_group.clone(),
                s.name.clone(),
                s.entity_type.to_lowercase(),
                s.system.clone(),
                s.dashboard_link(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
