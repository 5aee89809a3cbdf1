use crate::session::LineageSnapshot;
use crate::status::LoadingStatus;
use superglue_graph::Graph;

/// What the lineage pane shows for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineageView<'a> {
    NotLoaded,
    Loading,
    Ready(&'a Graph),
    NotFound,
    /// Status value outside the known set
    Broken,
}

impl<'a> LineageView<'a> {
    pub fn new(status: LoadingStatus, graph: &'a Graph) -> Self {
        match status {
            LoadingStatus::NotLoaded => Self::NotLoaded,
            LoadingStatus::Loading => Self::Loading,
            LoadingStatus::FinishedSuccess => Self::Ready(graph),
            LoadingStatus::FinishedFailure => Self::NotFound,
        }
    }

    pub fn from_snapshot(snapshot: &'a LineageSnapshot) -> Self {
        Self::new(snapshot.status, &snapshot.graph)
    }

    /// Boundary for status values that arrive as text (persisted or foreign state).
    pub fn from_raw_status(raw: &str, graph: &'a Graph) -> Self {
        match raw.parse::<LoadingStatus>() {
            Ok(status) => Self::new(status, graph),
            Err(err) => {
                log::error!("{err}");
                Self::Broken
            }
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NotLoaded => Some("Lineage Not Loaded"),
            Self::Loading => Some("Loading lineage..."),
            Self::Ready(_) => None,
            Self::NotFound => Some("No lineage found"),
            Self::Broken => Some("Oops, something went wrong"),
        }
    }
}
