use crate::error::{LineageError, Result};
use crate::refetch::should_refetch;
use crate::status::{FetchOutcome, LoadingStatus};
use crate::transport::{LineageTransport, RequestPath};
use log::{debug, error, info};
use serde::Serialize;
use std::sync::Arc;
use superglue_graph::Graph;
use superglue_protocol::{Depth, LineageQuery, RequestSequencer, ResponseOrdering};
use tokio::sync::watch;

/// Everything the presentation layer needs to draw the lineage pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageSnapshot {
    pub status: LoadingStatus,
    pub graph: Arc<Graph>,

    /// Most recently requested selection
    pub query: Option<LineageQuery>,

    /// Selection whose response produced `graph`
    pub loaded_query: Option<LineageQuery>,
}

impl LineageSnapshot {
    pub fn initial() -> Self {
        Self {
            status: LoadingStatus::NotLoaded,
            graph: Arc::new(Graph::empty()),
            query: None,
            loaded_query: None,
        }
    }
}

/// Owns the lineage graph snapshot and its loading status.
///
/// Fetches take `&self`, so several may be in flight at once; which response
/// becomes visible is decided by the session's [`ResponseOrdering`].
pub struct LineageSession {
    transport: Arc<dyn LineageTransport>,
    ordering: ResponseOrdering,
    sequencer: RequestSequencer,
    state_tx: watch::Sender<LineageSnapshot>,
}

impl LineageSession {
    pub fn new(transport: Arc<dyn LineageTransport>) -> Self {
        let (state_tx, _) = watch::channel(LineageSnapshot::initial());
        Self {
            transport,
            ordering: ResponseOrdering::default(),
            sequencer: RequestSequencer::new(),
            state_tx,
        }
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<LineageSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> LineageSnapshot {
        self.state_tx.borrow().clone()
    }

    pub fn status(&self) -> LoadingStatus {
        self.state_tx.borrow().status
    }

    pub fn graph(&self) -> Arc<Graph> {
        self.state_tx.borrow().graph.clone()
    }

    /// Back to the startup state.
    ///
    /// A response still in flight is dropped if it lands before the next fetch;
    /// after that it is handled by the session's ordering like any other.
    pub fn reset(&self) {
        self.sequencer.reset();
        self.state_tx.send_replace(LineageSnapshot::initial());
    }

    /// Fetch the graph for `query` and make it the visible snapshot.
    ///
    /// On failure the previous graph stays visible and the status becomes
    /// `FinishedFailure`.
    pub async fn fetch_lineage(&self, query: &LineageQuery) -> Result<Arc<Graph>> {
        let seq = self.sequencer.issue();
        let path = RequestPath::lineage(query);

        self.state_tx.send_modify(|state| {
            state.status = state.status.begin();
            state.query = Some(query.clone());
        });
        debug!("Lineage request #{seq}: {path}");

        let outcome = match self.transport.get(&path).await {
            Ok(body) => Graph::from_json_slice(&body)
                .map(Arc::new)
                .map_err(LineageError::from),
            Err(err) => Err(err),
        };

        self.apply(seq, query, outcome)
    }

    /// Fetch only when the selection differs from the last requested one.
    pub async fn navigate(&self, query: &LineageQuery) -> Result<Option<Arc<Graph>>> {
        let previous = self.state_tx.borrow().query.clone();
        if !should_refetch(previous.as_ref(), query) {
            debug!(
                "Lineage selection unchanged ({}/{}), skipping fetch",
                query.entity_type, query.entity_name
            );
            return Ok(None);
        }
        self.fetch_lineage(query).await.map(Some)
    }

    /// Re-fetch the current entity at another depth.
    pub async fn set_depth(&self, depth: Depth) -> Result<Arc<Graph>> {
        let current = self
            .state_tx
            .borrow()
            .query
            .clone()
            .ok_or(LineageError::NoActiveQuery)?;
        self.fetch_lineage(&current.with_depth(depth)).await
    }

    fn apply(
        &self,
        seq: u64,
        query: &LineageQuery,
        outcome: Result<Arc<Graph>>,
    ) -> Result<Arc<Graph>> {
        let fetch_outcome = match outcome {
            Ok(_) => FetchOutcome::Success,
            Err(_) => FetchOutcome::Failure,
        };
        let mut applied = Ok(false);

        self.state_tx.send_if_modified(|state| {
            let next = match state.status.finish(fetch_outcome) {
                Ok(next) => next,
                Err(err) => {
                    applied = Err(err);
                    return false;
                }
            };
            if !self.sequencer.admit(self.ordering, seq) {
                return false;
            }
            state.status = next;
            if let Ok(graph) = &outcome {
                state.graph = graph.clone();
                state.loaded_query = Some(query.clone());
            }
            applied = Ok(true);
            true
        });

        match (applied, outcome) {
            (Ok(true), Ok(graph)) => {
                graph.integrity().log_warnings();
                info!(
                    "Lineage for {}/{} at depth {}: {} nodes, {} edges",
                    query.entity_type,
                    query.entity_name,
                    query.depth,
                    graph.node_count(),
                    graph.edge_count()
                );
                Ok(graph)
            }
            (Ok(true), Err(err)) => {
                error!("Lineage request #{seq} failed: {err}");
                Err(err)
            }
            (Ok(false), Ok(_)) => {
                debug!("Lineage response #{seq} discarded, a newer request was applied");
                Err(LineageError::Superseded(seq))
            }
            (Ok(false), Err(err)) => {
                debug!("Lineage failure #{seq} discarded: {err}");
                Err(err)
            }
            (Err(transition), _) => {
                debug!("Lineage response #{seq} arrived after reset: {transition}");
                Err(transition)
            }
        }
    }
}
