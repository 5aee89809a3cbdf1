use crate::error::Result;
use crate::hits::suggestions_from_response;
use crate::index::SearchIndex;
use crate::query::{build_query, LINEAGE_INDEX};
use log::{debug, error};
use std::sync::Arc;
use superglue_protocol::{RequestSequencer, ResponseOrdering, SearchState, SuggestionRecord};
use tokio::sync::watch;

/// Owns the search box state and the suggestions shown under it.
pub struct SearchSession {
    index: Arc<dyn SearchIndex>,
    index_name: String,
    ordering: ResponseOrdering,
    sequencer: RequestSequencer,
    state_tx: watch::Sender<SearchState>,
}

impl SearchSession {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        let (state_tx, _) = watch::channel(SearchState::default());
        Self {
            index,
            index_name: LINEAGE_INDEX.to_string(),
            ordering: ResponseOrdering::default(),
            sequencer: RequestSequencer::new(),
            state_tx,
        }
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    pub fn search_term(&self) -> String {
        self.state_tx.borrow().search_term.clone()
    }

    pub fn suggestions(&self) -> Vec<SuggestionRecord> {
        self.state_tx.borrow().suggestions.clone()
    }

    /// Empty the search box and its suggestions.
    pub fn clear(&self) {
        self.state_tx.send_replace(SearchState::default());
    }

    /// Startup state. Searches issued before the reset are stale under
    /// `LatestRequestWins`; with `LastArrivalWins` they may still land.
    pub fn reset(&self) {
        self.sequencer.reset();
        self.clear();
    }

    /// Search and return whatever suggestions are visible afterwards.
    ///
    /// Failures are logged and leave the previous suggestions in place.
    pub async fn search(&self, term: &str) -> Vec<SuggestionRecord> {
        if let Err(err) = self.try_search(term).await {
            error!("Search for '{term}' failed: {err}");
        }
        self.suggestions()
    }

    /// Like [`SearchSession::search`] but reports the failure to the caller.
    pub async fn try_search(&self, term: &str) -> Result<Vec<SuggestionRecord>> {
        let seq = self.sequencer.issue();
        self.state_tx
            .send_modify(|state| state.search_term = term.to_string());

        let query = build_query(term);
        if query.is_match_none() {
            self.apply(seq, Vec::new());
            return Ok(self.suggestions());
        }

        debug!("Search request #{seq} for '{term}'");
        let response = self.index.search(&self.index_name, &query).await?;
        let suggestions = suggestions_from_response(&response)?;
        debug!("Search request #{seq}: {} suggestions", suggestions.len());

        self.apply(seq, suggestions);
        Ok(self.suggestions())
    }

    fn apply(&self, seq: u64, suggestions: Vec<SuggestionRecord>) {
        let applied = self.state_tx.send_if_modified(|state| {
            if !self.sequencer.admit(self.ordering, seq) {
                return false;
            }
            state.suggestions = suggestions;
            true
        });
        if !applied {
            debug!("Search response #{seq} discarded, a newer request was applied");
        }
    }
}
