use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use superglue_protocol::{ResponseOrdering, SearchState, SuggestionRecord};
use superglue_search::{IndexQuery, Result, SearchError, SearchIndex, SearchSession};
use tokio::sync::oneshot;

fn hit(name: &str, entity_type: &str, platform: &str, schema: &str) -> Value {
    json!({"_source": {"name": name, "type": entity_type, "platform": platform, "schema": schema}})
}

fn response(hits: Vec<Value>) -> Value {
    let total = hits.len();
    json!({"took": 1, "timed_out": false, "hits": {"total": total, "hits": hits}})
}

fn record(name: &str, entity_type: &str, system: &str, job_group: &str) -> SuggestionRecord {
    SuggestionRecord {
        name: name.to_string(),
        entity_type: entity_type.to_string(),
        system: system.to_string(),
        job_group: job_group.to_string(),
    }
}

#[derive(Default)]
struct FakeIndex {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<(String, IndexQuery)>>,
}

impl FakeIndex {
    fn with(responses: Vec<Result<Value>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<(String, IndexQuery)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for FakeIndex {
    async fn search(&self, index: &str, query: &IndexQuery) -> Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((index.to_string(), query.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::Other("no scripted response".into())))
    }
}

/// Answers each term only when the test releases it.
#[derive(Default)]
struct GatedIndex {
    gates: Mutex<Vec<(String, oneshot::Receiver<Result<Value>>)>>,
}

impl GatedIndex {
    fn gate(&self, term: &str) -> oneshot::Sender<Result<Value>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push((term.to_string(), rx));
        tx
    }
}

#[async_trait]
impl SearchIndex for GatedIndex {
    async fn search(&self, _index: &str, query: &IndexQuery) -> Result<Value> {
        let IndexQuery::Ranked { term } = query else {
            return Err(SearchError::Other("match_none must not be dispatched".into()));
        };
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            let position = gates.iter().position(|(t, _)| t == term);
            position.map(|p| gates.remove(p).1)
        };
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(SearchError::Other("gate dropped".into()))),
            None => Err(SearchError::Other(format!("unexpected term {term}"))),
        }
    }
}

#[tokio::test]
async fn qbo_search_sets_term_before_response_and_maps_hits() {
    let index = Arc::new(GatedIndex::default());
    let release = index.gate("qbo");
    let session = Arc::new(SearchSession::new(index.clone()));
    let mut rx = session.subscribe();

    let task = {
        let session = session.clone();
        tokio::spawn(async move { session.search("qbo").await })
    };

    rx.wait_for(|state| state.search_term == "qbo")
        .await
        .expect("term observed");
    assert!(session.suggestions().is_empty(), "response not delivered yet");

    release
        .send(Ok(response(vec![hit("QBO_X", "TABLE", "VERTICA", "QBO_DWH")])))
        .unwrap();
    let suggestions = task.await.unwrap();

    let expected = vec![record("QBO_X", "TABLE", "VERTICA", "QBO_DWH")];
    assert_eq!(suggestions, expected);
    let state = session.state();
    assert_eq!(state.search_term, "qbo");
    assert_eq!(state.suggestions, expected);
}

#[tokio::test]
async fn suggestions_follow_index_order() {
    let index = FakeIndex::with(vec![Ok(response(vec![
        hit("QBO_USER", "TABLE", "VERTICA", "QBO"),
        hit("DIM_QBO_USER", "TABLE", "VERTICA", "DWH"),
        hit("LOAD_QBO_USER", "JOB", "INFORMATICA", "ETL"),
    ]))]);
    let session = SearchSession::new(index.clone());

    let names: Vec<String> = session
        .search("qbo user")
        .await
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["QBO_USER", "DIM_QBO_USER", "LOAD_QBO_USER"]);

    let requests = index.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "lineage");
    assert_eq!(requests[0].1.size(), 50);
}

#[tokio::test]
async fn blank_term_clears_suggestions_without_dispatch() {
    let index = FakeIndex::with(vec![Ok(response(vec![hit("QBO_X", "TABLE", "V", "S")]))]);
    let session = SearchSession::new(index.clone());

    assert_eq!(session.search("qbo").await.len(), 1);
    assert!(session.search("   ").await.is_empty());
    assert_eq!(session.search_term(), "   ");
    assert_eq!(index.requests().len(), 1);
}

#[tokio::test]
async fn failure_keeps_previous_suggestions() {
    let index = FakeIndex::with(vec![
        Ok(response(vec![hit("QBO_X", "TABLE", "VERTICA", "QBO_DWH")])),
        Err(SearchError::HttpStatus {
            status: 503,
            index: "lineage".into(),
        }),
    ]);
    let session = SearchSession::new(index);

    let first = session.search("qbo").await;
    let second = session.search("qbo_x").await;
    assert_eq!(second, first);
    assert_eq!(session.search_term(), "qbo_x");
}

#[tokio::test]
async fn try_search_reports_malformed_response() {
    let index = FakeIndex::with(vec![Ok(json!({"error": {"type": "index_not_found_exception"}}))]);
    let session = SearchSession::new(index);

    let err = session.try_search("qbo").await.unwrap_err();
    assert!(matches!(err, SearchError::MalformedResponse(_)));
    assert!(session.suggestions().is_empty());
}

#[tokio::test]
async fn clear_resets_term_and_suggestions() {
    let index = FakeIndex::with(vec![Ok(response(vec![hit("QBO_X", "TABLE", "V", "S")]))]);
    let session = SearchSession::new(index);
    session.search("qbo").await;

    session.clear();
    let state = session.state();
    assert_eq!(state.search_term, "");
    assert!(state.suggestions.is_empty());
}

#[tokio::test]
async fn custom_index_name_is_used() {
    let index = FakeIndex::with(vec![Ok(response(Vec::new()))]);
    let session = SearchSession::new(index.clone()).with_index_name("lineage_v2");
    session.search("qbo").await;
    assert_eq!(index.requests()[0].0, "lineage_v2");
}

async fn keystroke_race(ordering: ResponseOrdering) -> Vec<SuggestionRecord> {
    let index = Arc::new(GatedIndex::default());
    let release_q = index.gate("q");
    let release_qb = index.gate("qb");
    let session = Arc::new(SearchSession::new(index.clone()).with_ordering(ordering));
    let mut rx = session.subscribe();

    let spawn_search = |term: &'static str| {
        let session = session.clone();
        tokio::spawn(async move { session.search(term).await })
    };

    let first = spawn_search("q");
    rx.wait_for(|s| s.search_term == "q").await.unwrap();
    let second = spawn_search("qb");
    rx.wait_for(|s| s.search_term == "qb").await.unwrap();

    release_qb
        .send(Ok(response(vec![hit("QB_TABLE", "TABLE", "V", "S")])))
        .unwrap();
    second.await.unwrap();
    release_q
        .send(Ok(response(vec![hit("Q_TABLE", "TABLE", "V", "S")])))
        .unwrap();
    first.await.unwrap();

    session.suggestions()
}

#[tokio::test]
async fn late_response_wins_by_default() {
    let suggestions = keystroke_race(ResponseOrdering::LastArrivalWins).await;
    assert_eq!(suggestions[0].name, "Q_TABLE");
}

#[tokio::test]
async fn latest_request_ordering_keeps_newest_keystroke() {
    let suggestions = keystroke_race(ResponseOrdering::LatestRequestWins).await;
    assert_eq!(suggestions[0].name, "QB_TABLE");
}

/// Searches "old", resets, searches "new", then delivers both responses.
async fn reset_then_search(ordering: ResponseOrdering, stale_first: bool) -> SearchState {
    let index = Arc::new(GatedIndex::default());
    let release_old = index.gate("old");
    let release_new = index.gate("new");
    let session = Arc::new(SearchSession::new(index.clone()).with_ordering(ordering));
    let mut rx = session.subscribe();

    let spawn_search = |term: &'static str| {
        let session = session.clone();
        tokio::spawn(async move { session.search(term).await })
    };

    let old_task = spawn_search("old");
    rx.wait_for(|s| s.search_term == "old").await.unwrap();
    session.reset();
    assert_eq!(session.state(), SearchState::default());
    let new_task = spawn_search("new");
    rx.wait_for(|s| s.search_term == "new").await.unwrap();

    let old_hits = response(vec![hit("OLD_TABLE", "TABLE", "V", "S")]);
    let new_hits = response(vec![hit("NEW_TABLE", "TABLE", "V", "S")]);
    if stale_first {
        release_old.send(Ok(old_hits)).unwrap();
        old_task.await.unwrap();
        release_new.send(Ok(new_hits)).unwrap();
        new_task.await.unwrap();
    } else {
        release_new.send(Ok(new_hits)).unwrap();
        new_task.await.unwrap();
        release_old.send(Ok(old_hits)).unwrap();
        old_task.await.unwrap();
    }

    session.state()
}

fn names(state: &SearchState) -> Vec<&str> {
    state.suggestions.iter().map(|s| s.name.as_str()).collect()
}

#[tokio::test]
async fn latest_request_ordering_ignores_searches_from_before_reset() {
    for stale_first in [true, false] {
        let state = reset_then_search(ResponseOrdering::LatestRequestWins, stale_first).await;
        assert_eq!(state.search_term, "new");
        assert_eq!(names(&state), vec!["NEW_TABLE"], "stale_first={stale_first}");
    }
}

#[tokio::test]
async fn last_arrival_after_reset_shows_whatever_lands_last() {
    let state = reset_then_search(ResponseOrdering::LastArrivalWins, true).await;
    assert_eq!(names(&state), vec!["NEW_TABLE"]);

    let state = reset_then_search(ResponseOrdering::LastArrivalWins, false).await;
    assert_eq!(names(&state), vec!["OLD_TABLE"]);
}

#[tokio::test]
async fn latest_request_ordering_drops_response_landing_right_after_reset() {
    let index = Arc::new(GatedIndex::default());
    let release = index.gate("old");
    let session = Arc::new(
        SearchSession::new(index.clone()).with_ordering(ResponseOrdering::LatestRequestWins),
    );
    let mut rx = session.subscribe();

    let task = {
        let session = session.clone();
        tokio::spawn(async move { session.search("old").await })
    };
    rx.wait_for(|s| s.search_term == "old").await.unwrap();
    session.reset();

    release
        .send(Ok(response(vec![hit("OLD_TABLE", "TABLE", "V", "S")])))
        .unwrap();
    assert!(task.await.unwrap().is_empty());
    assert_eq!(session.state(), SearchState::default());
}
