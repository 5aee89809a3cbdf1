use crate::error::ProtocolError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// What to do with a response that arrives after a newer request was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Whatever arrives last is applied, even if it answers an older request
    #[default]
    LastArrivalWins,

    /// Responses older than the latest applied request are dropped
    LatestRequestWins,
}

impl FromStr for ResponseOrdering {
    type Err = ProtocolError;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().replace('-', "_").as_str() {
            "last_arrival_wins" => Ok(Self::LastArrivalWins),
            "latest_request_wins" => Ok(Self::LatestRequestWins),
            _ => Err(ProtocolError::UnknownOrdering(raw.to_string())),
        }
    }
}

/// Monotonic request numbering shared by one pipeline.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new outbound request. Sequence numbers start at 1.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Decide whether the response to request `seq` may replace visible state.
    ///
    /// Must be called while holding the state's write lock so the check and the
    /// replacement are one step.
    pub fn admit(&self, ordering: ResponseOrdering, seq: u64) -> bool {
        let previous = self.applied.fetch_max(seq, Ordering::SeqCst);
        match ordering {
            ResponseOrdering::LastArrivalWins => true,
            ResponseOrdering::LatestRequestWins => seq > previous,
        }
    }

    /// Mark every request issued so far as stale.
    ///
    /// Numbering never rewinds: a request issued after the reset always
    /// outranks one still in flight from before it.
    pub fn reset(&self) {
        let issued = self.issued.load(Ordering::SeqCst);
        self.applied.fetch_max(issued, Ordering::SeqCst);
    }
}
