use crate::error::{LineageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of the lineage fetch currently shown.
///
/// `NotLoaded → Loading → {FinishedSuccess, FinishedFailure}`; any state may go
/// back to `Loading` when a new fetch starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingStatus {
    #[default]
    NotLoaded,
    Loading,
    FinishedSuccess,
    FinishedFailure,
}

/// How a single fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    Failure,
}

impl LoadingStatus {
    pub const ALL: [LoadingStatus; 4] = [
        Self::NotLoaded,
        Self::Loading,
        Self::FinishedSuccess,
        Self::FinishedFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotLoaded => "NOT_LOADED",
            Self::Loading => "LOADING",
            Self::FinishedSuccess => "FINISHED_SUCCESS",
            Self::FinishedFailure => "FINISHED_FAILURE",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinishedSuccess | Self::FinishedFailure)
    }

    /// A new fetch was issued.
    pub fn begin(self) -> Self {
        Self::Loading
    }

    /// A response (or failure) was delivered.
    ///
    /// Accepted from `Loading` and from terminal states, where a late response
    /// overwrites an earlier one. Rejected from `NotLoaded`: nothing was issued.
    pub fn finish(self, outcome: FetchOutcome) -> Result<Self> {
        let next = match outcome {
            FetchOutcome::Success => Self::FinishedSuccess,
            FetchOutcome::Failure => Self::FinishedFailure,
        };
        if self == Self::Loading || self.is_terminal() {
            Ok(next)
        } else {
            Err(LineageError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for LoadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadingStatus {
    type Err = LineageError;

    fn from_str(raw: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| LineageError::UnknownStatus(raw.to_string()))
    }
}
