//! Value objects shared by the lineage and search pipelines and the CLI.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod depth;
mod error;
mod ordering;
mod query;
mod suggestion;

pub use depth::{Depth, FULL_DEPTH_TOKEN};
pub use error::{ProtocolError, Result as ProtocolResult};
pub use ordering::{RequestSequencer, ResponseOrdering};
pub use query::LineageQuery;
pub use suggestion::{SearchState, SuggestionRecord};

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
