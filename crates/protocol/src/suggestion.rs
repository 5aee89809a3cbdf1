use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entity match shown under the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Platform the entity lives on
    pub system: String,
    /// Schema or job group
    pub job_group: String,
}

impl SuggestionRecord {
    /// Dashboard route the suggestion navigates to.
    pub fn dashboard_link(&self) -> String {
        format!("/dashboard/table/{}/", self.name)
    }
}

/// Search bar contents plus the ranked suggestions for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub search_term: String,
    /// Index relevance order; never re-sorted
    pub suggestions: Vec<SuggestionRecord>,
}
