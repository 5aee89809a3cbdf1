use serde_json::{json, Value};

/// Full-text index holding one document per lineage entity.
pub const LINEAGE_INDEX: &str = "lineage";

/// Field matched against the search term.
pub const NAME_FIELD: &str = "name";

/// Maximum number of candidates requested per search.
pub const SUGGESTION_LIMIT: usize = 50;

/// Weight of an exact term match relative to the fuzzy match.
pub const EXACT_MATCH_BOOST: u32 = 20;

/// Edit distance tolerated per token.
pub const NAME_FUZZINESS: u32 = 1;

/// Query document sent to the full-text index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexQuery {
    /// Blank input: nothing should match
    MatchNone,

    /// All tokens must fuzzily match; exact matches are boosted to the top
    Ranked { term: String },
}

/// Turn the search box contents into an index query.
pub fn build_query(term: &str) -> IndexQuery {
    if term.trim().is_empty() {
        return IndexQuery::MatchNone;
    }
    IndexQuery::Ranked {
        term: term.to_string(),
    }
}

impl IndexQuery {
    pub fn is_match_none(&self) -> bool {
        matches!(self, Self::MatchNone)
    }

    pub fn size(&self) -> usize {
        match self {
            Self::MatchNone => 0,
            Self::Ranked { .. } => SUGGESTION_LIMIT,
        }
    }

    /// Request body for the `_search` endpoint.
    pub fn to_body(&self) -> Value {
        match self {
            Self::MatchNone => json!({
                "size": 0,
                "query": { "match_none": {} }
            }),
            Self::Ranked { term } => json!({
                "size": SUGGESTION_LIMIT,
                "query": {
                    "bool": {
                        "must": [{
                            "match": {
                                NAME_FIELD: {
                                    "query": term,
                                    "operator": "and",
                                    "fuzziness": NAME_FUZZINESS
                                }
                            }
                        }],
                        "should": [{
                            "term": {
                                NAME_FIELD: {
                                    "value": term,
                                    "boost": EXACT_MATCH_BOOST
                                }
                            }
                        }]
                    }
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_terms_match_nothing() {
        for term in ["", " ", "\t\n"] {
            let query = build_query(term);
            assert!(query.is_match_none());
            assert_eq!(query.size(), 0);
            assert_eq!(
                query.to_body(),
                json!({"size": 0, "query": {"match_none": {}}})
            );
        }
    }

    #[test]
    fn ranked_query_is_fuzzy_must_plus_exact_should() {
        let body = build_query("qbo user").to_body();
        assert_eq!(
            body,
            json!({
                "size": 50,
                "query": {
                    "bool": {
                        "must": [{
                            "match": {
                                "name": {"query": "qbo user", "operator": "and", "fuzziness": 1}
                            }
                        }],
                        "should": [{
                            "term": {"name": {"value": "qbo user", "boost": 20}}
                        }]
                    }
                }
            })
        );
    }

    #[test]
    fn term_is_sent_as_typed() {
        assert_eq!(
            build_query(" QBO"),
            IndexQuery::Ranked {
                term: " QBO".to_string()
            }
        );
    }
}
