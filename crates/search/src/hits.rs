use crate::error::{Result, SearchError};
use serde_json::Value;
use superglue_protocol::SuggestionRecord;

/// Map a raw `_search` response to suggestions, keeping the index's order.
///
/// Hit documents are untyped: only `name`, `type`, `platform` and `schema` are
/// read from `_source`, anything else is ignored. Hits without a usable name
/// are dropped.
pub fn suggestions_from_response(response: &Value) -> Result<Vec<SuggestionRecord>> {
    let hits = response
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::MalformedResponse("missing hits.hits array".to_string()))?;

    Ok(hits
        .iter()
        .enumerate()
        .filter_map(|(position, hit)| {
            let record = suggestion_from_hit(hit);
            if record.is_none() {
                log::warn!("Skipping search hit #{position} without a name");
            }
            record
        })
        .collect())
}

fn suggestion_from_hit(hit: &Value) -> Option<SuggestionRecord> {
    let source = hit.get("_source")?;
    let name = text_field(source, "name").filter(|name| !name.is_empty())?;
    Some(SuggestionRecord {
        name,
        entity_type: text_field(source, "type").unwrap_or_default(),
        system: text_field(source, "platform").unwrap_or_default(),
        job_group: text_field(source, "schema").unwrap_or_default(),
    })
}

fn text_field(source: &Value, key: &str) -> Option<String> {
    match source.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
