//! Parse classifier replies into classified items
//!
//! Replies are free text that embed a JSON array somewhere inside, often
//! wrapped in prose or a markdown fence. The payload is taken to run from the
//! first `[` to the last `]`.

use crate::config::SchemaMode;
use crate::error::ClassifierError;
use serde_json::{Map, Value};
use tagmark_domain::{ClassifiedItem, TagSet};
use tracing::warn;

/// Parse a classifier reply into classified items
///
/// All or nothing: one bad element fails the whole reply.
pub fn parse_classification_response(
    response: &str,
    mode: SchemaMode,
) -> Result<Vec<ClassifiedItem>, ClassifierError> {
    let json_str = extract_json_array(response)?;

    let json: Value = serde_json::from_str(json_str)?;

    let items = json.as_array().ok_or_else(|| {
        ClassifierError::ResponseParseFailure("Expected JSON array".to_string())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            parse_item(item, mode).map_err(|e| {
                warn!("Rejecting classifier reply, item {}: {}", idx, e);
                ClassifierError::ResponseParseFailure(format!("Item {}: {}", idx, e))
            })
        })
        .collect()
}

/// Slice from the first `[` to the last `]`, inclusive
fn extract_json_array(response: &str) -> Result<&str, ClassifierError> {
    let start = response.find('[').ok_or_else(|| {
        ClassifierError::ResponseParseFailure("No '[' in response".to_string())
    })?;
    let end = response.rfind(']').ok_or_else(|| {
        ClassifierError::ResponseParseFailure("No ']' in response".to_string())
    })?;

    if end < start {
        return Err(ClassifierError::ResponseParseFailure(
            "']' appears before '[' in response".to_string(),
        ));
    }

    Ok(&response[start..=end])
}

fn parse_item(json: &Value, mode: SchemaMode) -> Result<ClassifiedItem, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Item is not a JSON object".to_string())?;

    let title = string_field(obj, "title", mode)?;
    let url = string_field(obj, "url", mode)?;
    let tags = string_field(obj, "tags", mode)?;

    if mode == SchemaMode::Strict && url.is_empty() {
        return Err("Empty 'url'".to_string());
    }

    Ok(ClassifiedItem {
        title,
        url,
        tags: TagSet::parse(&tags),
    })
}

/// Read a trimmed string field
fn string_field(obj: &Map<String, Value>, name: &str, mode: SchemaMode) -> Result<String, String> {
    match obj.get(name) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(format!("'{}' is not a string: {}", name, other)),
        None => match mode {
            SchemaMode::Strict => Err(format!("Missing '{}'", name)),
            SchemaMode::Lenient => Ok(String::new()),
        },
    }
}
