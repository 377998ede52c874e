//! Title extraction from serialized rich-text documents.

use serde_json::Value;

/// Longest title kept, in characters
const MAX_TITLE_CHARS: usize = 100;

/// Title of a document: its first text, depth-first.
///
/// The first node that is either text or has children decides; an empty
/// paragraph without children is skipped.
pub fn title_from_content(doc: &Value) -> String {
    let children = doc
        .get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for node in children {
        if node.get("type").and_then(Value::as_str) == Some("text") {
            return truncate(node.get("text").and_then(Value::as_str).unwrap_or_default());
        }
        if node.get("content").is_some() {
            return title_from_content(node);
        }
    }
    String::new()
}

/// Title of a serialized document. Unparsable content has no title.
pub fn title_from_json(content: &str) -> String {
    serde_json::from_str::<Value>(content)
        .map(|doc| title_from_content(&doc))
        .unwrap_or_default()
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_TITLE_CHARS).collect()
}
