//! Converts a result value into its textual output form.

use crate::error::QueryError;
use crate::selection::Selection;
use crate::value::{Item, Value};

/// Renders a top-level result.
///
/// Arrays are encoded as JSON, iterator elements are rendered one per line,
/// selections as their inner markup, strings verbatim and empty values as
/// the empty string.
pub fn render<S: Selection>(value: &Value<S>) -> Result<String, QueryError> {
    match value {
        Value::Empty => Ok(String::new()),
        Value::Array(items) => Ok(array_to_json(items)?.to_string()),
        Value::Iterator(items) => {
            let lines = items
                .iter()
                .map(render_item)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        Value::Selection(s) => s.inner_html(),
        Value::String(s) => Ok(s.clone()),
    }
}

fn render_item<S: Selection>(item: &Item<S>) -> Result<String, QueryError> {
    match item {
        Item::Empty => Ok(String::new()),
        Item::Array(items) => Ok(array_to_json(items)?.to_string()),
        Item::Selection(s) => s.inner_html(),
        Item::String(s) => Ok(s.clone()),
    }
}

/// Encodes an array element as JSON. Non-array kinds become JSON strings of
/// their text rendering, except `Empty` which is `null`.
fn item_to_json<S: Selection>(item: &Item<S>) -> Result<serde_json::Value, QueryError> {
    match item {
        Item::Empty => Ok(serde_json::Value::Null),
        Item::Array(items) => array_to_json(items),
        other => Ok(serde_json::Value::String(render_item(other)?)),
    }
}

fn array_to_json<S: Selection>(items: &[Item<S>]) -> Result<serde_json::Value, QueryError> {
    items
        .iter()
        .map(item_to_json)
        .collect::<Result<Vec<_>, _>>()
        .map(serde_json::Value::Array)
}
