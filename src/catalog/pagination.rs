//! Cursor-linked collection pagination.

use serde_json::Value;

use super::CatalogReader;
use crate::{Error, Result};

/// Volatile per-record counter the store bumps on every segment write.
///
/// Stripped so records stay stable for downstream memoization and change
/// detection.
const VOLATILE_FIELD: &str = "segments_updated";

/// Walks a cursor-linked collection query, accumulating up to `cap` records.
///
/// Pages are fetched strictly sequentially: each continuation cursor is only
/// known once the previous response has arrived. The walk stops when the
/// store offers no further page or the accumulated count reaches `cap`, and
/// the result is truncated to exactly `cap` when one was given.
///
/// A continuation page whose body is not a list is skipped rather than
/// fatal; the store has already delivered usable records by then.
///
/// # Errors
///
/// Returns [`Error::UnexpectedShape`] when the *first* page's body is not a
/// JSON list, and [`Error::Request`] when any page fetch fails.
pub async fn fetch_all<R: CatalogReader + ?Sized>(
    reader: &R,
    path: &str,
    cap: Option<usize>,
) -> Result<Vec<Value>> {
    let mut page = reader.get(path).await?;
    let Value::Array(mut records) = page.body else {
        return Err(Error::UnexpectedShape {
            path: path.to_string(),
            detail: format!("expected a list, got {}", json_kind(&page.body)),
        });
    };

    while let Some(next) = page.next {
        if cap.is_some_and(|cap| records.len() >= cap) {
            break;
        }
        page = reader.get(&next).await?;
        match std::mem::take(&mut page.body) {
            Value::Array(more) => records.extend(more),
            other => {
                tracing::warn!(path = %next, kind = json_kind(&other), "skipping non-list page");
            }
        }
    }

    if let Some(cap) = cap {
        records.truncate(cap);
    }

    for record in &mut records {
        if let Some(object) = record.as_object_mut() {
            object.remove(VOLATILE_FIELD);
        }
    }

    Ok(records)
}

/// Short JSON type name for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
