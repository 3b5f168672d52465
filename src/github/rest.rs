//! REST pagination helpers

use super::ApiError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NEXT_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).expect("valid next link regex")
});

/// Extract the `rel="next"` target from a `Link` header.
///
/// `<https://api.github.com/x?page=2>; rel="next", <...>; rel="last"` → `https://api.github.com/x?page=2`
pub fn next_link(header: &str) -> Option<String> {
    NEXT_LINK_RE
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|url| url.as_str().trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Items of one REST page: either a bare JSON array or a search result wrapped in `items`.
pub fn page_items(body: &str) -> Result<Vec<Value>, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ApiError::Decode("Unexpected response format: object without items".into())),
        },
        other => Err(ApiError::Decode(format!("Unexpected response format: {other}"))),
    }
}
