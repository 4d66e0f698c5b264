use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One library as the catalog API returns it.
///
/// Every field is optional on the wire; a record with missing or mistyped
/// fields renders blank instead of failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryRecord {
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub user_desc: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub category: Option<String>,
}

impl LibraryRecord {
    /// Primary description, falling back to the user-supplied one.
    pub fn description(&self) -> &str {
        match self.desc.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => self.user_desc.as_deref().unwrap_or_default(),
        }
    }
}

/// Decode one field, falling back to its default on `null` or a type mismatch.
fn or_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(de)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Deserialize a record list one element at a time so a single malformed
/// entry degrades to a blank record.
fn lenient_records<'de, D>(de: D) -> Result<Vec<LibraryRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(de)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect())
}

/// One page of `GET /all`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingPage {
    #[serde(default, deserialize_with = "lenient_records")]
    pub results: Vec<LibraryRecord>,
    #[serde(default, deserialize_with = "or_default")]
    pub has_next: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub has_prev: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "or_default")]
    pub total_results: Option<u64>,
    #[serde(default, deserialize_with = "or_default")]
    pub total_pages: Option<u32>,
}

/// Body of `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchPayload {
    /// `"true"` when the search matched; the server sends it as a string
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub results: Vec<LibraryRecord>,
    /// Server's own explanation on a miss, e.g. "No relevant results found."
    #[serde(default, deserialize_with = "or_default")]
    pub message: Option<String>,
}

impl SearchPayload {
    pub fn is_match(&self) -> bool {
        match &self.response {
            Some(Value::String(s)) => s == "true",
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }
}

/// Result of one API call: either the uniform error shape or a JSON body.
///
/// Client-side failures and bodies that carry an `error` field both land in
/// `Error`, so callers branch on one thing.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Error(String),
    Body(Value),
}

impl ApiResponse {
    /// Classify a parsed body, honoring an `error` field the server set itself.
    pub fn from_body(body: Value) -> Self {
        match body.get("error") {
            Some(Value::String(msg)) => ApiResponse::Error(msg.clone()),
            Some(Value::Null) | None => ApiResponse::Body(body),
            Some(other) => ApiResponse::Error(other.to_string()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Error(msg) => Some(msg),
            ApiResponse::Body(_) => None,
        }
    }

    /// Decode the body into a typed payload; a shape mismatch reads as a
    /// strange response.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> Result<T, String> {
        match self {
            ApiResponse::Error(msg) => Err(msg),
            ApiResponse::Body(body) => serde_json::from_value(body).map_err(|e| {
                log::warn!("[types] unexpected payload shape: {e}");
                crate::constants::messages::STRANGE_RESPONSE.to_string()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn description_falls_back_to_user_desc() {
        let rec: LibraryRecord =
            serde_json::from_value(json!({"name": "flask", "desc": "", "user_desc": "micro web"}))
                .unwrap();
        assert_eq!(rec.description(), "micro web");

        let rec: LibraryRecord = serde_json::from_value(json!({"name": "flask"})).unwrap();
        assert_eq!(rec.description(), "");
    }

    #[test]
    fn malformed_record_does_not_fail_batch() {
        let page: ListingPage = serde_json::from_value(json!({
            "results": [{"name": "numpy"}, 42, {"name": 7}],
            "has_next": true
        }))
        .unwrap();
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].name, "numpy");
        assert_eq!(page.results[1], LibraryRecord::default());
        assert_eq!(page.results[2], LibraryRecord::default());
        assert!(page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn listing_ignores_extra_catalog_fields() {
        let page: ListingPage = serde_json::from_value(json!({
            "results": [{"name": "requests", "user_desc": "http", "keywords": ["http"], "search_desc": "x"}],
            "page": 2, "total_results": 42, "total_pages": 5, "limit": 10
        }))
        .unwrap();
        assert_eq!(page.results[0].description(), "http");
        assert_eq!(page.page, Some(2));
        assert_eq!(page.total_pages, Some(5));
    }

    #[test]
    fn mistyped_field_only_blanks_itself() {
        let page: ListingPage = serde_json::from_value(json!({
            "results": [
                {"name": "numpy", "desc": "arrays", "link": 123},
                {"name": "pandas", "desc": "frames", "category": ["data"]},
                {"name": null, "desc": "orphan", "link": "https://x"}
            ]
        }))
        .unwrap();
        let r = &page.results;
        assert_eq!((r[0].name.as_str(), r[0].description(), r[0].link.as_deref()), ("numpy", "arrays", None));
        assert_eq!((r[1].name.as_str(), r[1].description(), r[1].category.as_deref()), ("pandas", "frames", None));
        assert_eq!((r[2].name.as_str(), r[2].description(), r[2].link.as_deref()), ("", "orphan", Some("https://x")));
    }

    #[test]
    fn null_flags_read_as_false() {
        let page: ListingPage = serde_json::from_value(json!({
            "results": [{"name": "numpy"}],
            "has_next": null, "has_prev": null, "page": null, "total_pages": "many"
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(!page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.page, None);
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn search_match_flag() {
        let hit: SearchPayload = serde_json::from_value(json!({"response": "true"})).unwrap();
        assert!(hit.is_match());
        let miss: SearchPayload =
            serde_json::from_value(json!({"response": "false", "message": "No relevant results found."}))
                .unwrap();
        assert!(!miss.is_match());
        assert!(miss.results.is_empty());
        assert_eq!(miss.message.as_deref(), Some("No relevant results found."));
    }

    #[test]
    fn server_error_field_wins() {
        let resp = ApiResponse::from_body(json!({"error": "rate limited", "results": []}));
        assert_eq!(resp.error(), Some("rate limited"));

        let resp = ApiResponse::from_body(json!({"error": null, "results": []}));
        assert!(resp.error().is_none());
    }

    #[test]
    fn decode_shape_mismatch_is_strange_response() {
        let resp = ApiResponse::Body(json!({"results": "nope", "has_next": "maybe"}));
        let err = resp.decode::<ListingPage>().unwrap_err();
        assert_eq!(err, crate::constants::messages::STRANGE_RESPONSE);
    }
}
