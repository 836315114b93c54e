//! Everything the console needs to talk to the pipeline backend except the
//! transport itself: route builders, the error taxonomy and the runtime
//! configuration the host server hands to the browser.

use serde::{Deserialize, Serialize};

mod error;
pub mod routes;

pub use error::{server_message, ApiError, Lookup};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Served by the console host at `/console/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub api_base_url: String,
    #[serde(default)]
    pub master_project_id: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            master_project_id: None,
        }
    }
}

impl RuntimeConfig {
    /// Absolute URL of a backend route built by [`routes`].
    pub fn url(&self, path: &str) -> String {
        routes::join(&self.api_base_url, path)
    }
}

/// Reads a list out of a response that is either a bare JSON array or an
/// object wrapping the array under one of `keys`.
pub fn unwrap_list<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    keys: &[&str],
) -> Result<Vec<T>, ApiError> {
    let array = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => keys
            .iter()
            .find_map(|key| map.remove(*key).filter(|v| v.is_array()))
            .ok_or_else(|| ApiError::Decode(format!("expected a list under one of {:?}", keys)))?,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => return Err(ApiError::Decode(format!("expected a list, got {}", other))),
    };
    serde_json::from_value(array).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Reads an object that may come bare or wrapped under one of `keys`.
pub fn unwrap_object<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    keys: &[&str],
) -> Result<T, ApiError> {
    let value = match value {
        serde_json::Value::Object(mut map) => {
            match keys.iter().find_map(|key| map.remove(*key).filter(|v| v.is_object())) {
                Some(inner) => inner,
                None => serde_json::Value::Object(map),
            }
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Interprets a raw status and body the way the JSON client does: non-2xx
/// becomes [`ApiError::Server`], otherwise the object is read, bare or
/// wrapped under one of `keys`.
pub fn decode_response<T: serde::de::DeserializeOwned>(
    status: u16,
    body: &str,
    keys: &[&str],
) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    let value = if body.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?
    };
    unwrap_object(value, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_may_be_bare_or_wrapped() {
        let bare: Vec<String> = unwrap_list(json!(["a", "b"]), &["parameters"]).unwrap();
        let wrapped: Vec<String> =
            unwrap_list(json!({"parameters": ["a", "b"], "count": 2}), &["parameters"]).unwrap();
        assert_eq!(bare, wrapped);
        let empty: Vec<String> = unwrap_list(serde_json::Value::Null, &[]).unwrap();
        assert!(empty.is_empty());
        assert!(unwrap_list::<String>(json!({"other": []}), &["parameters"]).is_err());
    }

    #[test]
    fn objects_may_be_bare_or_wrapped() {
        let config: RuntimeConfig =
            unwrap_object(json!({"config": {"apiBaseUrl": "http://x"}}), &["config"]).unwrap();
        assert_eq!(config.api_base_url, "http://x");
        let config: RuntimeConfig =
            unwrap_object(json!({"apiBaseUrl": "http://y"}), &["config"]).unwrap();
        assert_eq!(config.api_base_url, "http://y");
    }

    #[test]
    fn urls_join_the_base() {
        let config = RuntimeConfig::default();
        assert_eq!(config.url("/projects"), "http://localhost:8000/api/projects");
    }

    #[test]
    fn upload_acknowledgments_decode_bare_or_wrapped() {
        use crate::model::file::FileRecord;

        let record: FileRecord = decode_response(
            201,
            r#"{"file": {"id": "f1", "filename": "a.pdf", "size": 10}}"#,
            &["file"],
        )
        .unwrap();
        assert_eq!(record.id, "f1");
        assert_eq!(record.file_name, "a.pdf");

        let error = decode_response::<FileRecord>(413, r#"{"error": "File too large"}"#, &["file"])
            .unwrap_err();
        assert_eq!(error.user_message(), "File too large");
        assert_eq!(error.status(), Some(413));
    }
}
