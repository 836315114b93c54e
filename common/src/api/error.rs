use serde::Deserialize;
use thiserror::Error;

/// Failure of a call to the pipeline backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Server { status: u16, message: String },
    /// The backend answered 2xx with a body we could not read.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a `Server` error from a status code and the raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("request failed with status {}", status)
            } else {
                trimmed.to_string()
            }
        });
        ApiError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text for toasts and the activity log.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    detail: Option<String>,
}

/// The application error a JSON body carries, preferring `error` over
/// `message` over `detail`.
pub fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    [parsed.error, parsed.message, parsed.detail]
        .into_iter()
        .flatten()
        .map(|m| m.trim().to_string())
        .find(|m| !m.is_empty())
}

/// Outcome of reading a setting that a new project may not have yet.
///
/// A 404 means "not configured" and is never shown as an error; only
/// `TransportError` reaches the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotConfigured,
    TransportError(String),
}

impl<T> Lookup<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Lookup::Found(value),
            Err(err) if err.is_not_found() => Lookup::NotConfigured,
            Err(err) => Lookup::TransportError(err.user_message()),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    /// The found value, or `default` for both other outcomes.
    pub fn or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Lookup::TransportError(detail) => Some(detail.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_wins_over_message() {
        let err = ApiError::from_response(400, r#"{"message":"bad","error":"Name taken"}"#);
        assert_eq!(err.user_message(), "Name taken");
    }

    #[test]
    fn non_json_bodies_are_kept_verbatim() {
        let err = ApiError::from_response(502, "Bad Gateway");
        assert_eq!(err.user_message(), "Bad Gateway");
        let err = ApiError::from_response(500, "  ");
        assert_eq!(err.user_message(), "request failed with status 500");
    }

    #[test]
    fn not_found_is_not_configured() {
        let lookup: Lookup<u8> = Lookup::from_result(Err(ApiError::from_response(404, "")));
        assert_eq!(lookup, Lookup::NotConfigured);
        assert_eq!(lookup.error(), None);
    }

    #[test]
    fn transport_failures_surface() {
        let lookup: Lookup<u8> =
            Lookup::from_result(Err(ApiError::Transport("connection refused".into())));
        assert_eq!(lookup.error(), Some("network error: connection refused"));
        assert_eq!(lookup.or(7), 7);
    }
}
