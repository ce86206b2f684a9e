//! Errors surfaced by the API client.
//!
//! The backend reports failures as `{"detail": "..."}` with a human-readable
//! message (validation failures send a list instead). When a string `detail` is
//! present it becomes the error message; otherwise a per-operation fallback is used.

use serde::Deserialize;

/// Message shown when the backend could not be reached or sent no usable body.
pub const COMMUNICATION_ERROR: &str = "Erro de comunicação com o servidor";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Login or session failure.
    #[error("{0}")]
    Auth(String),
    /// Any other non-2xx response or transport failure.
    #[error("{message}")]
    Request {
        /// HTTP status, `None` when no response arrived.
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Request {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth(_) => None,
            ApiError::Request { status, .. } => *status,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extract the string `detail` field from an error body, if there is one.
pub fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message() {
        assert_eq!(
            detail_message(r#"{"detail": "E-mail ou senha incorretos"}"#).as_deref(),
            Some("E-mail ou senha incorretos")
        );
        // FastAPI validation errors carry a list, not a message
        assert_eq!(
            detail_message(r#"{"detail": [{"loc": ["body", "value"], "msg": "field required"}]}"#),
            None
        );
        assert_eq!(detail_message(r#"{"message": "ok"}"#), None);
        assert_eq!(detail_message("<html>502</html>"), None);
        assert_eq!(detail_message(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn test_display_is_the_message() {
        let err = ApiError::request(Some(403), "Acesso não permitido.");
        assert_eq!(err.to_string(), "Acesso não permitido.");
        assert_eq!(err.status(), Some(403));

        let err = ApiError::Auth("Falha no login".into());
        assert_eq!(err.to_string(), "Falha no login");
        assert_eq!(err.status(), None);
    }
}
