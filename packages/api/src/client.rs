//! # REST client for the expense backend
//!
//! [`ApiClient`] is a thin wrapper over [`reqwest::Client`] (which uses `fetch`
//! on wasm). Every call takes an endpoint path, attaches the bearer token read
//! from the configured [`TokenStore`], and returns the parsed JSON body.
//!
//! | Method | Request | Fallback message on failure |
//! |--------|---------|-----------------------------|
//! | [`login`](ApiClient::login) | `POST /token`, form-encoded, no token | "Falha no login" |
//! | [`get`](ApiClient::get) | `GET` | "Falha ao buscar dados" |
//! | [`post`](ApiClient::post) | `POST`, JSON body | "Falha ao criar recurso" |
//! | [`post_form`](ApiClient::post_form) | `POST`, multipart body | "Falha ao enviar formulário" |
//! | [`put`](ApiClient::put) | `PUT`, JSON body | "Falha ao atualizar recurso" |
//! | [`delete`](ApiClient::delete) | `DELETE` | "Falha ao excluir recurso" |
//! | [`get_bytes`](ApiClient::get_bytes) | `GET`, raw body | "Falha ao gerar o relatório" |
//!
//! The client never writes the token itself; callers decide when to persist or
//! clear it.

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::TokenStore;

use crate::error::{detail_message, ApiError, COMMUNICATION_ERROR};
use crate::models::{ExpenseDraft, TokenResponse};

const LOGIN_FAILED: &str = "Falha no login";
const GET_FAILED: &str = "Falha ao buscar dados";
const POST_FAILED: &str = "Falha ao criar recurso";
const FORM_FAILED: &str = "Falha ao enviar formulário";
const PUT_FAILED: &str = "Falha ao atualizar recurso";
const DELETE_FAILED: &str = "Falha ao excluir recurso";
const BYTES_FAILED: &str = "Falha ao gerar o relatório";

#[derive(Clone, Debug)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: String,
    tokens: S,
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(base_url: impl Into<String>, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Full URL for an endpoint path, with exactly one slash between the two.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Exchange credentials for an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/token"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Login request failed: {}", e);
                ApiError::Auth(COMMUNICATION_ERROR.to_string())
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                COMMUNICATION_ERROR.to_string()
            } else {
                detail_message(&body).unwrap_or_else(|| LOGIN_FAILED.to_string())
            };
            return Err(ApiError::Auth(message));
        }

        response.json().await.map_err(|e| {
            tracing::warn!("Malformed token response: {}", e);
            ApiError::Auth(COMMUNICATION_ERROR.to_string())
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)));
        let response = send(request).await?;
        parse_json(response, GET_FAILED).await
    }

    pub async fn post<B, T>(&self, path: &str, data: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.http.post(self.url(path))).json(data);
        let response = send(request).await?;
        parse_json(response, POST_FAILED).await
    }

    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let request = self.authorize(self.http.post(self.url(path))).multipart(form);
        let response = send(request).await?;
        parse_json(response, FORM_FAILED).await
    }

    pub async fn put<B, T>(&self, path: &str, data: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.http.put(self.url(path))).json(data);
        let response = send(request).await?;
        parse_json(response, PUT_FAILED).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.delete(self.url(path)));
        let response = send(request).await?;
        parse_json(response, DELETE_FAILED).await
    }

    /// Fetch a binary body, e.g. the PDF report.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)));
        let response = send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = detail_message(&body)
                .unwrap_or_else(|| format!("{BYTES_FAILED}. Status: {}", status.as_u16()));
            return Err(ApiError::request(Some(status.as_u16()), message));
        }
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read response body: {}", e);
            ApiError::request(Some(status.as_u16()), COMMUNICATION_ERROR)
        })?;
        Ok(bytes.to_vec())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Multipart body for `POST /projects/{id}/expenses/`.
pub fn expense_form(draft: ExpenseDraft) -> Form {
    let form = Form::new()
        .text("name", draft.name)
        .text("value", draft.value.to_string())
        .text("category", String::from(draft.category));
    match draft.photo {
        Some(photo) => form.part("photo", Part::bytes(photo.bytes).file_name(photo.file_name)),
        None => form,
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| {
        tracing::warn!("Request failed: {}", e);
        ApiError::request(e.status().map(|s| s.as_u16()), COMMUNICATION_ERROR)
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = detail_message(&body).unwrap_or_else(|| fallback.to_string());
        tracing::debug!("Request failed with {}: {}", status, message);
        return Err(ApiError::request(Some(status.as_u16()), message));
    }
    response.json().await.map_err(|e| {
        tracing::warn!("Malformed response body: {}", e);
        ApiError::request(Some(status.as_u16()), fallback)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryTokenStore;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://127.0.0.1:8000", "/projects/"), "http://127.0.0.1:8000/projects/");
        assert_eq!(join_url("http://127.0.0.1:8000/", "projects/"), "http://127.0.0.1:8000/projects/");
        assert_eq!(join_url("", "/token"), "/token");
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = ApiClient::new("https://api.example.com/", MemoryTokenStore::new());
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.url("/users/me"), "https://api.example.com/users/me");
        assert_eq!(client.url("uploads/1.jpg"), "https://api.example.com/uploads/1.jpg");
    }

    #[test]
    fn test_client_reads_shared_token_store() {
        let tokens = MemoryTokenStore::new();
        let client = ApiClient::new("http://localhost", tokens.clone());
        assert!(!client.tokens().has_token());
        tokens.save_token("jwt");
        assert_eq!(client.tokens().token().as_deref(), Some("jwt"));
    }
}
