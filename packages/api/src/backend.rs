//! # Domain operations against the expense backend
//!
//! [`Backend`] names every endpoint the dashboard uses, so the controller logic
//! in the UI crate can run against the real HTTP client ([`ApiClient`]) or the
//! in-memory [`crate::MemoryBackend`] in tests.
//!
//! Futures are not `Send`: the dashboard runs on the browser's single-threaded
//! event loop.

use std::future::Future;

use store::TokenStore;

use crate::client::{expense_form, ApiClient};
use crate::error::ApiError;
use crate::models::{Expense, ExpenseDraft, NewClient, NewProject, Project, TokenResponse, User};

pub trait Backend {
    /// Persist the token returned by [`Backend::login`].
    fn save_token(&self, token: &str);
    /// Forget the stored token (logout).
    fn clear_token(&self);
    fn has_token(&self) -> bool;

    /// `POST /token`
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>>;
    /// `GET /users/me`
    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>>;
    /// `GET /users/clients`
    fn list_clients(&self) -> impl Future<Output = Result<Vec<User>, ApiError>>;
    /// `POST /users/`
    fn create_client(&self, client: &NewClient) -> impl Future<Output = Result<User, ApiError>>;
    /// `GET /projects/`, scoped by the caller's role.
    fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>, ApiError>>;
    /// `POST /projects/`
    fn create_project(
        &self,
        project: &NewProject,
    ) -> impl Future<Output = Result<Project, ApiError>>;
    /// `PUT /projects/{id}/finalize`
    fn finalize_project(&self, project_id: i64)
        -> impl Future<Output = Result<Project, ApiError>>;
    /// `POST /projects/{id}/expenses/` (multipart)
    fn create_expense(
        &self,
        project_id: i64,
        draft: ExpenseDraft,
    ) -> impl Future<Output = Result<Expense, ApiError>>;
    /// `DELETE /expenses/{id}`
    fn delete_expense(&self, expense_id: i64) -> impl Future<Output = Result<(), ApiError>>;
    /// `GET /projects/{id}/report`, a PDF document.
    fn project_report(&self, project_id: i64)
        -> impl Future<Output = Result<Vec<u8>, ApiError>>;
}

impl<S: TokenStore> Backend for ApiClient<S> {
    fn save_token(&self, token: &str) {
        self.tokens().save_token(token);
    }

    fn clear_token(&self) {
        self.tokens().clear_token();
    }

    fn has_token(&self) -> bool {
        self.tokens().has_token()
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        ApiClient::login(self, email, password).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/users/me").await
    }

    async fn list_clients(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users/clients").await
    }

    async fn create_client(&self, client: &NewClient) -> Result<User, ApiError> {
        self.post("/users/", client).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects/").await
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        self.post("/projects/", project).await
    }

    async fn finalize_project(&self, project_id: i64) -> Result<Project, ApiError> {
        self.put(
            &format!("/projects/{project_id}/finalize"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn create_expense(&self, project_id: i64, draft: ExpenseDraft) -> Result<Expense, ApiError> {
        self.post_form(&format!("/projects/{project_id}/expenses/"), expense_form(draft))
            .await
    }

    async fn delete_expense(&self, expense_id: i64) -> Result<(), ApiError> {
        let _: serde_json::Value = self.delete(&format!("/expenses/{expense_id}")).await?;
        Ok(())
    }

    async fn project_report(&self, project_id: i64) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("/projects/{project_id}/report")).await
    }
}
