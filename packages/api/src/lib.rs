//! # API crate: REST client for the construction expense backend
//!
//! Everything the dashboard knows about the backend lives here: the wire models,
//! the HTTP wrapper and the list of operations the views call.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: generic `login`/`get`/`post`/`post_form`/`put`/`delete`/`get_bytes` over `reqwest`, with bearer auth from a [`store::TokenStore`] |
//! | [`backend`] | The [`Backend`] trait: one method per endpoint the dashboard uses, implemented by [`ApiClient`] |
//! | [`memory`] | [`MemoryBackend`]: an in-memory [`Backend`] that follows the server's scoping rules, used by tests |
//! | [`error`] | [`ApiError`] and server `detail` extraction |
//! | [`models`] | `User`, `Project`, `Expense` and request bodies |
//!
//! ## Endpoints
//!
//! - **Auth**: `POST /token`, `GET /users/me`
//! - **Clients**: `GET /users/clients`, `POST /users/`
//! - **Projects**: `GET /projects/`, `POST /projects/`, `PUT /projects/{id}/finalize`, `GET /projects/{id}/report`
//! - **Expenses**: `POST /projects/{id}/expenses/`, `DELETE /expenses/{id}`

pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod models;

pub use backend::Backend;
pub use client::ApiClient;
pub use error::ApiError;
pub use memory::MemoryBackend;
pub use models::{
    Expense, ExpenseCategory, ExpenseDraft, NewClient, NewProject, PhotoUpload, Project,
    ProjectStatus, Role, TokenResponse, User,
};
