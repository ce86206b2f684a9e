//! Wire models shared by the client and the dashboard views.

pub mod datetime;
mod project;
mod user;

pub use project::{
    Expense, ExpenseCategory, ExpenseDraft, NewProject, PhotoUpload, Project, ProjectStatus,
};
pub use user::{NewClient, Role, TokenResponse, User};
