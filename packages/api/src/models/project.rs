//! # Project and expense models
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Project`] | A construction project with its budget, what has been spent so far, status, and the full expense list. `spent` is maintained by the backend. |
//! | [`ProjectStatus`] | `"Em Andamento"` (in progress) or `"Concluída"` (completed). Finalizing is one-way. |
//! | [`Expense`] | One recorded cost item, owned by exactly one project. |
//! | [`ExpenseCategory`] | The three expense categories, plus [`ExpenseCategory::Other`] so an unexpected label still renders. |
//! | [`NewProject`] | Body of `POST /projects/`. |
//! | [`ExpenseDraft`] | Fields of the multipart `POST /projects/{id}/expenses/` request, with an optional [`PhotoUpload`]. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Em Andamento")]
    InProgress,
    #[serde(rename = "Concluída")]
    Completed,
}

impl ProjectStatus {
    /// Wire label, also shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "Em Andamento",
            ProjectStatus::Completed => "Concluída",
        }
    }
}

/// Expense category.
///
/// Variants are declared in the order the dashboard lists them; that order is
/// also the tie-break when ranking categories by frequency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseCategory {
    RawMaterial,
    Labor,
    Miscellaneous,
    Other(String),
}

impl ExpenseCategory {
    /// The three categories an architect can pick.
    pub const ALL: [ExpenseCategory; 3] = [
        ExpenseCategory::RawMaterial,
        ExpenseCategory::Labor,
        ExpenseCategory::Miscellaneous,
    ];

    pub fn label(&self) -> &str {
        match self {
            ExpenseCategory::RawMaterial => "Matéria Prima",
            ExpenseCategory::Labor => "Mão de Obra",
            ExpenseCategory::Miscellaneous => "Custos Variados",
            ExpenseCategory::Other(label) => label,
        }
    }
}

impl From<String> for ExpenseCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Matéria Prima" => ExpenseCategory::RawMaterial,
            "Mão de Obra" => ExpenseCategory::Labor,
            "Custos Variados" => ExpenseCategory::Miscellaneous,
            _ => ExpenseCategory::Other(value),
        }
    }
}

impl From<ExpenseCategory> for String {
    fn from(value: ExpenseCategory) -> Self {
        match value {
            ExpenseCategory::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "datetime::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    pub status: ProjectStatus,
    pub client_id: i64,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default, deserialize_with = "datetime::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "datetime::deserialize_opt")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Project {
    pub fn is_completed(&self) -> bool {
        self.status == ProjectStatus::Completed
    }

    /// `budget - spent`. Negative when the budget has been exceeded.
    pub fn remaining(&self) -> f64 {
        self.budget - self.spent
    }
}

/// Body of `POST /projects/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub budget: f64,
    pub client_id: i64,
}

/// A photo attached to a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields of a new expense, sent as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    pub value: f64,
    pub category: ExpenseCategory,
    pub photo: Option<PhotoUpload>,
}
