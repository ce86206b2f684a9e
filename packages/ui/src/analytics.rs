//! # Client analytics
//!
//! View-models derived from a project's expense list for the client views:
//!
//! | Item | Shows |
//! |------|-------|
//! | [`ProjectAnalytics`] | count, average, maximum, most frequent category, days active |
//! | [`timeline`] | expenses newest first, the first three highlighted |
//! | [`filter_expenses`] | the expense grid restricted to one category |
//! | [`client_notices`] | welcome, budget warning and latest-expense cards |
//!
//! Nothing here talks to the backend; all values come from the already
//! fetched [`Project`].

use std::collections::BTreeMap;

use api::{Expense, ExpenseCategory, Project};
use chrono::{DateTime, Utc};

use crate::format::{format_brl, format_percent, format_timestamp};
use crate::metrics::{ceil_days, BudgetProgress, NEAR_LIMIT_PERCENT};
use crate::notifications::LogLevel;

/// Number of most recent timeline entries that are highlighted.
pub const HIGHLIGHTED_ENTRIES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAnalytics {
    pub count: usize,
    pub average: f64,
    pub max: f64,
    pub main_category: Option<ExpenseCategory>,
    pub days_active: i64,
}

impl ProjectAnalytics {
    pub fn compute(project: &Project, now: DateTime<Utc>) -> Self {
        let expenses = &project.expenses;
        let count = expenses.len();
        let total: f64 = expenses.iter().map(|e| e.value).sum();
        let average = if count > 0 { total / count as f64 } else { 0.0 };
        let max = expenses.iter().map(|e| e.value).fold(0.0, f64::max);
        let days_active = project
            .created_at
            .map(|created| ceil_days(created, now).max(0))
            .unwrap_or(0);

        Self {
            count,
            average,
            max,
            main_category: most_frequent_category(expenses),
            days_active,
        }
    }

    pub fn main_category_label(&self) -> &str {
        self.main_category
            .as_ref()
            .map(|c| c.label())
            .unwrap_or("N/A")
    }
}

/// The category with the most expenses. Ties go to the category declared
/// first.
pub fn most_frequent_category(expenses: &[Expense]) -> Option<ExpenseCategory> {
    let mut counts: BTreeMap<&ExpenseCategory, usize> = BTreeMap::new();
    for expense in expenses {
        *counts.entry(&expense.category).or_default() += 1;
    }
    let mut best: Option<(&ExpenseCategory, usize)> = None;
    for (category, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category.clone())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub expense: Expense,
    pub highlighted: bool,
}

/// Expenses sorted by creation time, newest first. Entries without a
/// timestamp count as the oldest; equal keys keep their list order.
pub fn timeline(expenses: &[Expense], limit: Option<usize>) -> Vec<TimelineEntry> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, expense)| TimelineEntry {
            expense: expense.clone(),
            highlighted: i < HIGHLIGHTED_ENTRIES,
        })
        .collect()
}

/// `None` shows every expense.
pub fn filter_expenses(expenses: &[Expense], category: Option<&ExpenseCategory>) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| category.map_or(true, |c| &e.category == c))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientNotice {
    pub level: LogLevel,
    pub title: String,
    pub message: String,
}

/// Cards shown at the top of the client's project view.
pub fn client_notices(project: &Project) -> Vec<ClientNotice> {
    let mut notices = vec![ClientNotice {
        level: LogLevel::Success,
        title: "Bem-vindo!".to_string(),
        message: format!("Você está acompanhando a obra {}.", project.name),
    }];

    let progress = BudgetProgress::of(project.budget, project.spent);
    if progress.spent_share() > NEAR_LIMIT_PERCENT {
        notices.push(ClientNotice {
            level: LogLevel::Warning,
            title: "Atenção ao orçamento".to_string(),
            message: format!(
                "{} do orçamento já foi utilizado.",
                format_percent(progress.spent_share(), 1)
            ),
        });
    }

    if let Some(last) = project.expenses.last() {
        notices.push(ClientNotice {
            level: LogLevel::Info,
            title: "Última despesa".to_string(),
            message: format!(
                "{} ({}) em {}",
                last.name,
                format_brl(last.value),
                format_timestamp(last.created_at.as_ref())
            ),
        });
    }

    notices
}
