//! Small building blocks shared by the architect and client views.

use api::{Expense, ExpenseCategory};
use dioxus::prelude::*;

use crate::actions;
use crate::analytics::TimelineEntry;
use crate::browser;
use crate::category::theme;
use crate::format::{format_brl, format_percent, format_timestamp};
use crate::icons::FaTrashCan;
use crate::metrics::BudgetProgress;
use crate::notifications::LogLevel;
use crate::session::use_app;
use crate::Icon;

/// One labelled figure of a card row.
#[component]
pub fn Figure(label: String, value: String, #[props(default)] class: String) -> Element {
    rsx! {
        div {
            class: "figure",
            span { class: "figure-label", "{label}" }
            span { class: "figure-value {class}", "{value}" }
        }
    }
}

#[component]
pub fn CategoryBadge(category: ExpenseCategory) -> Element {
    let theme = theme(&category);
    let label = category.label().to_string();
    rsx! {
        span { class: "badge {theme.badge}", "{theme.icon} {label}" }
    }
}

/// Horizontal budget bar; the width is clamped at 100%.
#[component]
pub fn ProgressBar(progress: BudgetProgress) -> Element {
    let status = progress.status;
    let label = status.label();
    let percent = progress.caption();
    rsx! {
        div {
            class: "progress",
            div { class: "progress-track",
                div { class: status.bar_class(), style: progress.width_style() }
            }
            div { class: "progress-caption",
                span { class: status.text_class(), "{label}" }
                span { class: "muted", "{percent}" }
            }
        }
    }
}

/// Circular indicator of the spent share.
#[component]
pub fn ProgressCircle(progress: BudgetProgress) -> Element {
    let circumference = BudgetProgress::circumference();
    let offset = progress.circle_offset();
    let percent = format_percent(progress.percentage, 0);
    rsx! {
        div {
            class: "progress-circle",
            svg {
                width: "80",
                height: "80",
                view_box: "0 0 80 80",
                circle { cx: "40", cy: "40", r: "30", class: "circle-track" }
                circle {
                    cx: "40",
                    cy: "40",
                    r: "30",
                    class: "circle-fill",
                    stroke_dasharray: "{circumference:.2}",
                    stroke_dashoffset: "{offset:.2}",
                }
            }
            span { class: "progress-circle-label", "{percent}" }
        }
    }
}

/// Delete an expense after confirmation, then reload the current dashboard.
#[component]
pub fn DeleteExpenseButton(expense_id: i64) -> Element {
    let app = use_app();

    let onclick = move |_| async move {
        match actions::delete_expense(&app.backend(), browser::confirm, expense_id).await {
            Ok(true) => {
                app.notify(LogLevel::Success, "Despesa excluída com sucesso!");
                app.refresh().await;
            }
            Ok(false) => {}
            Err(e) => app.report(e, "Erro ao excluir despesa"),
        }
    };

    rsx! {
        button {
            class: "btn-icon btn-danger delete-expense-btn",
            title: "Excluir despesa",
            onclick,
            Icon { icon: FaTrashCan, width: 14, height: 14 }
        }
    }
}

#[component]
pub fn PhotoLink(url: Option<String>) -> Element {
    let app = use_app();
    match url {
        Some(url) => {
            let href = app.asset_url(&url);
            rsx! {
                a { class: "photo-link", href: "{href}", target: "_blank", "📷 Ver foto" }
            }
        }
        None => rsx! {},
    }
}

/// Table of expenses, in list order.
#[component]
pub fn ExpenseList(expenses: Vec<Expense>) -> Element {
    let count = expenses.len();
    rsx! {
        section {
            class: "card",
            h3 { "Despesas ({count})" }
            if expenses.is_empty() {
                p { class: "muted", "Nenhuma despesa lançada." }
            } else {
                ul {
                    class: "expense-list",
                    for expense in expenses.iter().cloned() {
                        ExpenseRow { key: "{expense.id}", expense: expense.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn ExpenseRow(expense: Expense) -> Element {
    let value = format_brl(expense.value);
    let when = format_timestamp(expense.created_at.as_ref());
    rsx! {
        li {
            class: "expense-row",
            div { class: "expense-main",
                span { class: "expense-name", "{expense.name}" }
                CategoryBadge { category: expense.category.clone() }
            }
            div { class: "expense-meta",
                span { class: "muted", "{when}" }
                PhotoLink { url: expense.photo_url.clone() }
            }
            span { class: "expense-value", "{value}" }
            DeleteExpenseButton { expense_id: expense.id }
        }
    }
}

#[component]
pub fn ExpenseTimeline(entries: Vec<TimelineEntry>) -> Element {
    rsx! {
        section {
            class: "card",
            h3 { "Linha do tempo" }
            if entries.is_empty() {
                p { class: "muted", "Nenhuma despesa registrada ainda." }
            }
            ol {
                class: "timeline",
                for entry in entries.iter().cloned() {
                    TimelineItem { key: "{entry.expense.id}", entry: entry.clone() }
                }
            }
        }
    }
}

#[component]
fn TimelineItem(entry: TimelineEntry) -> Element {
    let theme = theme(&entry.expense.category);
    let value = format_brl(entry.expense.value);
    let when = format_timestamp(entry.expense.created_at.as_ref());
    let class = if entry.highlighted {
        format!("timeline-item {} timeline-recent", theme.timeline)
    } else {
        format!("timeline-item {}", theme.timeline)
    };
    rsx! {
        li {
            class: "{class}",
            span { class: "timeline-icon", "{theme.icon}" }
            div { class: "timeline-body",
                span { class: "expense-name", "{entry.expense.name}" }
                span { class: "muted", "{when}" }
            }
            span { class: "expense-value", "{value}" }
        }
    }
}
