//! Client views of an in-progress project.

use api::{ExpenseCategory, Project};
use dioxus::prelude::*;

use super::widgets::{CategoryBadge, DeleteExpenseButton, ExpenseTimeline, Figure, PhotoLink, ProgressBar, ProgressCircle};
use crate::analytics::{client_notices, filter_expenses, timeline, ProjectAnalytics};
use crate::category::{radio_value, theme};
use crate::format::{format_brl, format_percent, format_timestamp};
use crate::icons::{FaArrowLeft, FaWhatsapp};
use crate::metrics::ProjectFigures;
use crate::notifications::LogLevel;
use crate::session::{use_app, LogoutButton};
use crate::Icon;

/// Header of every client view, with the way back to the project list.
#[component]
pub fn ClientHeader(title: String, can_choose: bool) -> Element {
    let app = use_app();
    rsx! {
        header {
            class: "topbar",
            h1 { "{title}" }
            div { class: "topbar-actions",
                if can_choose {
                    button {
                        id: "back-to-selection-btn",
                        class: "btn btn-outline",
                        onclick: move |_| async move { app.back_to_selection().await },
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        " Minhas obras"
                    }
                }
                LogoutButton {}
            }
        }
    }
}

#[component]
pub fn ClientDashboardView() -> Element {
    let app = use_app();
    let state = app.client.read().clone();

    rsx! {
        ClientHeader { title: "Minha Obra", can_choose: state.can_choose() }
        {match state.current() {
            Some(project) => rsx! {
                ClientProjectView {
                    key: "{project.id}",
                    project: project.clone(),
                    filter: state.filter().cloned(),
                }
            },
            None => rsx! {
                div {
                    id: "client-empty",
                    class: "card empty-state",
                    p { "Nenhuma obra vinculada a você." }
                }
            },
        }}
    }
}

#[component]
fn ClientProjectView(project: Project, filter: Option<ExpenseCategory>) -> Element {
    let app = use_app();
    let figures = ProjectFigures::from(&project);
    let stats = ProjectAnalytics::compute(&project, chrono::Utc::now());
    let limit = app.config().ui.timeline_limit;
    let entries = timeline(&project.expenses, Some(limit));
    let notices = client_notices(&project);
    let visible = filter_expenses(&project.expenses, filter.as_ref());
    let spent_share = format_percent(figures.progress.spent_share(), 1);
    let average = format_brl(stats.average);
    let max = format_brl(stats.max);
    let main_category = stats.main_category_label().to_string();
    let remaining_card = format!("card kpi-card {}", figures.tone.card_class());
    let remaining_status = figures.tone.client_label();

    rsx! {
        div {
            class: "client-welcome",
            h2 { "Acompanhando: {project.name}" }
        }
        div {
            class: "notice-list",
            for (i, notice) in notices.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: notice.level.class(),
                    strong { "{notice.title}" }
                    p { "{notice.message}" }
                }
            }
        }
        div {
            class: "kpi-cards",
            div { class: "card kpi-card",
                Figure { label: "Orçamento total", value: format_brl(figures.budget) }
            }
            div { class: "card kpi-card",
                Figure { label: "Total gasto", value: format_brl(figures.spent) }
                span { class: "muted", "{spent_share} do orçamento" }
            }
            div { class: "{remaining_card}",
                Figure { label: "Saldo restante", value: format_brl(figures.remaining) }
                span { class: "kpi-status", "{remaining_status}" }
            }
        }
        section {
            class: "card progress-panel",
            h3 { "Progresso do orçamento" }
            ProgressBar { progress: figures.progress }
            ProgressCircle { progress: figures.progress }
        }
        section {
            class: "card stats-panel",
            h3 { "Estatísticas" }
            div { class: "figures",
                Figure { label: "Total de despesas", value: stats.count.to_string() }
                Figure { label: "Despesa média", value: average }
                Figure { label: "Maior despesa", value: max }
                Figure { label: "Categoria principal", value: main_category }
                Figure { label: "Dias de obra", value: stats.days_active.to_string() }
            }
        }
        ExpenseTimeline { entries: entries }
        section {
            class: "card",
            h3 { "Despesas" }
            CategoryFilter { current: filter.clone() }
            if visible.is_empty() {
                p { class: "muted", "Nenhuma despesa nesta categoria." }
            }
            div {
                class: "expense-grid",
                for expense in visible.iter().cloned() {
                    div {
                        key: "{expense.id}",
                        class: "expense-card",
                        div { class: "expense-card-header {theme(&expense.category).gradient}",
                            span { class: "expense-name", "{expense.name}" }
                            DeleteExpenseButton { expense_id: expense.id }
                        }
                        CategoryBadge { category: expense.category.clone() }
                        span { class: "expense-value", {format_brl(expense.value)} }
                        span { class: "muted", {format_timestamp(expense.created_at.as_ref())} }
                        PhotoLink { url: expense.photo_url.clone() }
                    }
                }
            }
        }
        FeedbackPanel {}
    }
}

#[component]
fn CategoryFilter(current: Option<ExpenseCategory>) -> Element {
    let app = use_app();
    let all_class = if current.is_none() { "filter-btn active" } else { "filter-btn" };

    rsx! {
        div {
            class: "category-filter",
            button {
                id: "filter-all",
                class: all_class,
                onclick: move |_| app.set_client_filter(None),
                "Todas"
            }
            for category in ExpenseCategory::ALL {
                button {
                    key: "{category}",
                    id: "filter-{radio_value(&category)}",
                    class: if current.as_ref() == Some(&category) { "filter-btn active" } else { "filter-btn" },
                    onclick: {
                        let category = category.clone();
                        move |_| app.set_client_filter(Some(category.clone()))
                    },
                    "{category}"
                }
            }
        }
    }
}

const FEEDBACK: [(&str, &str); 3] = [
    ("👍 Estou satisfeito", "Obrigado pelo seu feedback! Ficamos felizes com sua satisfação."),
    ("💬 Tenho dúvidas", "Obrigado! Entraremos em contato para esclarecer suas dúvidas."),
    ("💡 Tenho sugestões", "Obrigado pela sugestão! Ela será analisada pela equipe."),
];

/// Canned feedback replies and a WhatsApp contact link.
#[component]
pub fn FeedbackPanel() -> Element {
    let app = use_app();
    let contact = app
        .config()
        .contact
        .whatsapp_link("Olá! Gostaria de falar sobre a minha obra.");

    rsx! {
        section {
            class: "card feedback-panel",
            h3 { "Como está sua experiência?" }
            div {
                class: "feedback-buttons",
                for (label, reply) in FEEDBACK {
                    button {
                        key: "{label}",
                        class: "btn btn-outline",
                        onclick: move |_| app.notify(LogLevel::Success, reply),
                        "{label}"
                    }
                }
            }
            a {
                class: "btn btn-whatsapp",
                href: "{contact}",
                target: "_blank",
                Icon { icon: FaWhatsapp, width: 14, height: 14 }
                " Falar com o arquiteto no WhatsApp"
            }
        }
    }
}
