//! The architect dashboard: summary cards, project and client lists, and the
//! selected project's details.

use api::{Project, User};
use dioxus::prelude::*;

use super::expense_form::ExpenseLaunch;
use super::modals::{CreateClientModal, CreateProjectModal};
use super::widgets::{ExpenseList, Figure, ProgressBar};
use crate::actions;
use crate::browser;
use crate::format::{format_brl, format_date};
use crate::icons::{FaCheck, FaPlus, FaUserPlus};
use crate::metrics::{DashboardSummary, ProjectFigures};
use crate::notifications::LogLevel;
use crate::session::{use_app, LogoutButton};
use crate::Icon;

#[component]
pub fn ArchitectDashboard() -> Element {
    let app = use_app();
    let state = app.dashboard.read().clone();
    let email = app
        .user
        .read()
        .as_ref()
        .map(|u| u.email.clone())
        .unwrap_or_default();
    let mut show_client_modal = use_signal(|| false);
    let mut show_project_modal = use_signal(|| false);

    let active: Vec<Project> = state.active_projects().cloned().collect();
    let completed: Vec<Project> = state.completed_projects().cloned().collect();
    let selected_id = state.selected_project_id();

    rsx! {
        header {
            class: "topbar",
            div {
                h1 { "Painel do Arquiteto" }
                span { class: "muted", "{email}" }
            }
            div { class: "topbar-actions",
                button {
                    id: "open-create-client-btn",
                    class: "btn btn-outline",
                    onclick: move |_| show_client_modal.set(true),
                    Icon { icon: FaUserPlus, width: 14, height: 14 }
                    " Novo cliente"
                }
                button {
                    id: "open-create-project-btn",
                    class: "btn btn-primary",
                    onclick: move |_| show_project_modal.set(true),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Nova obra"
                }
                LogoutButton {}
            }
        }
        SummaryCards { summary: state.summary() }
        div {
            class: "dashboard-grid",
            aside {
                class: "dashboard-lists",
                ProjectList { title: "Obras em andamento".to_string(), projects: active, selected_id: selected_id }
                CompletedProjectList { projects: completed, selected_id: selected_id }
                ClientList { clients: state.clients().to_vec() }
            }
            div {
                class: "dashboard-detail",
                {match state.selected_project() {
                    Some(project) => rsx! {
                        ProjectDetails { key: "{project.id}", project: project.clone() }
                    },
                    None => rsx! {
                        div {
                            id: "empty-state",
                            class: "card empty-state",
                            h2 { "Nenhuma obra selecionada" }
                            p { class: "muted", "Escolha uma obra na lista ou crie uma nova para começar." }
                            button {
                                class: "btn btn-primary",
                                onclick: move |_| show_project_modal.set(true),
                                "Criar obra"
                            }
                        }
                    },
                }}
            }
        }
        if show_client_modal() {
            CreateClientModal { on_close: move |_| show_client_modal.set(false) }
        }
        if show_project_modal() {
            CreateProjectModal {
                clients: state.clients().to_vec(),
                on_close: move |_| show_project_modal.set(false),
            }
        }
    }
}

#[component]
fn SummaryCards(summary: DashboardSummary) -> Element {
    let invested = format_brl(summary.total_invested);
    rsx! {
        div {
            class: "summary-cards",
            div { class: "card summary-card",
                span { class: "figure-label", "Total de obras" }
                span { id: "total-projects", class: "figure-value", "{summary.total_projects}" }
            }
            div { class: "card summary-card",
                span { class: "figure-label", "Em andamento" }
                span { id: "active-projects", class: "figure-value", "{summary.active_projects}" }
            }
            div { class: "card summary-card",
                span { class: "figure-label", "Total investido" }
                span { id: "total-invested", class: "figure-value", "{invested}" }
            }
            div { class: "card summary-card",
                span { class: "figure-label", "Clientes ativos" }
                span { id: "active-clients", class: "figure-value", "{summary.clients}" }
            }
        }
    }
}

#[component]
fn ProjectList(title: String, projects: Vec<Project>, selected_id: Option<i64>) -> Element {
    let app = use_app();
    rsx! {
        section {
            class: "card",
            h3 { "{title} ({projects.len()})" }
            if projects.is_empty() {
                p { class: "muted", "Nenhuma obra em andamento." }
            }
            ul {
                class: "project-list",
                for project in projects.iter().cloned() {
                    li {
                        key: "{project.id}",
                        class: if selected_id == Some(project.id) { "project-item selected" } else { "project-item" },
                        onclick: move |_| app.select_project(project.id),
                        span { class: "project-name", "{project.name}" }
                        span { class: "muted", {format_brl(project.budget)} }
                    }
                }
            }
        }
    }
}

#[component]
fn CompletedProjectList(projects: Vec<Project>, selected_id: Option<i64>) -> Element {
    let app = use_app();
    rsx! {
        section {
            class: "card",
            h3 { "Obras concluídas ({projects.len()})" }
            if projects.is_empty() {
                p { class: "muted", "Nenhuma obra concluída." }
            }
            ul {
                class: "project-list",
                for project in projects.iter().cloned() {
                    li {
                        key: "{project.id}",
                        class: if selected_id == Some(project.id) { "project-item completed selected" } else { "project-item completed" },
                        onclick: move |_| app.select_project(project.id),
                        span { class: "project-name", "{project.name}" }
                        span { class: "muted", {completion_label(&project)} }
                    }
                }
            }
        }
    }
}

fn completion_label(project: &Project) -> String {
    match project.completed_at.as_ref() {
        Some(at) => format!("Concluída em {}", format_date(at)),
        None => "Concluída".to_string(),
    }
}

#[component]
fn ClientList(clients: Vec<User>) -> Element {
    rsx! {
        section {
            class: "card",
            h3 { "Clientes ({clients.len()})" }
            if clients.is_empty() {
                p { class: "muted", "Nenhum cliente cadastrado." }
            }
            ul {
                class: "client-list",
                for client in clients.iter() {
                    li { key: "{client.id}", "{client.email}" }
                }
            }
        }
    }
}

/// Budget figures, progress, expense launch and expense list of one project.
#[component]
pub fn ProjectDetails(project: Project) -> Element {
    let app = use_app();
    let figures = ProjectFigures::from(&project);
    let client = app
        .dashboard
        .read()
        .client(project.client_id)
        .map(|c| c.email.clone())
        .unwrap_or_else(|| format!("Cliente #{}", project.client_id));
    let status = project.status.label();
    let project_id = project.id;

    let finalize = move |_| async move {
        let state = app.dashboard.peek().clone();
        match actions::finalize_project(&app.backend(), browser::confirm, &state).await {
            Ok(Some(next)) => {
                app.notify(LogLevel::Success, "Obra finalizada com sucesso!");
                app.set_dashboard(next);
            }
            Ok(None) => {}
            Err(e) => app.report(e, "Erro ao finalizar obra"),
        }
    };

    rsx! {
        section {
            id: "project-details",
            class: "card",
            div { class: "card-header",
                h2 { id: "project-name", "{project.name}" }
                span { class: "badge", "{status}" }
            }
            p { class: "muted", "Cliente: {client}" }
            div { class: "figures",
                Figure { label: "Orçamento", value: format_brl(figures.budget) }
                Figure { label: "Gasto", value: format_brl(figures.spent) }
                Figure {
                    label: "Saldo",
                    value: format_brl(figures.remaining),
                    class: figures.tone.text_class().to_string(),
                }
                Figure { label: "Despesas", value: figures.expense_count.to_string() }
            }
            ProgressBar { progress: figures.progress }
            if figures.editable {
                button {
                    id: "finalize-project-btn",
                    class: "btn btn-success",
                    onclick: finalize,
                    Icon { icon: FaCheck, width: 14, height: 14 }
                    " Finalizar obra"
                }
            }
        }
        if figures.editable {
            ExpenseLaunch { key: "{project_id}" }
        }
        ExpenseList { expenses: project.expenses.clone() }
    }
}
