use api::Project;
use dioxus::prelude::*;

use super::client::{ClientHeader, FeedbackPanel};
use super::widgets::{ExpenseTimeline, Figure};
use crate::actions;
use crate::analytics::timeline;
use crate::browser;
use crate::format::{format_brl, format_date};
use crate::icons::{FaFilePdf, FaPrint, FaWhatsapp};
use crate::metrics::CompletionSummary;
use crate::notifications::LogLevel;
use crate::session::use_app;
use crate::Icon;

/// A finished project as seen by its client.
#[component]
pub fn CompletedClientView() -> Element {
    let app = use_app();
    let state = app.client.read().clone();

    rsx! {
        ClientHeader { title: "Obra Concluída", can_choose: state.can_choose() }
        {match state.current() {
            Some(project) => rsx! {
                CompletedProject { key: "{project.id}", project: project.clone() }
            },
            None => rsx! {
                div { class: "card empty-state", p { "Nenhuma obra selecionada." } }
            },
        }}
    }
}

#[component]
fn CompletedProject(project: Project) -> Element {
    let app = use_app();
    let summary = CompletionSummary::of(&project);
    let outcome_class = if summary.saved() { "text-green-600" } else { "text-red-600" };
    let completed_on = project
        .completed_at
        .as_ref()
        .map(format_date)
        .unwrap_or_else(|| "N/A".to_string());
    let entries = timeline(&project.expenses, None);
    let project_id = project.id;
    let new_project_link = app
        .config()
        .contact
        .whatsapp_link("Olá! Gostaria de conversar sobre um novo projeto.");

    let report = move |_| async move {
        match actions::fetch_report(&app.backend(), project_id).await {
            Ok(bytes) => match browser::open_pdf(&bytes) {
                Ok(()) => app.notify(LogLevel::Success, "Relatório gerado com sucesso!"),
                Err(e) => {
                    tracing::error!("Failed to open report: {}", e);
                    app.notify(LogLevel::Error, "Não foi possível abrir o relatório.");
                }
            },
            Err(e) => app.report(e, "Erro ao gerar relatório"),
        }
    };

    rsx! {
        div {
            class: "client-welcome completed",
            h2 { "🎉 {project.name} foi concluída!" }
            p { class: "muted", "Concluída em {completed_on}" }
        }
        div {
            class: "kpi-cards",
            div { class: "card kpi-card",
                Figure { label: "Orçamento", value: format_brl(project.budget) }
            }
            div { class: "card kpi-card",
                Figure { label: "Total gasto", value: format_brl(project.spent) }
            }
            div { class: "card kpi-card",
                Figure {
                    label: "Resultado",
                    value: summary.outcome_label(),
                    class: outcome_class.to_string(),
                }
                span { class: "muted", {summary.percentage_label()} }
            }
            div { class: "card kpi-card",
                Figure { label: "Duração", value: summary.duration_label() }
            }
        }
        ExpenseTimeline { entries: entries }
        section {
            class: "card report-actions",
            h3 { "Relatórios" }
            button {
                id: "download-report-btn",
                class: "btn btn-primary",
                onclick: report,
                Icon { icon: FaFilePdf, width: 14, height: 14 }
                " Baixar relatório em PDF"
            }
            button {
                class: "btn btn-outline",
                onclick: move |_| browser::print_page(),
                Icon { icon: FaPrint, width: 14, height: 14 }
                " Imprimir resumo"
            }
        }
        section {
            class: "card",
            h3 { "Que tal um novo projeto?" }
            p { class: "muted", "Fale com o arquiteto para planejar sua próxima obra." }
            a {
                class: "btn btn-whatsapp",
                href: "{new_project_link}",
                target: "_blank",
                Icon { icon: FaWhatsapp, width: 14, height: 14 }
                " Conversar sobre um novo projeto"
            }
        }
        FeedbackPanel {}
    }
}
