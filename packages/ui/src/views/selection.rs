use dioxus::prelude::*;

use crate::format::format_brl;
use crate::metrics::ProjectFigures;
use crate::session::{use_app, LogoutButton};

/// List of the client's projects; picking one opens the matching view.
#[component]
pub fn ProjectSelectionView() -> Element {
    let app = use_app();
    let projects = app.client.read().projects().to_vec();

    rsx! {
        header {
            class: "topbar",
            h1 { "Minhas Obras" }
            LogoutButton {}
        }
        p { class: "muted", "Selecione uma obra para acompanhar." }
        div {
            id: "client-project-list",
            class: "selection-grid",
            for project in projects.iter().cloned() {
                button {
                    key: "{project.id}",
                    class: "card selection-card",
                    onclick: move |_| app.open_client_project(project.id),
                    h3 { "{project.name}" }
                    span {
                        class: if project.is_completed() { "badge bg-green-100 text-green-800" } else { "badge bg-blue-100 text-blue-800" },
                        {project.status.label()}
                    }
                    span { class: "muted", {spent_caption(&ProjectFigures::from(&project))} }
                }
            }
        }
    }
}

fn spent_caption(figures: &ProjectFigures) -> String {
    format!(
        "{} de {} gastos",
        format_brl(figures.spent),
        format_brl(figures.budget)
    )
}
