use dioxus::prelude::*;

use crate::notifications::ToastHost;
use crate::router::ViewId;
use crate::session::use_app;

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod widgets;

mod login;
pub use login::LoginView;

mod architect;
pub use architect::{ArchitectDashboard, ProjectDetails};

mod expense_form;
pub use expense_form::ExpenseLaunch;

mod modals;
pub use modals::{CreateClientModal, CreateProjectModal};

mod client;
pub use client::ClientDashboardView;

mod completed;
pub use completed::CompletedClientView;

mod selection;
pub use selection::ProjectSelectionView;

/// Renders the toasts and the one visible view.
#[component]
pub fn AppShell() -> Element {
    let app = use_app();
    let view = app.router.read().current();

    rsx! {
        document::Link { rel: "stylesheet", href: crate::DASHBOARD_CSS }
        ToastHost {}
        div {
            id: view.element_id(),
            class: "view",
            {match view {
                ViewId::Login => rsx! { LoginView {} },
                ViewId::ArchitectDashboard => rsx! { ArchitectDashboard {} },
                ViewId::ClientDashboard => rsx! { ClientDashboardView {} },
                ViewId::CompletedClient => rsx! { CompletedClientView {} },
                ViewId::ClientProjectSelection => rsx! { ProjectSelectionView {} },
            }}
        }
    }
}
