use api::User;
use dioxus::prelude::*;

use super::ModalOverlay;
use crate::actions;
use crate::notifications::LogLevel;
use crate::session::use_app;

#[component]
pub fn CreateClientModal(on_close: EventHandler<()>) -> Element {
    let app = use_app();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            let state = app.dashboard.peek().clone();
            saving.set(true);
            let result = actions::create_client(&app.backend(), &email(), &password(), &state).await;
            saving.set(false);
            match result {
                Ok(next) => {
                    app.notify(LogLevel::Success, "Cliente criado com sucesso!");
                    app.set_dashboard(next);
                    on_close.call(());
                }
                Err(e) => app.report(e, "Erro ao criar cliente"),
            }
        }
    };

    rsx! {
        ModalOverlay {
            title: "Novo cliente",
            on_close: move |_| on_close.call(()),
            form {
                id: "create-client-form",
                class: "modal-body",
                onsubmit,
                label { r#for: "client-email", "E-mail" }
                input {
                    id: "client-email",
                    r#type: "email",
                    required: true,
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "client-password", "Senha provisória" }
                input {
                    id: "client-password",
                    r#type: "password",
                    required: true,
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancelar"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        "Criar cliente"
                    }
                }
            }
        }
    }
}

#[component]
pub fn CreateProjectModal(clients: Vec<User>, on_close: EventHandler<()>) -> Element {
    let app = use_app();
    let mut name = use_signal(String::new);
    let mut budget = use_signal(String::new);
    let mut client_id = use_signal(|| Option::<i64>::None);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            saving.set(true);
            let result = actions::create_project(&app.backend(), &name(), &budget(), client_id()).await;
            saving.set(false);
            match result {
                Ok(next) => {
                    app.notify(LogLevel::Success, "Obra criada com sucesso!");
                    app.set_dashboard(next);
                    on_close.call(());
                }
                Err(e) => app.report(e, "Erro ao criar obra"),
            }
        }
    };

    rsx! {
        ModalOverlay {
            title: "Nova obra",
            on_close: move |_| on_close.call(()),
            form {
                id: "create-project-form",
                class: "modal-body",
                onsubmit,
                label { r#for: "project-name-input", "Nome da obra" }
                input {
                    id: "project-name-input",
                    r#type: "text",
                    required: true,
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { r#for: "project-budget-input", "Orçamento (R$)" }
                input {
                    id: "project-budget-input",
                    r#type: "text",
                    required: true,
                    placeholder: "0,00",
                    value: "{budget}",
                    oninput: move |evt| budget.set(evt.value()),
                }
                label { r#for: "project-client-select", "Cliente" }
                select {
                    id: "project-client-select",
                    required: true,
                    onchange: move |evt| client_id.set(evt.value().parse().ok()),
                    option { value: "", disabled: true, selected: client_id().is_none(), "Selecione um cliente" }
                    for client in clients.iter() {
                        option {
                            key: "{client.id}",
                            value: "{client.id}",
                            selected: client_id() == Some(client.id),
                            "{client.email}"
                        }
                    }
                }
                if clients.is_empty() {
                    p { class: "muted", "Cadastre um cliente antes de criar uma obra." }
                }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancelar"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        "Criar obra"
                    }
                }
            }
        }
    }
}
