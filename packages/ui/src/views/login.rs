use dioxus::prelude::*;

use crate::actions;
use crate::session::use_app;

/// Email/password sign-in. Errors are shown inline under the form.
#[component]
pub fn LoginView() -> Element {
    let app = use_app();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        async move {
            error.set(None);
            loading.set(true);
            let result = actions::sign_in(&app.backend(), &email(), &password()).await;
            loading.set(false);
            match result {
                Ok(user) => {
                    password.set(String::new());
                    app.enter(user).await;
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        }
    };

    rsx! {
        div {
            class: "login-container",
            form {
                id: "login-form",
                class: "card login-card",
                onsubmit,
                h1 { class: "login-title", "Gestão de Obras" }
                p { class: "muted", "Entre com sua conta para acompanhar suas obras." }
                label { r#for: "email", "E-mail" }
                input {
                    id: "email",
                    r#type: "email",
                    required: true,
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "password", "Senha" }
                input {
                    id: "password",
                    r#type: "password",
                    required: true,
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { id: "login-error", class: "form-error", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Entrando..." } else { "Entrar" }
                }
            }
        }
    }
}
