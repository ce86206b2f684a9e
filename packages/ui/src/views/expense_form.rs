use api::{ExpenseCategory, PhotoUpload};
use dioxus::prelude::*;

use crate::actions::{self, ExpenseInput};
use crate::category::{form_copy, radio_value, theme, CategoryForms};
use crate::notifications::LogLevel;
use crate::session::use_app;

/// Category picker plus the form of the picked category.
#[component]
pub fn ExpenseLaunch() -> Element {
    let mut forms = use_signal(CategoryForms::default);
    let active = forms.read().active().clone();

    rsx! {
        section {
            id: "expense-launch-area",
            class: "card",
            h3 { "Lançar despesa" }
            div {
                class: "category-picker",
                for category in ExpenseCategory::ALL {
                    label {
                        key: "{category}",
                        class: if forms.read().is_visible(&category) { "category-option active" } else { "category-option" },
                        input {
                            r#type: "radio",
                            name: "expenseCategory",
                            value: radio_value(&category),
                            checked: forms.read().is_visible(&category),
                            onchange: move |evt: FormEvent| {
                                forms.write().select_radio(&evt.value());
                            },
                        }
                        {category_caption(&category)}
                    }
                }
            }
            ExpenseForm { key: "{active}", category: active.clone() }
        }
    }
}

fn category_caption(category: &ExpenseCategory) -> String {
    format!(" {} {}", theme(category).icon, category.label())
}

#[component]
fn ExpenseForm(category: ExpenseCategory) -> Element {
    let app = use_app();
    let mut name = use_signal(String::new);
    let mut value = use_signal(String::new);
    let mut photo = use_signal(PhotoField::default);
    let mut submitting = use_signal(|| false);
    let copy = form_copy(&category);
    let form_id = format!("expense-form-{}", radio_value(&category));
    let photo_key = photo.read().key();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let category = category.clone();
        async move {
            let input = ExpenseInput {
                name: name(),
                value: value(),
                photo: photo.read().upload.clone(),
            };
            let state = app.dashboard.peek().clone();
            submitting.set(true);
            let result = actions::submit_expense(&app.backend(), &state, category, input).await;
            submitting.set(false);
            match result {
                Ok(next) => {
                    name.set(String::new());
                    value.set(String::new());
                    photo.write().reset();
                    app.notify(LogLevel::Success, "Despesa adicionada com sucesso!");
                    app.set_dashboard(next);
                }
                Err(e) => app.report(e, "Erro ao adicionar despesa"),
            }
        }
    };

    rsx! {
        form {
            id: "{form_id}",
            class: "expense-form",
            onsubmit,
            h4 { "{copy.title}" }
            label { "{copy.name_label}" }
            input {
                r#type: "text",
                placeholder: copy.name_placeholder,
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
            }
            label { "{copy.value_label}" }
            input {
                r#type: "text",
                placeholder: "0,00",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
            label { "Foto do comprovante (opcional)" }
            PhotoInput {
                key: "{photo_key}",
                onpick: move |upload| {
                    photo.write().upload = upload;
                },
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Enviando..." } else { "{copy.submit_label}" }
            }
        }
    }
}

/// The picked receipt photo. `generation` keys the file input, so a reset
/// remounts it empty.
#[derive(Debug, Clone, Default, PartialEq)]
struct PhotoField {
    upload: Option<PhotoUpload>,
    generation: u32,
}

impl PhotoField {
    fn key(&self) -> String {
        format!("photo-{}", self.generation)
    }

    fn reset(&mut self) {
        self.upload = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[component]
fn PhotoInput(onpick: EventHandler<Option<PhotoUpload>>) -> Element {
    let onchange = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(file_name) = engine.files().into_iter().next() else {
            onpick.call(None);
            return;
        };
        match engine.read_file(&file_name).await {
            Some(bytes) => onpick.call(Some(PhotoUpload { file_name, bytes })),
            None => tracing::warn!("could not read {}", file_name),
        }
    };

    rsx! {
        input {
            r#type: "file",
            accept: "image/*",
            onchange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_reset_remounts_input() {
        let mut field = PhotoField {
            upload: Some(PhotoUpload {
                file_name: "nota.jpg".into(),
                bytes: vec![1],
            }),
            generation: 0,
        };
        let before = field.key();
        field.reset();
        assert!(field.upload.is_none());
        assert_ne!(field.key(), before);
    }
}
