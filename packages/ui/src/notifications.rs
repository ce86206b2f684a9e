use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn class(&self) -> &'static str {
        match self {
            LogLevel::Info => "toast toast-info",
            LogLevel::Success => "toast toast-success",
            LogLevel::Warning => "toast toast-warning",
            LogLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Transient notifications, newest last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, level: LogLevel, message: &str) -> u64 {
        self.next_id += 1;
        self.entries.push(Toast {
            id: self.next_id,
            timestamp: current_time(),
            level,
            message: message.to_string(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a toast and drop it again after `duration_ms`.
pub fn show_toast(mut toasts: Signal<Toasts>, level: LogLevel, message: &str, duration_ms: u32) {
    match level {
        LogLevel::Error => tracing::error!("{}", message),
        LogLevel::Warning => tracing::warn!("{}", message),
        LogLevel::Info | LogLevel::Success => tracing::info!("{}", message),
    }
    let id = toasts.write().push(level, message);
    spawn(async move {
        let duration = std::time::Duration::from_millis(u64::from(duration_ms));
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(duration).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(duration).await;
        toasts.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Stack of active toasts, top right.
#[component]
pub fn ToastHost() -> Element {
    let mut toasts = use_toasts();

    rsx! {
        div {
            class: "toast-stack",
            for toast in toasts.read().entries().iter().cloned() {
                div {
                    key: "{toast.id}",
                    class: toast.level.class(),
                    onclick: move |_| toasts.write().dismiss(toast.id),
                    span { class: "toast-time", "{toast.timestamp}" }
                    span { class: "toast-message", "{toast.message}" }
                }
            }
        }
    }
}
