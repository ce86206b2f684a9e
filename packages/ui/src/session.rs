//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] owns one [`AppContext`]: the backend client, the
//! configuration, and the signals holding the current view, user, dashboard
//! snapshots and toasts. Components get it with [`use_app`]; every field is a
//! signal or copy handle, so the context itself is `Copy` and moves freely into
//! event handlers and spawned tasks.

use api::{ApiClient, ExpenseCategory, User};
use dioxus::prelude::*;
use store::{ClientConfig, PlatformTokenStore};

use crate::actions::{self, ActionError, Reloaded, DASHBOARD_LOAD_FAILED};
use crate::browser;
use crate::icons::FaRightFromBracket;
use crate::notifications::{show_toast, LogLevel, Toasts};
use crate::router::{ViewId, ViewRouter};
use crate::state::{ClientState, DashboardState, Session};
use crate::Icon;

/// The backend client the running app talks to.
pub type Client = ApiClient<PlatformTokenStore>;

#[derive(Clone, Copy)]
pub struct AppContext {
    backend: CopyValue<Client>,
    config: CopyValue<ClientConfig>,
    pub router: Signal<ViewRouter>,
    pub user: Signal<Option<User>>,
    pub dashboard: Signal<DashboardState>,
    pub client: Signal<ClientState>,
    pub toasts: Signal<Toasts>,
}

impl AppContext {
    /// Must run inside a component scope, which then owns the signals.
    fn new(config: ClientConfig) -> Self {
        let origin = browser::page_origin().unwrap_or_default();
        let base_url = config.resolve_base_url(&origin);
        tracing::info!("using backend at {}", base_url);
        let backend = ApiClient::new(base_url, store::platform_token_store(&config));
        Self {
            backend: CopyValue::new(backend),
            config: CopyValue::new(config),
            router: Signal::new(ViewRouter::default()),
            user: Signal::new(None),
            dashboard: Signal::new(DashboardState::default()),
            client: Signal::new(ClientState::default()),
            toasts: Signal::new(Toasts::default()),
        }
    }

    pub fn backend(&self) -> Client {
        self.backend.read().clone()
    }

    pub fn config(&self) -> ClientConfig {
        self.config.read().clone()
    }

    /// Absolute URL of a backend-relative path such as a photo URL.
    pub fn asset_url(&self, path: &str) -> String {
        self.backend.read().url(path)
    }

    pub fn show(&self, view: ViewId) {
        let mut router = self.router;
        router.write().show(view);
    }

    pub fn notify(&self, level: LogLevel, message: &str) {
        let duration = self.config.read().ui.toast_duration_ms;
        show_toast(self.toasts, level, message, duration);
    }

    /// Surface a failed action. Failed reloads end the session.
    pub fn report(&self, error: ActionError, context: &str) {
        match &error {
            ActionError::SessionLost(cause) => {
                tracing::error!("{}: dashboard reload failed: {}", context, cause);
                self.notify(LogLevel::Error, DASHBOARD_LOAD_FAILED);
                self.logout();
            }
            ActionError::Failed(cause) => {
                tracing::warn!("{}: {}", context, cause);
                self.notify(LogLevel::Error, &format!("{context}: {cause}"));
            }
            ActionError::NoProjectSelected(_) | ActionError::InvalidInput(_) => {
                self.notify(error.level(), &error.to_string());
            }
        }
    }

    /// Current snapshots, as handed to [`actions::reload_session`].
    fn session(&self) -> Session {
        Session {
            user: self.user.peek().clone(),
            dashboard: self.dashboard.peek().clone(),
            client: self.client.peek().clone(),
        }
    }

    fn replace_session(&self, session: Session) {
        let (mut user, mut dashboard, mut client) = (self.user, self.dashboard, self.client);
        user.set(session.user);
        dashboard.set(session.dashboard);
        client.set(session.client);
    }

    /// Forget the token and every snapshot, back to the login view.
    pub fn logout(&self) {
        let signed_out = actions::sign_out(&*self.backend.read());
        self.replace_session(signed_out);
        self.show(ViewId::Login);
    }

    /// Resume a stored session on startup.
    pub async fn start(self) {
        match actions::restore_session(&self.backend()).await {
            Some(user) => self.enter(user).await,
            None => self.show(ViewId::Login),
        }
    }

    /// Route a signed-in user to their dashboard.
    pub async fn enter(self, user: User) {
        let mut signal = self.user;
        signal.set(Some(user));
        self.refresh().await;
    }

    /// Reload whichever dashboard belongs to the signed-in user.
    pub async fn refresh(self) {
        let session = self.session();
        let context = if session.is_architect() {
            "architect dashboard"
        } else {
            "client dashboard"
        };
        match actions::reload_session(&self.backend(), &session).await {
            Ok(Reloaded::Architect(state)) => self.set_dashboard(state),
            Ok(Reloaded::Client(state)) => {
                let view = state.view();
                let mut client = self.client;
                client.set(state);
                self.show(view);
            }
            Err(e) => self.report(ActionError::SessionLost(e), context),
        }
    }

    pub fn set_dashboard(&self, state: DashboardState) {
        let mut dashboard = self.dashboard;
        dashboard.set(state);
        self.show(ViewId::ArchitectDashboard);
    }

    pub fn select_project(&self, project_id: i64) {
        let mut dashboard = self.dashboard;
        dashboard.write().select(project_id);
    }

    pub fn open_client_project(&self, project_id: i64) {
        let mut client = self.client;
        if client.write().open(project_id).is_none() {
            return;
        }
        let view = client.peek().view();
        self.show(view);
    }

    /// Close the open project and refetch the client's list.
    pub async fn back_to_selection(self) {
        let mut client = self.client;
        client.write().close();
        self.refresh().await;
    }

    pub fn set_client_filter(&self, filter: Option<ExpenseCategory>) {
        let mut client = self.client;
        client.write().set_filter(filter);
    }
}

/// Get the app context installed by [`SessionProvider`].
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// Provider component that owns the session.
/// Wrap your app with this component; it restores a stored session on mount.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let app = use_hook(|| AppContext::new(config.clone()));
    use_context_provider(|| app);
    use_context_provider(|| app.toasts);

    use_hook(move || {
        spawn(async move {
            app.start().await;
        });
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sair".to_string())] label: String,
    #[props(default = "btn btn-outline".to_string())] class: String,
) -> Element {
    let app = use_app();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| app.logout(),
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            " {label}"
        }
    }
}
