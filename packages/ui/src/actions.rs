//! # Controller actions
//!
//! The logic behind every event handler, written against [`Backend`] so it runs
//! unchanged against the real API or [`api::MemoryBackend`].
//!
//! | Action | Calls | Result |
//! |--------|-------|--------|
//! | [`sign_in`] | `POST /token`, `GET /users/me` | the signed-in [`User`]; token persisted |
//! | [`restore_session`] | `GET /users/me` if a token exists | the user, or `None` (token cleared) |
//! | [`load_architect_dashboard`] | `GET /projects/` and `GET /users/clients` together | a fresh [`DashboardState`] |
//! | [`load_client_dashboard`] | `GET /projects/` | a [`ClientLanding`] |
//! | [`reload_session`] | the loader for the user's role | a [`Reloaded`] dashboard, open project kept |
//! | [`sign_out`] | none | token cleared, an empty [`Session`] |
//! | [`submit_expense`] | `POST /projects/{id}/expenses/`, then reload | new state, same project open |
//! | [`delete_expense`] | `DELETE /expenses/{id}` after confirmation | whether anything was deleted |
//! | [`finalize_project`] | `PUT /projects/{id}/finalize` after confirmation, then reload | new state, or `None` if declined |
//! | [`create_client`] | `POST /users/`, then reload | new state |
//! | [`create_project`] | `POST /projects/`, then reload | new state with the project selected |
//! | [`fetch_report`] | `GET /projects/{id}/report` | PDF bytes |
//!
//! A reload that fails after a successful mutation is reported as
//! [`ActionError::SessionLost`]; callers treat it like a failed dashboard load.

use api::{ApiError, Backend, ExpenseCategory, ExpenseDraft, NewClient, NewProject, PhotoUpload, User};

use crate::format::parse_amount;
use crate::notifications::LogLevel;
use crate::router::ViewId;
use crate::state::{ClientLanding, ClientState, DashboardState, Session};

pub const NO_PROJECT_FOR_EXPENSE: &str =
    "Por favor, selecione um projeto antes de adicionar uma despesa.";
pub const NO_PROJECT_TO_FINALIZE: &str = "Nenhum projeto selecionado para finalizar.";
pub const CONFIRM_DELETE_EXPENSE: &str =
    "Tem certeza que deseja excluir esta despesa? Esta ação não pode ser desfeita.";
pub const CONFIRM_FINALIZE_PROJECT: &str =
    "Tem certeza que deseja finalizar esta obra? Esta ação não pode ser desfeita.";
pub const DASHBOARD_LOAD_FAILED: &str = "Erro ao carregar painel. Tente novamente.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("{0}")]
    NoProjectSelected(&'static str),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Failed(#[from] ApiError),
    #[error("{}", DASHBOARD_LOAD_FAILED)]
    SessionLost(ApiError),
}

impl ActionError {
    pub fn level(&self) -> LogLevel {
        match self {
            ActionError::NoProjectSelected(_) | ActionError::InvalidInput(_) => LogLevel::Warning,
            ActionError::Failed(_) | ActionError::SessionLost(_) => LogLevel::Error,
        }
    }

    /// The session can no longer be trusted and the user must sign in again.
    pub fn is_session_lost(&self) -> bool {
        matches!(self, ActionError::SessionLost(_))
    }
}

/// Log in, persist the token and fetch the account.
pub async fn sign_in<B: Backend>(backend: &B, email: &str, password: &str) -> Result<User, ApiError> {
    let token = backend.login(email.trim(), password).await?;
    backend.save_token(&token.access_token);
    match backend.current_user().await {
        Ok(user) => {
            tracing::info!("signed in as {} ({:?})", user.email, user.role);
            Ok(user)
        }
        Err(e) => {
            backend.clear_token();
            Err(e)
        }
    }
}

/// Resume a stored session. Any failure clears the token.
pub async fn restore_session<B: Backend>(backend: &B) -> Option<User> {
    if !backend.has_token() {
        return None;
    }
    match backend.current_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("stored session rejected: {}", e);
            backend.clear_token();
            None
        }
    }
}

pub async fn load_architect_dashboard<B: Backend>(
    backend: &B,
    selected: Option<i64>,
) -> Result<DashboardState, ApiError> {
    let (projects, clients) =
        futures::future::try_join(backend.list_projects(), backend.list_clients()).await?;
    tracing::debug!("loaded {} projects, {} clients", projects.len(), clients.len());
    Ok(DashboardState::new(projects, clients, selected))
}

pub async fn load_client_dashboard<B: Backend>(backend: &B) -> Result<ClientLanding, ApiError> {
    let projects = backend.list_projects().await?;
    tracing::debug!("loaded {} client projects", projects.len());
    Ok(ClientLanding::from_projects(projects))
}

/// Forget the token. The returned session replaces whatever was shown.
pub fn sign_out<B: Backend>(backend: &B) -> Session {
    backend.clear_token();
    tracing::info!("signed out");
    Session::default()
}

/// A dashboard reloaded for the signed-in user's role.
#[derive(Debug, Clone, PartialEq)]
pub enum Reloaded {
    Architect(DashboardState),
    Client(ClientState),
}

impl Reloaded {
    pub fn view(&self) -> ViewId {
        match self {
            Reloaded::Architect(_) => ViewId::ArchitectDashboard,
            Reloaded::Client(state) => state.view(),
        }
    }
}

/// Reload the dashboard for `session`'s role, keeping the selected or open
/// project when it still exists.
pub async fn reload_session<B: Backend>(backend: &B, session: &Session) -> Result<Reloaded, ApiError> {
    if session.is_architect() {
        let selected = session.dashboard.selected_project_id();
        let state = load_architect_dashboard(backend, selected).await?;
        Ok(Reloaded::Architect(state))
    } else {
        let current = session.client.current().map(|p| p.id);
        let landing = load_client_dashboard(backend).await?;
        Ok(Reloaded::Client(ClientState::reloaded(landing, current)))
    }
}

async fn reload<B: Backend>(backend: &B, selected: Option<i64>) -> Result<DashboardState, ActionError> {
    load_architect_dashboard(backend, selected)
        .await
        .map_err(ActionError::SessionLost)
}

/// The expense form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseInput {
    pub name: String,
    pub value: String,
    pub photo: Option<PhotoUpload>,
}

impl ExpenseInput {
    pub fn into_draft(self, category: ExpenseCategory) -> Result<ExpenseDraft, ActionError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ActionError::InvalidInput(
                "Informe a descrição da despesa.".to_string(),
            ));
        }
        let value = parse_amount(&self.value)
            .filter(|v| *v > 0.0)
            .ok_or_else(|| ActionError::InvalidInput("Informe um valor válido.".to_string()))?;
        Ok(ExpenseDraft {
            name,
            value,
            category,
            photo: self.photo,
        })
    }
}

pub async fn submit_expense<B: Backend>(
    backend: &B,
    state: &DashboardState,
    category: ExpenseCategory,
    input: ExpenseInput,
) -> Result<DashboardState, ActionError> {
    let project_id = state
        .selected_project_id()
        .ok_or(ActionError::NoProjectSelected(NO_PROJECT_FOR_EXPENSE))?;
    let draft = input.into_draft(category)?;
    let expense = backend.create_expense(project_id, draft).await?;
    tracing::info!("expense {} added to project {}", expense.id, project_id);
    reload(backend, Some(project_id)).await
}

/// Delete an expense once `confirm` agrees. Returns `false` when declined.
pub async fn delete_expense<B: Backend>(
    backend: &B,
    confirm: impl FnOnce(&str) -> bool,
    expense_id: i64,
) -> Result<bool, ActionError> {
    if !confirm(CONFIRM_DELETE_EXPENSE) {
        return Ok(false);
    }
    backend.delete_expense(expense_id).await?;
    tracing::info!("expense {} deleted", expense_id);
    Ok(true)
}

pub async fn finalize_project<B: Backend>(
    backend: &B,
    confirm: impl FnOnce(&str) -> bool,
    state: &DashboardState,
) -> Result<Option<DashboardState>, ActionError> {
    let project_id = state
        .selected_project_id()
        .ok_or(ActionError::NoProjectSelected(NO_PROJECT_TO_FINALIZE))?;
    if !confirm(CONFIRM_FINALIZE_PROJECT) {
        return Ok(None);
    }
    backend.finalize_project(project_id).await?;
    tracing::info!("project {} finalized", project_id);
    reload(backend, Some(project_id)).await.map(Some)
}

pub async fn create_client<B: Backend>(
    backend: &B,
    email: &str,
    password: &str,
    state: &DashboardState,
) -> Result<DashboardState, ActionError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ActionError::InvalidInput(
            "Informe e-mail e senha do cliente.".to_string(),
        ));
    }
    let client = backend.create_client(&NewClient::new(email, password)).await?;
    tracing::info!("client {} created", client.id);
    reload(backend, state.selected_project_id()).await
}

pub async fn create_project<B: Backend>(
    backend: &B,
    name: &str,
    budget: &str,
    client_id: Option<i64>,
) -> Result<DashboardState, ActionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ActionError::InvalidInput("Informe o nome da obra.".to_string()));
    }
    let budget = parse_amount(budget)
        .filter(|b| *b > 0.0)
        .ok_or_else(|| ActionError::InvalidInput("Informe um orçamento válido.".to_string()))?;
    let client_id = client_id
        .ok_or_else(|| ActionError::InvalidInput("Selecione um cliente.".to_string()))?;
    let project = backend
        .create_project(&NewProject {
            name: name.to_string(),
            budget,
            client_id,
        })
        .await?;
    tracing::info!("project {} created", project.id);
    reload(backend, Some(project.id)).await
}

pub async fn fetch_report<B: Backend>(backend: &B, project_id: i64) -> Result<Vec<u8>, ActionError> {
    Ok(backend.project_report(project_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MemoryBackend, Role};

    struct Seeded {
        backend: MemoryBackend,
        architect: User,
        client: User,
    }

    fn seeded() -> Seeded {
        let backend = MemoryBackend::new();
        let architect = backend.add_user("arq@obra.com", "segredo", Role::Architect);
        let client = backend.add_user("cliente@obra.com", "senha", Role::Client);
        Seeded {
            backend,
            architect,
            client,
        }
    }

    fn never(_: &str) -> bool {
        panic!("confirmation should not be asked")
    }

    #[tokio::test]
    async fn test_sign_in_persists_token() {
        let s = seeded();
        let user = sign_in(&s.backend, " arq@obra.com ", "segredo").await.unwrap();
        assert_eq!(user, s.architect);
        assert!(s.backend.has_token());
        assert_eq!(s.backend.calls(), vec!["POST /token", "GET /users/me"]);
    }

    #[tokio::test]
    async fn test_sign_in_failure_keeps_no_token() {
        let s = seeded();
        let err = sign_in(&s.backend, "arq@obra.com", "errada").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
        assert!(!s.backend.has_token());
    }

    #[tokio::test]
    async fn test_restore_session() {
        let s = seeded();
        assert_eq!(restore_session(&s.backend).await, None);
        assert_eq!(s.backend.call_count(), 0);

        s.backend.sign_in_as(&s.client);
        assert_eq!(restore_session(&s.backend).await, Some(s.client.clone()));

        s.backend.fail_next("GET /users/me", ApiError::request(Some(401), "expirado"));
        assert_eq!(restore_session(&s.backend).await, None);
        assert!(!s.backend.has_token());
    }

    #[tokio::test]
    async fn test_architect_dashboard_partition() {
        let s = seeded();
        let a = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        s.backend.add_project(&s.architect, &s.client, "Casa B", 2000.0);
        let done = s.backend.add_project(&s.architect, &s.client, "Casa C", 500.0);
        s.backend.complete_project(done.id, chrono::Utc::now());
        s.backend.sign_in_as(&s.architect);

        let state = load_architect_dashboard(&s.backend, Some(a.id)).await.unwrap();
        assert_eq!(state.active_projects().count(), 2);
        assert_eq!(state.completed_projects().count(), 1);
        assert_eq!(state.clients(), &[s.client.clone()]);
        assert_eq!(state.selected_project().map(|p| p.id), Some(a.id));
    }

    #[tokio::test]
    async fn test_dashboard_load_failure() {
        let s = seeded();
        s.backend.sign_in_as(&s.architect);
        s.backend.fail_next("GET /users/clients", ApiError::request(Some(500), "falhou"));
        let err = load_architect_dashboard(&s.backend, None).await.unwrap_err();
        assert_eq!(err.to_string(), "falhou");
    }

    #[tokio::test]
    async fn test_client_dashboard_landing() {
        let s = seeded();
        s.backend.sign_in_as(&s.client);
        assert_eq!(load_client_dashboard(&s.backend).await.unwrap(), ClientLanding::Empty);

        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        match load_client_dashboard(&s.backend).await.unwrap() {
            ClientLanding::Single(project) => assert_eq!(project.id, p.id),
            other => panic!("unexpected landing {other:?}"),
        }

        s.backend.add_project(&s.architect, &s.client, "Casa B", 1000.0);
        assert!(matches!(
            load_client_dashboard(&s.backend).await.unwrap(),
            ClientLanding::Choose(projects) if projects.len() == 2
        ));
    }

    #[tokio::test]
    async fn test_submit_without_selection_makes_no_call() {
        let s = seeded();
        s.backend.sign_in_as(&s.architect);
        let input = ExpenseInput {
            name: "Cimento".into(),
            value: "80".into(),
            photo: None,
        };
        let err = submit_expense(&s.backend, &DashboardState::default(), ExpenseCategory::RawMaterial, input)
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::NoProjectSelected(NO_PROJECT_FOR_EXPENSE));
        assert_eq!(err.level(), LogLevel::Warning);
        assert_eq!(s.backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_expense_reloads_with_project_open() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        s.backend.sign_in_as(&s.architect);
        let state = load_architect_dashboard(&s.backend, Some(p.id)).await.unwrap();

        let input = ExpenseInput {
            name: "Cimento".into(),
            value: "1.234,50".into(),
            photo: Some(PhotoUpload {
                file_name: "nota.jpg".into(),
                bytes: vec![1, 2, 3],
            }),
        };
        let next = submit_expense(&s.backend, &state, ExpenseCategory::RawMaterial, input)
            .await
            .unwrap();
        let project = next.selected_project().unwrap();
        assert_eq!(project.id, p.id);
        assert_eq!(project.spent, 1234.5);
        assert_eq!(project.expenses[0].category, ExpenseCategory::RawMaterial);
        assert!(project.expenses[0].photo_url.is_some());
    }

    #[tokio::test]
    async fn test_submit_invalid_input_makes_no_call() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        let state = DashboardState::new(vec![p.clone()], vec![], None).with_selection(p.id);
        for (name, value) in [("", "10"), ("Areia", "abc"), ("Areia", "-5"), ("Areia", "0")] {
            let input = ExpenseInput {
                name: name.into(),
                value: value.into(),
                photo: None,
            };
            let err = submit_expense(&s.backend, &state, ExpenseCategory::Labor, input)
                .await
                .unwrap_err();
            assert!(matches!(err, ActionError::InvalidInput(_)), "{name:?} {value:?}");
        }
        assert_eq!(s.backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_failure_is_reported() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        s.backend.sign_in_as(&s.architect);
        let state = load_architect_dashboard(&s.backend, Some(p.id)).await.unwrap();
        let op = format!("POST /projects/{}/expenses/", p.id);
        s.backend.fail_next(&op, ApiError::request(Some(400), "Valor inválido"));

        let input = ExpenseInput {
            name: "Cimento".into(),
            value: "80".into(),
            photo: None,
        };
        let err = submit_expense(&s.backend, &state, ExpenseCategory::RawMaterial, input)
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::Failed(ApiError::request(Some(400), "Valor inválido")));
        assert!(!err.is_session_lost());
        assert!(s.backend.project(p.id).unwrap().expenses.is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_call() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        let e = s
            .backend
            .add_expense(p.id, "Cimento", 80.0, ExpenseCategory::RawMaterial, None)
            .unwrap();
        s.backend.sign_in_as(&s.client);

        let mut asked = None;
        let deleted = delete_expense(
            &s.backend,
            |message| {
                asked = Some(message.to_string());
                false
            },
            e.id,
        )
        .await
        .unwrap();
        assert!(!deleted);
        assert_eq!(asked.as_deref(), Some(CONFIRM_DELETE_EXPENSE));
        assert_eq!(s.backend.call_count(), 0);
        assert_eq!(s.backend.project(p.id).unwrap().expenses.len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        let e = s
            .backend
            .add_expense(p.id, "Cimento", 80.0, ExpenseCategory::RawMaterial, None)
            .unwrap();
        s.backend.sign_in_as(&s.client);

        assert!(delete_expense(&s.backend, |_| true, e.id).await.unwrap());
        assert_eq!(s.backend.calls(), vec![format!("DELETE /expenses/{}", e.id)]);
        assert_eq!(s.backend.project(p.id).unwrap().spent, 0.0);

        // Deleting again reports the backend error
        let err = delete_expense(&s.backend, |_| true, e.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Despesa não encontrada.");
    }

    #[tokio::test]
    async fn test_finalize_project() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        s.backend.sign_in_as(&s.architect);

        let err = finalize_project(&s.backend, never, &DashboardState::default())
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::NoProjectSelected(NO_PROJECT_TO_FINALIZE));

        let state = load_architect_dashboard(&s.backend, Some(p.id)).await.unwrap();
        let declined = finalize_project(&s.backend, |_| false, &state).await.unwrap();
        assert!(declined.is_none());
        assert!(!s.backend.project(p.id).unwrap().is_completed());

        let next = finalize_project(&s.backend, |_| true, &state).await.unwrap().unwrap();
        assert_eq!(next.completed_projects().count(), 1);
        assert_eq!(next.selected_project_id(), Some(p.id));
        assert!(next.selected_project().unwrap().completed_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_reload_is_session_lost() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        s.backend.sign_in_as(&s.architect);
        let state = load_architect_dashboard(&s.backend, Some(p.id)).await.unwrap();
        s.backend.fail_next("GET /projects/", ApiError::request(Some(401), "expirado"));

        let err = finalize_project(&s.backend, |_| true, &state).await.unwrap_err();
        assert!(err.is_session_lost());
        assert_eq!(err.to_string(), DASHBOARD_LOAD_FAILED);
    }

    #[tokio::test]
    async fn test_create_client_and_project() {
        let s = seeded();
        s.backend.sign_in_as(&s.architect);

        let err = create_client(&s.backend, " ", "x", &DashboardState::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidInput(_)));

        let state = create_client(&s.backend, "nova@obra.com", "123", &DashboardState::default())
            .await
            .unwrap();
        assert_eq!(state.clients().len(), 2);
        let new_client = state
            .clients()
            .iter()
            .find(|c| c.email == "nova@obra.com")
            .unwrap()
            .id;

        let err = create_project(&s.backend, "Casa Nova", "50000", None).await.unwrap_err();
        assert_eq!(err, ActionError::InvalidInput("Selecione um cliente.".into()));

        let state = create_project(&s.backend, "Casa Nova", "50.000,00", Some(new_client))
            .await
            .unwrap();
        let project = state.selected_project().unwrap();
        assert_eq!(project.name, "Casa Nova");
        assert_eq!(project.budget, 50_000.0);
        assert_eq!(project.client_id, new_client);
    }

    #[tokio::test]
    async fn test_fetch_report() {
        let s = seeded();
        let p = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        s.backend.sign_in_as(&s.client);
        let bytes = fetch_report(&s.backend, p.id).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_sign_out_resets_session() {
        let s = seeded();
        sign_in(&s.backend, "arq@obra.com", "segredo").await.unwrap();
        let session = sign_out(&s.backend);
        assert_eq!(session, Session::default());
        assert!(!s.backend.has_token());
        assert_eq!(restore_session(&s.backend).await, None);
    }

    #[tokio::test]
    async fn test_reload_follows_role() {
        let s = seeded();
        let a = s.backend.add_project(&s.architect, &s.client, "Casa A", 1000.0);
        let b = s.backend.add_project(&s.architect, &s.client, "Casa B", 1000.0);
        let e = s
            .backend
            .add_expense(b.id, "Areia", 300.0, ExpenseCategory::RawMaterial, None)
            .unwrap();

        s.backend.sign_in_as(&s.architect);
        let architect = Session {
            user: Some(s.architect.clone()),
            dashboard: load_architect_dashboard(&s.backend, Some(a.id)).await.unwrap(),
            ..Session::default()
        };
        let reloaded = reload_session(&s.backend, &architect).await.unwrap();
        assert_eq!(reloaded.view(), ViewId::ArchitectDashboard);
        match reloaded {
            Reloaded::Architect(state) => assert_eq!(state.selected_project_id(), Some(a.id)),
            other => panic!("unexpected reload {other:?}"),
        }

        s.backend.sign_in_as(&s.client);
        let landing = load_client_dashboard(&s.backend).await.unwrap();
        let client = Session {
            user: Some(s.client.clone()),
            client: ClientState::reloaded(landing, Some(b.id)),
            ..Session::default()
        };
        assert!(delete_expense(&s.backend, |_| true, e.id).await.unwrap());
        let reloaded = reload_session(&s.backend, &client).await.unwrap();
        assert_eq!(reloaded.view(), ViewId::ClientDashboard);
        match reloaded {
            Reloaded::Client(state) => {
                let current = state.current().unwrap();
                assert_eq!(current.id, b.id);
                assert_eq!(current.spent, 0.0);
            }
            other => panic!("unexpected reload {other:?}"),
        }
        assert_eq!(s.backend.calls().last().map(String::as_str), Some("GET /projects/"));
    }
}
