//! # In-memory backend
//!
//! [`MemoryBackend`] implements [`Backend`] over plain collections so controller
//! logic can be exercised without a server. It follows the rules the real
//! backend enforces that the dashboard relies on:
//!
//! - tokens map to accounts; no token means every call fails with 401
//! - architects see the projects they own, clients the projects assigned to them
//! - `spent` is recomputed from the expense list after every change
//! - finalizing twice fails, and only clients may delete expenses
//!
//! Every call is recorded (`"GET /projects/"`, ...) and a failure can be queued
//! for a specific operation with [`MemoryBackend::fail_next`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use store::{MemoryTokenStore, TokenStore};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::models::{
    Expense, ExpenseCategory, ExpenseDraft, NewClient, NewProject, Project, ProjectStatus, Role,
    TokenResponse, User,
};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    projects: Vec<Project>,
    next_id: i64,
    calls: Vec<String>,
    failures: HashMap<String, ApiError>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    tokens: MemoryTokenStore,
}

fn token_for(user_id: i64) -> String {
    format!("memory-token-{user_id}")
}

fn forbidden(message: &str) -> ApiError {
    ApiError::request(Some(403), message)
}

fn not_found(message: &str) -> ApiError {
    ApiError::request(Some(404), message)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only happens after a panic in another test thread.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register an account and return it.
    pub fn add_user(&self, email: &str, password: &str, role: Role) -> User {
        let mut state = self.lock();
        let user = User {
            id: state.next_id(),
            email: email.to_string(),
            role,
        };
        state.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Seed a project directly, bypassing permission checks.
    pub fn add_project(&self, owner: &User, client: &User, name: &str, budget: f64) -> Project {
        let mut state = self.lock();
        let project = Project {
            id: state.next_id(),
            name: name.to_string(),
            budget,
            spent: 0.0,
            status: ProjectStatus::InProgress,
            client_id: client.id,
            owner_id: Some(owner.id),
            created_at: Some(Utc::now()),
            completed_at: None,
            expenses: Vec::new(),
        };
        state.projects.push(project.clone());
        project
    }

    /// Seed an expense directly, bypassing permission checks.
    pub fn add_expense(
        &self,
        project_id: i64,
        name: &str,
        value: f64,
        category: ExpenseCategory,
        created_at: Option<DateTime<Utc>>,
    ) -> Option<Expense> {
        let mut state = self.lock();
        let id = state.next_id();
        let project = state.projects.iter_mut().find(|p| p.id == project_id)?;
        let expense = Expense {
            id,
            name: name.to_string(),
            value,
            category,
            photo_url: None,
            created_at,
            project_id: Some(project_id),
        };
        project.expenses.push(expense.clone());
        project.spent = project.expenses.iter().map(|e| e.value).sum();
        Some(expense)
    }

    /// Mark a project completed without going through the API.
    pub fn complete_project(&self, project_id: i64, completed_at: DateTime<Utc>) {
        let mut state = self.lock();
        if let Some(project) = state.projects.iter_mut().find(|p| p.id == project_id) {
            project.status = ProjectStatus::Completed;
            project.completed_at = Some(completed_at);
        }
    }

    /// Sign `user` in directly, as if a token had been stored earlier.
    pub fn sign_in_as(&self, user: &User) {
        self.tokens.save_token(&token_for(user.id));
    }

    /// Make the next call of `operation` (e.g. `"GET /projects/"`) fail.
    pub fn fail_next(&self, operation: &str, error: ApiError) {
        self.lock().failures.insert(operation.to_string(), error);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn project(&self, project_id: i64) -> Option<Project> {
        self.lock().projects.iter().find(|p| p.id == project_id).cloned()
    }

    fn record(&self, operation: &str) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.calls.push(operation.to_string());
        match state.failures.remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn authenticated(&self) -> Result<User, ApiError> {
        let credentials =
            || ApiError::request(Some(401), "Não foi possível validar as credenciais");
        let token = self.tokens.token().ok_or_else(credentials)?;
        self.lock()
            .accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| token_for(u.id) == token)
            .cloned()
            .ok_or_else(credentials)
    }

    fn architect(&self, message: &str) -> Result<User, ApiError> {
        let user = self.authenticated()?;
        if user.is_architect() {
            Ok(user)
        } else {
            Err(forbidden(message))
        }
    }
}

impl Backend for MemoryBackend {
    fn save_token(&self, token: &str) {
        self.tokens.save_token(token);
    }

    fn clear_token(&self) {
        self.tokens.clear_token();
    }

    fn has_token(&self) -> bool {
        self.tokens.has_token()
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.record("POST /token")?;
        let state = self.lock();
        let account = state
            .accounts
            .iter()
            .find(|a| a.user.email == email && a.password == password)
            .ok_or_else(|| ApiError::Auth("E-mail ou senha incorretos".to_string()))?;
        Ok(TokenResponse {
            access_token: token_for(account.user.id),
            token_type: "bearer".to_string(),
        })
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.record("GET /users/me")?;
        self.authenticated()
    }

    async fn list_clients(&self) -> Result<Vec<User>, ApiError> {
        self.record("GET /users/clients")?;
        self.architect("Acesso não permitido.")?;
        Ok(self
            .lock()
            .accounts
            .iter()
            .filter(|a| a.user.role == Role::Client)
            .map(|a| a.user.clone())
            .collect())
    }

    async fn create_client(&self, client: &NewClient) -> Result<User, ApiError> {
        self.record("POST /users/")?;
        self.architect("Apenas arquitetos podem criar usuários.")?;
        if self.lock().accounts.iter().any(|a| a.user.email == client.email) {
            return Err(ApiError::request(Some(400), "E-mail já registrado."));
        }
        Ok(self.add_user(&client.email, &client.password, client.role))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record("GET /projects/")?;
        let user = self.authenticated()?;
        Ok(self
            .lock()
            .projects
            .iter()
            .filter(|p| match user.role {
                Role::Architect => p.owner_id == Some(user.id),
                Role::Client => p.client_id == user.id,
            })
            .cloned()
            .collect())
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        self.record("POST /projects/")?;
        let owner = self.architect("Apenas arquitetos podem criar projetos.")?;
        let client = self
            .lock()
            .accounts
            .iter()
            .map(|a| a.user.clone())
            .find(|u| u.id == project.client_id && u.role == Role::Client)
            .ok_or_else(|| not_found("Cliente não encontrado."))?;
        Ok(self.add_project(&owner, &client, &project.name, project.budget))
    }

    async fn finalize_project(&self, project_id: i64) -> Result<Project, ApiError> {
        self.record(&format!("PUT /projects/{project_id}/finalize"))?;
        let owner = self.architect("Apenas arquitetos podem finalizar projetos.")?;
        let mut state = self.lock();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| not_found("Projeto não encontrado."))?;
        if project.owner_id != Some(owner.id) {
            return Err(forbidden(
                "Você não tem permissão para finalizar este projeto.",
            ));
        }
        if project.is_completed() {
            return Err(ApiError::request(Some(400), "Projeto já está concluído."));
        }
        project.status = ProjectStatus::Completed;
        project.completed_at = Some(Utc::now());
        Ok(project.clone())
    }

    async fn create_expense(&self, project_id: i64, draft: ExpenseDraft) -> Result<Expense, ApiError> {
        self.record(&format!("POST /projects/{project_id}/expenses/"))?;
        let owner = self.architect("Apenas arquitetos podem adicionar despesas.")?;
        let owned = self
            .project(project_id)
            .is_some_and(|p| p.owner_id == Some(owner.id));
        if !owned {
            return Err(forbidden(
                "Você não tem permissão para adicionar despesas a este projeto.",
            ));
        }
        let photo_url = draft
            .photo
            .as_ref()
            .map(|photo| format!("/uploads/{project_id}_{}", photo.file_name));
        let mut expense = self
            .add_expense(project_id, &draft.name, draft.value, draft.category, Some(Utc::now()))
            .ok_or_else(|| not_found("Projeto não encontrado."))?;
        if photo_url.is_some() {
            let mut state = self.lock();
            if let Some(stored) = state
                .projects
                .iter_mut()
                .flat_map(|p| p.expenses.iter_mut())
                .find(|e| e.id == expense.id)
            {
                stored.photo_url = photo_url.clone();
            }
            expense.photo_url = photo_url;
        }
        Ok(expense)
    }

    async fn delete_expense(&self, expense_id: i64) -> Result<(), ApiError> {
        self.record(&format!("DELETE /expenses/{expense_id}"))?;
        let user = self.authenticated()?;
        if user.role != Role::Client {
            return Err(forbidden("Apenas clientes podem excluir despesas."));
        }
        let mut state = self.lock();
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.expenses.iter().any(|e| e.id == expense_id))
            .ok_or_else(|| not_found("Despesa não encontrada."))?;
        if project.client_id != user.id {
            return Err(forbidden(
                "Você não tem permissão para excluir esta despesa.",
            ));
        }
        project.expenses.retain(|e| e.id != expense_id);
        project.spent = project.expenses.iter().map(|e| e.value).sum();
        Ok(())
    }

    async fn project_report(&self, project_id: i64) -> Result<Vec<u8>, ApiError> {
        self.record(&format!("GET /projects/{project_id}/report"))?;
        let user = self.authenticated()?;
        let project = self
            .project(project_id)
            .ok_or_else(|| not_found("Projeto não encontrado."))?;
        let allowed = match user.role {
            Role::Architect => project.owner_id == Some(user.id),
            Role::Client => project.client_id == user.id,
        };
        if !allowed {
            return Err(forbidden(
                "Você não tem permissão para acessar este relatório.",
            ));
        }
        Ok(format!("%PDF-1.4\n% {}\n", project.name).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (MemoryBackend, User, User) {
        let backend = MemoryBackend::new();
        let architect = backend.add_user("arq@obra.com", "arq123", Role::Architect);
        let client = backend.add_user("cli@obra.com", "cli123", Role::Client);
        (backend, architect, client)
    }

    #[tokio::test]
    async fn test_login_and_current_user() {
        let (backend, architect, _) = seeded();

        let err = backend.login("arq@obra.com", "errada").await.unwrap_err();
        assert_eq!(err, ApiError::Auth("E-mail ou senha incorretos".into()));

        let token = backend.login("arq@obra.com", "arq123").await.unwrap();
        backend.save_token(&token.access_token);
        assert_eq!(backend.current_user().await.unwrap(), architect);

        backend.clear_token();
        let err = backend.current_user().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_projects_are_scoped_by_role() {
        let (backend, architect, client) = seeded();
        let other_client = backend.add_user("outro@obra.com", "x", Role::Client);
        backend.add_project(&architect, &client, "Casa A", 1000.0);
        backend.add_project(&architect, &other_client, "Casa B", 2000.0);

        backend.sign_in_as(&architect);
        assert_eq!(backend.list_projects().await.unwrap().len(), 2);

        backend.sign_in_as(&client);
        let mine = backend.list_projects().await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Casa A");
        assert!(backend.list_clients().await.is_err());
    }

    #[tokio::test]
    async fn test_spent_follows_expenses() {
        let (backend, architect, client) = seeded();
        let project = backend.add_project(&architect, &client, "Casa", 1000.0);

        backend.sign_in_as(&architect);
        let draft = ExpenseDraft {
            name: "Cimento".into(),
            value: 300.0,
            category: ExpenseCategory::RawMaterial,
            photo: None,
        };
        let expense = backend.create_expense(project.id, draft).await.unwrap();
        assert_eq!(backend.project(project.id).unwrap().spent, 300.0);

        // Architects cannot delete
        let err = backend.delete_expense(expense.id).await.unwrap_err();
        assert_eq!(err.status(), Some(403));

        backend.sign_in_as(&client);
        backend.delete_expense(expense.id).await.unwrap();
        assert_eq!(backend.project(project.id).unwrap().spent, 0.0);
    }

    #[tokio::test]
    async fn test_finalize_is_one_way() {
        let (backend, architect, client) = seeded();
        let project = backend.add_project(&architect, &client, "Casa", 1000.0);
        backend.sign_in_as(&architect);

        let done = backend.finalize_project(project.id).await.unwrap();
        assert!(done.is_completed());
        assert!(done.completed_at.is_some());

        let err = backend.finalize_project(project.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Projeto já está concluído.");
    }

    #[tokio::test]
    async fn test_queued_failure_and_call_log() {
        let (backend, architect, _) = seeded();
        backend.sign_in_as(&architect);
        backend.fail_next("GET /projects/", ApiError::request(Some(500), "boom"));

        assert!(backend.list_projects().await.is_err());
        assert!(backend.list_projects().await.is_ok());
        assert_eq!(backend.calls(), vec!["GET /projects/", "GET /projects/"]);
    }
}
