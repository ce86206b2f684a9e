//! Session state snapshots held by the app context.
//!
//! Both types are plain values: loaders build a fresh snapshot and the context
//! swaps it in, so components only ever see a consistent state.

use api::{ExpenseCategory, Project, User};

use crate::metrics::DashboardSummary;
use crate::router::ViewId;

/// What the architect dashboard shows.
///
/// Active and completed projects are filters over `projects`, evaluated on
/// every read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    projects: Vec<Project>,
    clients: Vec<User>,
    selected_project_id: Option<i64>,
}

impl DashboardState {
    /// Build a snapshot. `selected` is kept only if that project is present.
    pub fn new(projects: Vec<Project>, clients: Vec<User>, selected: Option<i64>) -> Self {
        let mut state = Self {
            projects,
            clients,
            selected_project_id: None,
        };
        if let Some(id) = selected {
            state.select(id);
        }
        state
    }

    pub fn all_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn active_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| !p.is_completed())
    }

    pub fn completed_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_completed())
    }

    pub fn clients(&self) -> &[User] {
        &self.clients
    }

    pub fn client(&self, client_id: i64) -> Option<&User> {
        self.clients.iter().find(|c| c.id == client_id)
    }

    pub fn project(&self, project_id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn selected_project_id(&self) -> Option<i64> {
        self.selected_project_id
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project_id.and_then(|id| self.project(id))
    }

    /// Open the details of `project_id`. Unknown ids are ignored.
    pub fn select(&mut self, project_id: i64) -> Option<&Project> {
        if self.project(project_id).is_none() {
            tracing::debug!("project {} not loaded, selection unchanged", project_id);
            return None;
        }
        self.selected_project_id = Some(project_id);
        self.project(project_id)
    }

    pub fn with_selection(mut self, project_id: i64) -> Self {
        self.select(project_id);
        self
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            total_projects: self.projects.len(),
            active_projects: self.active_projects().count(),
            completed_projects: self.completed_projects().count(),
            total_invested: self.projects.iter().map(|p| p.spent).sum(),
            clients: self.clients.len(),
        }
    }
}

/// Where a client lands after loading their projects.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientLanding {
    Empty,
    Single(Project),
    Choose(Vec<Project>),
}

impl ClientLanding {
    pub fn from_projects(mut projects: Vec<Project>) -> Self {
        match projects.len() {
            0 => ClientLanding::Empty,
            1 => match projects.pop() {
                Some(project) => ClientLanding::Single(project),
                None => ClientLanding::Empty,
            },
            _ => ClientLanding::Choose(projects),
        }
    }

    pub fn view(&self) -> ViewId {
        match self {
            ClientLanding::Empty => ViewId::ClientDashboard,
            ClientLanding::Single(project) => detail_view_for(project),
            ClientLanding::Choose(_) => ViewId::ClientProjectSelection,
        }
    }
}

/// Client view for one project, by status.
pub fn detail_view_for(project: &Project) -> ViewId {
    if project.is_completed() {
        ViewId::CompletedClient
    } else {
        ViewId::ClientDashboard
    }
}

/// What the client views show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    projects: Vec<Project>,
    current: Option<Project>,
    filter: Option<ExpenseCategory>,
}

impl ClientState {
    pub fn from_landing(landing: ClientLanding) -> Self {
        match landing {
            ClientLanding::Empty => Self::default(),
            ClientLanding::Single(project) => Self {
                projects: vec![project.clone()],
                current: Some(project),
                filter: None,
            },
            ClientLanding::Choose(projects) => Self {
                projects,
                current: None,
                filter: None,
            },
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    /// Snapshot after a reload. `current` stays open while it is still listed.
    pub fn reloaded(landing: ClientLanding, current: Option<i64>) -> Self {
        let mut state = Self::from_landing(landing);
        if let Some(id) = current {
            state.open(id);
        }
        state
    }

    /// Opening a project resets the category filter.
    pub fn open(&mut self, project_id: i64) -> Option<&Project> {
        let project = self.projects.iter().find(|p| p.id == project_id)?.clone();
        self.current = Some(project);
        self.filter = None;
        self.current.as_ref()
    }

    pub fn close(&mut self) {
        self.current = None;
        self.filter = None;
    }

    /// More than one project to go back to.
    pub fn can_choose(&self) -> bool {
        self.projects.len() > 1
    }

    pub fn filter(&self) -> Option<&ExpenseCategory> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Option<ExpenseCategory>) {
        self.filter = filter;
    }

    /// View that shows this state.
    pub fn view(&self) -> ViewId {
        match (&self.current, self.can_choose()) {
            (Some(project), _) => detail_view_for(project),
            (None, true) => ViewId::ClientProjectSelection,
            (None, false) => ViewId::ClientDashboard,
        }
    }
}

/// What the context holds for the signed-in user, token aside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub dashboard: DashboardState,
    pub client: ClientState,
}

impl Session {
    pub fn is_architect(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_architect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ProjectStatus, Role};

    fn project(id: i64, status: ProjectStatus, spent: f64) -> Project {
        Project {
            id,
            name: format!("Obra {id}"),
            budget: 1000.0,
            spent,
            status,
            client_id: 10,
            owner_id: Some(1),
            created_at: None,
            completed_at: None,
            expenses: vec![],
        }
    }

    fn mixed() -> Vec<Project> {
        vec![
            project(1, ProjectStatus::InProgress, 100.0),
            project(2, ProjectStatus::Completed, 900.0),
            project(3, ProjectStatus::InProgress, 50.0),
        ]
    }

    #[test]
    fn test_partition_is_complete_without_overlap() {
        let state = DashboardState::new(mixed(), vec![], None);
        let active: Vec<i64> = state.active_projects().map(|p| p.id).collect();
        let completed: Vec<i64> = state.completed_projects().map(|p| p.id).collect();
        assert_eq!(active, vec![1, 3]);
        assert_eq!(completed, vec![2]);

        let mut union: Vec<i64> = active.iter().chain(&completed).copied().collect();
        union.sort();
        let all: Vec<i64> = state.all_projects().iter().map(|p| p.id).collect();
        assert_eq!(union, all);
        assert!(active.iter().all(|id| !completed.contains(id)));
    }

    #[test]
    fn test_summary() {
        let clients = vec![User {
            id: 10,
            email: "cliente@obra.com".into(),
            role: Role::Client,
        }];
        let summary = DashboardState::new(mixed(), clients, None).summary();
        assert_eq!(summary.total_projects, 3);
        assert_eq!(summary.active_projects, 2);
        assert_eq!(summary.completed_projects, 1);
        assert_eq!(summary.total_invested, 1050.0);
        assert_eq!(summary.clients, 1);
    }

    #[test]
    fn test_select_missing_project_is_noop() {
        let mut state = DashboardState::new(mixed(), vec![], Some(3));
        assert_eq!(state.selected_project_id(), Some(3));
        assert!(state.select(99).is_none());
        assert_eq!(state.selected_project_id(), Some(3));
        assert_eq!(state.select(1).map(|p| p.id), Some(1));
    }

    #[test]
    fn test_stale_selection_is_dropped() {
        let state = DashboardState::new(mixed(), vec![], Some(42));
        assert_eq!(state.selected_project_id(), None);
        assert!(state.selected_project().is_none());
    }

    #[test]
    fn test_client_landing() {
        assert_eq!(ClientLanding::from_projects(vec![]), ClientLanding::Empty);
        assert_eq!(ClientLanding::Empty.view(), ViewId::ClientDashboard);

        let single = ClientLanding::from_projects(vec![project(2, ProjectStatus::Completed, 0.0)]);
        assert_eq!(single.view(), ViewId::CompletedClient);
        let single = ClientLanding::from_projects(vec![project(1, ProjectStatus::InProgress, 0.0)]);
        assert_eq!(single.view(), ViewId::ClientDashboard);

        let choose = ClientLanding::from_projects(mixed());
        assert_eq!(choose.view(), ViewId::ClientProjectSelection);
    }

    #[test]
    fn test_client_state_navigation() {
        let mut state = ClientState::from_landing(ClientLanding::from_projects(mixed()));
        assert!(state.current().is_none());
        assert!(state.can_choose());
        assert_eq!(state.view(), ViewId::ClientProjectSelection);

        state.set_filter(Some(ExpenseCategory::Labor));
        assert_eq!(state.open(2).map(|p| p.id), Some(2));
        assert_eq!(state.view(), ViewId::CompletedClient);
        assert!(state.filter().is_none());

        assert!(state.open(99).is_none());
        assert_eq!(state.current().map(|p| p.id), Some(2));

        state.close();
        assert_eq!(state.view(), ViewId::ClientProjectSelection);
    }

    #[test]
    fn test_client_reload_keeps_open_project() {
        let mixed = mixed();
        let state = ClientState::reloaded(ClientLanding::from_projects(mixed.clone()), Some(3));
        assert_eq!(state.current().map(|p| p.id), Some(3));
        assert_eq!(state.view(), ViewId::ClientDashboard);

        let gone = ClientState::reloaded(ClientLanding::from_projects(mixed), Some(42));
        assert!(gone.current().is_none());
        assert_eq!(gone.view(), ViewId::ClientProjectSelection);

        let fresh = ClientState::reloaded(ClientLanding::Empty, Some(3));
        assert_eq!(fresh, ClientState::default());
    }

    #[test]
    fn test_session_role() {
        let mut session = Session::default();
        assert!(!session.is_architect());
        session.user = Some(User {
            id: 1,
            email: "arq@obra.com".into(),
            role: Role::Architect,
        });
        assert!(session.is_architect());
    }
}
