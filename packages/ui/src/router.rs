//! Top-level view selection.
//!
//! The dashboard has five mutually exclusive screens. [`ViewRouter`] holds the
//! one that is visible; the app shell renders only that screen, so two views can
//! never be on screen together. Callers make sure the target view's data is
//! loaded before they switch.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewId {
    #[default]
    Login,
    ArchitectDashboard,
    ClientDashboard,
    CompletedClient,
    ClientProjectSelection,
}

impl ViewId {
    pub const ALL: [ViewId; 5] = [
        ViewId::Login,
        ViewId::ArchitectDashboard,
        ViewId::ClientDashboard,
        ViewId::CompletedClient,
        ViewId::ClientProjectSelection,
    ];

    /// DOM id of the view's container.
    pub fn element_id(&self) -> &'static str {
        match self {
            ViewId::Login => "login-view",
            ViewId::ArchitectDashboard => "architect-view",
            ViewId::ClientDashboard => "client-view",
            ViewId::CompletedClient => "completed-client-view",
            ViewId::ClientProjectSelection => "client-project-selection-view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewRouter {
    current: ViewId,
}

impl ViewRouter {
    pub fn new(initial: ViewId) -> Self {
        Self { current: initial }
    }

    /// Hide whatever is visible and reveal `view`.
    pub fn show(&mut self, view: ViewId) {
        if self.current != view {
            tracing::debug!("view {:?} -> {:?}", self.current, view);
        }
        self.current = view;
    }

    pub fn current(&self) -> ViewId {
        self.current
    }

    pub fn is_visible(&self, view: ViewId) -> bool {
        self.current == view
    }

    /// All views that are currently visible. Always exactly one.
    pub fn visible(&self) -> impl Iterator<Item = ViewId> + '_ {
        ViewId::ALL.into_iter().filter(|v| self.is_visible(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_login() {
        let router = ViewRouter::default();
        assert_eq!(router.current(), ViewId::Login);
        assert_eq!(router.visible().collect::<Vec<_>>(), vec![ViewId::Login]);
    }

    #[test]
    fn test_exactly_one_view_after_any_show() {
        let mut router = ViewRouter::default();
        // Every transition, including showing the current view again
        for from in ViewId::ALL {
            for to in ViewId::ALL {
                router.show(from);
                router.show(to);
                let visible: Vec<_> = router.visible().collect();
                assert_eq!(visible, vec![to], "after {from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn test_element_ids_are_distinct() {
        let mut ids: Vec<_> = ViewId::ALL.iter().map(|v| v.element_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
