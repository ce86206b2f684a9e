//! # UI crate: dashboard state, controller actions and components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`router`] | [`ViewRouter`]: exactly one of the five top-level views is visible |
//! | [`state`] | `DashboardState` (architect) and `ClientState` snapshots |
//! | [`actions`] | Controller logic behind every handler, generic over [`api::Backend`] |
//! | [`metrics`] | Remaining tone, budget progress, summary and completion figures |
//! | [`analytics`] | Client statistics, timeline, filter and notice cards |
//! | [`category`] | Per-category theme and the category form selector |
//! | [`format`] | `R$` amounts, percentages, dates, typed amount parsing |
//! | [`notifications`] | Transient toasts |
//! | [`browser`] | `confirm`, new tabs, PDF blobs, page origin |
//! | [`views`] | Dioxus components, with [`AppShell`] at the top |

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::FaWhatsapp;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

pub mod actions;
pub mod analytics;
pub mod browser;
pub mod category;
pub mod format;
pub mod metrics;
pub mod router;
pub mod state;

pub mod notifications;
pub use notifications::{show_toast, use_toasts, LogLevel, ToastHost, Toasts};

mod session;
pub use session::{use_app, AppContext, Client, LogoutButton, SessionProvider};

pub mod views;
pub use views::AppShell;

pub use router::{ViewId, ViewRouter};
pub use state::{ClientLanding, ClientState, DashboardState};
