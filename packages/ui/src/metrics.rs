//! Budget figures shown for a project: remaining amount and its tone, the
//! progress bar, and the architect's summary cards.

use api::Project;
use chrono::{DateTime, Utc};

/// Share of the budget below which the remaining amount is flagged.
pub const LOW_REMAINING_SHARE: f64 = 0.25;
/// Spent percentage above which a project is "near the limit".
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;
/// Radius of the circular progress indicator, in SVG units.
pub const CIRCLE_RADIUS: f64 = 30.0;

/// Colour coding of the remaining budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingTone {
    /// Over budget.
    Negative,
    /// Less than a quarter of the budget left.
    Low,
    Healthy,
}

impl RemainingTone {
    pub fn of(budget: f64, remaining: f64) -> Self {
        if remaining < 0.0 {
            RemainingTone::Negative
        } else if remaining < LOW_REMAINING_SHARE * budget {
            RemainingTone::Low
        } else {
            RemainingTone::Healthy
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            RemainingTone::Negative => "text-red-600",
            RemainingTone::Low => "text-yellow-500",
            RemainingTone::Healthy => "text-green-600",
        }
    }

    /// Background of the client's "remaining" card.
    pub fn card_class(&self) -> &'static str {
        match self {
            RemainingTone::Negative => "bg-red-600",
            RemainingTone::Low => "bg-orange-600",
            RemainingTone::Healthy => "bg-gradient-to-r from-purple-500 to-purple-600",
        }
    }

    /// Status line under the client's "remaining" card.
    pub fn client_label(&self) -> &'static str {
        match self {
            RemainingTone::Negative => "Orçamento estourado",
            RemainingTone::Low => "Atenção: Saldo baixo",
            RemainingTone::Healthy => "Dentro do orçamento",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Exceeded,
    Exhausted,
    NearLimit,
    InProgress,
}

impl ProgressStatus {
    /// Status for an unclamped spent percentage.
    pub fn of(raw_percentage: f64) -> Self {
        if raw_percentage > 100.0 {
            ProgressStatus::Exceeded
        } else if (raw_percentage - 100.0).abs() < f64::EPSILON * 100.0 {
            ProgressStatus::Exhausted
        } else if raw_percentage > NEAR_LIMIT_PERCENT {
            ProgressStatus::NearLimit
        } else {
            ProgressStatus::InProgress
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressStatus::Exceeded => "Atenção: Orçamento Estourado",
            ProgressStatus::Exhausted => "Orçamento Esgotado",
            ProgressStatus::NearLimit => "Atenção: Quase no limite",
            ProgressStatus::InProgress => "Em Andamento",
        }
    }

    pub fn text_class(&self) -> &'static str {
        match self {
            ProgressStatus::Exceeded => "text-red-600",
            ProgressStatus::NearLimit => "text-yellow-600",
            ProgressStatus::Exhausted | ProgressStatus::InProgress => "text-green-600",
        }
    }

    pub fn bar_class(&self) -> &'static str {
        match self {
            ProgressStatus::Exceeded => "progress-fill progress-over",
            _ => "progress-fill",
        }
    }
}

/// Spent share of a budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    /// `spent / budget * 100`, not clamped.
    pub raw_percentage: f64,
    /// `raw_percentage` clamped to `0..=100`, the bar width.
    pub percentage: f64,
    pub status: ProgressStatus,
}

impl BudgetProgress {
    pub fn of(budget: f64, spent: f64) -> Self {
        let raw_percentage = if budget > 0.0 {
            spent / budget * 100.0
        } else if spent > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };
        Self {
            raw_percentage,
            percentage: raw_percentage.clamp(0.0, 100.0),
            status: ProgressStatus::of(raw_percentage),
        }
    }

    /// Spent percentage for text. A project without a budget reads 0.
    pub fn spent_share(&self) -> f64 {
        if self.raw_percentage.is_finite() {
            self.raw_percentage
        } else {
            0.0
        }
    }

    /// Percentage printed under the bar, clamped like its width.
    pub fn caption(&self) -> String {
        crate::format::format_percent(self.percentage, 1)
    }

    pub fn width_style(&self) -> String {
        format!("width: {:.2}%", self.percentage)
    }

    pub fn circumference() -> f64 {
        2.0 * std::f64::consts::PI * CIRCLE_RADIUS
    }

    /// `stroke-dashoffset` of the circular indicator.
    pub fn circle_offset(&self) -> f64 {
        let circumference = Self::circumference();
        circumference - self.percentage / 100.0 * circumference
    }
}

/// Everything the detail panels show for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFigures {
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub tone: RemainingTone,
    pub progress: BudgetProgress,
    pub expense_count: usize,
    /// Expense launch and finalize are offered only while in progress.
    pub editable: bool,
}

impl From<&Project> for ProjectFigures {
    fn from(project: &Project) -> Self {
        let remaining = project.remaining();
        Self {
            budget: project.budget,
            spent: project.spent,
            remaining,
            tone: RemainingTone::of(project.budget, remaining),
            progress: BudgetProgress::of(project.budget, project.spent),
            expense_count: project.expenses.len(),
            editable: !project.is_completed(),
        }
    }
}

/// The architect's summary cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_invested: f64,
    pub clients: usize,
}

/// Outcome of a finished project.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub remaining: f64,
    /// Remaining over budget, in percent. Negative for an overrun.
    pub difference_percentage: f64,
    pub duration_days: Option<i64>,
}

impl CompletionSummary {
    pub fn of(project: &Project) -> Self {
        let remaining = project.remaining();
        let difference_percentage = if project.budget > 0.0 {
            remaining / project.budget * 100.0
        } else {
            0.0
        };
        let duration_days = match (project.created_at, project.completed_at) {
            (Some(start), Some(end)) => Some(ceil_days(start, end).abs()),
            _ => None,
        };
        Self {
            remaining,
            difference_percentage,
            duration_days,
        }
    }

    pub fn saved(&self) -> bool {
        self.remaining >= 0.0
    }

    /// `"Economia: R$ 150,00"` or `"Estouro: R$ 200,00"`.
    pub fn outcome_label(&self) -> String {
        let amount = crate::format::format_brl(self.remaining.abs());
        if self.saved() {
            format!("Economia: {amount}")
        } else {
            format!("Estouro: {amount}")
        }
    }

    pub fn percentage_label(&self) -> String {
        let kind = if self.saved() { "economia" } else { "estouro" };
        format!("{:.1}% {kind}", self.difference_percentage.abs())
    }

    pub fn duration_label(&self) -> String {
        match self.duration_days {
            Some(days) => format!("{days} dias"),
            None => "N/A".to_string(),
        }
    }
}

/// Whole days from `start` to `end`, rounded up.
pub fn ceil_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    const DAY_MS: i64 = 86_400_000;
    let ms = (end - start).num_milliseconds();
    ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ProjectStatus;
    use chrono::{Duration, TimeZone};

    fn project(budget: f64, spent: f64) -> Project {
        Project {
            id: 1,
            name: "Casa".into(),
            budget,
            spent,
            status: ProjectStatus::InProgress,
            client_id: 2,
            owner_id: Some(1),
            created_at: None,
            completed_at: None,
            expenses: vec![],
        }
    }

    #[test]
    fn test_remaining_tone_boundaries() {
        assert_eq!(RemainingTone::of(1000.0, -0.01), RemainingTone::Negative);
        assert_eq!(RemainingTone::of(1000.0, 0.0), RemainingTone::Low);
        assert_eq!(RemainingTone::of(1000.0, 249.99), RemainingTone::Low);
        assert_eq!(RemainingTone::of(1000.0, 250.0), RemainingTone::Healthy);
        assert_eq!(RemainingTone::of(1000.0, 1000.0), RemainingTone::Healthy);
    }

    #[test]
    fn test_near_limit_project() {
        let figures = ProjectFigures::from(&project(1000.0, 850.0));
        assert_eq!(figures.remaining, 150.0);
        assert_eq!(figures.tone, RemainingTone::Low);
        assert_eq!(figures.tone.text_class(), "text-yellow-500");
        assert!((figures.progress.percentage - 85.0).abs() < 1e-9);
        assert_eq!(figures.progress.status, ProgressStatus::NearLimit);
    }

    #[test]
    fn test_exceeded_project_is_clamped() {
        let figures = ProjectFigures::from(&project(1000.0, 1200.0));
        assert_eq!(figures.remaining, -200.0);
        assert_eq!(figures.tone, RemainingTone::Negative);
        assert_eq!(figures.tone.text_class(), "text-red-600");
        assert_eq!(figures.progress.percentage, 100.0);
        assert!((figures.progress.raw_percentage - 120.0).abs() < 1e-9);
        assert_eq!(figures.progress.status, ProgressStatus::Exceeded);
        assert_eq!(figures.progress.caption(), "100.0%");
        assert!((figures.progress.spent_share() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_status_labels_reachable() {
        assert_eq!(BudgetProgress::of(1000.0, 1000.0).status, ProgressStatus::Exhausted);
        assert_eq!(BudgetProgress::of(1000.0, 800.0).status, ProgressStatus::InProgress);
        assert_eq!(BudgetProgress::of(1000.0, 800.5).status, ProgressStatus::NearLimit);
        assert_eq!(BudgetProgress::of(1000.0, 0.0).status, ProgressStatus::InProgress);
    }

    #[test]
    fn test_zero_budget() {
        let empty = BudgetProgress::of(0.0, 0.0);
        assert_eq!(empty.percentage, 0.0);
        assert_eq!(empty.status, ProgressStatus::InProgress);

        let spent = BudgetProgress::of(0.0, 10.0);
        assert_eq!(spent.percentage, 100.0);
        assert_eq!(spent.status, ProgressStatus::Exceeded);
        assert_eq!(spent.spent_share(), 0.0);
        assert_eq!(spent.caption(), "100.0%");
    }

    #[test]
    fn test_circle_offset() {
        let full = BudgetProgress::of(100.0, 100.0);
        assert!(full.circle_offset().abs() < 1e-9);
        let none = BudgetProgress::of(100.0, 0.0);
        assert!((none.circle_offset() - BudgetProgress::circumference()).abs() < 1e-9);
    }

    #[test]
    fn test_completed_projects_are_not_editable() {
        let mut finished = project(1000.0, 400.0);
        assert!(ProjectFigures::from(&finished).editable);
        finished.status = ProjectStatus::Completed;
        assert!(!ProjectFigures::from(&finished).editable);
    }

    #[test]
    fn test_completion_summary() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut finished = project(1000.0, 850.0);
        finished.created_at = Some(start);
        finished.completed_at = Some(start + Duration::days(30) + Duration::hours(2));

        let summary = CompletionSummary::of(&finished);
        assert!(summary.saved());
        assert_eq!(summary.outcome_label(), "Economia: R$ 150,00");
        assert_eq!(summary.percentage_label(), "15.0% economia");
        assert_eq!(summary.duration_label(), "31 dias");

        finished.spent = 1200.0;
        finished.completed_at = None;
        let summary = CompletionSummary::of(&finished);
        assert_eq!(summary.outcome_label(), "Estouro: R$ 200,00");
        assert_eq!(summary.percentage_label(), "20.0% estouro");
        assert_eq!(summary.duration_label(), "N/A");
    }

    #[test]
    fn test_ceil_days() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ceil_days(start, start), 0);
        assert_eq!(ceil_days(start, start + Duration::seconds(1)), 1);
        assert_eq!(ceil_days(start, start + Duration::days(2)), 2);
    }
}
