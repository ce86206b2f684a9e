//! Per-category presentation and the category-specific expense forms.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`theme`] | Badge, timeline and gradient classes plus an icon for every category, `Other` included |
//! | [`form_copy`] | Labels and placeholders of the form for a category |
//! | [`CategoryForms`] | Which of the three forms is visible; exactly one at a time |

use api::ExpenseCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTheme {
    pub badge: &'static str,
    pub timeline: &'static str,
    pub gradient: &'static str,
    pub icon: &'static str,
}

pub fn theme(category: &ExpenseCategory) -> CategoryTheme {
    match category {
        ExpenseCategory::RawMaterial => CategoryTheme {
            badge: "bg-blue-100 text-blue-800",
            timeline: "timeline-blue",
            gradient: "from-blue-500 to-blue-600",
            icon: "🧱",
        },
        ExpenseCategory::Labor => CategoryTheme {
            badge: "bg-green-100 text-green-800",
            timeline: "timeline-green",
            gradient: "from-green-500 to-green-600",
            icon: "👷",
        },
        ExpenseCategory::Miscellaneous => CategoryTheme {
            badge: "bg-yellow-100 text-yellow-800",
            timeline: "timeline-yellow",
            gradient: "from-yellow-500 to-yellow-600",
            icon: "📦",
        },
        ExpenseCategory::Other(_) => CategoryTheme {
            badge: "bg-gray-100 text-gray-800",
            timeline: "timeline-gray",
            gradient: "from-gray-500 to-gray-600",
            icon: "📄",
        },
    }
}

/// Value of the category radio input.
pub fn radio_value(category: &ExpenseCategory) -> &'static str {
    match category {
        ExpenseCategory::RawMaterial => "material",
        ExpenseCategory::Labor => "labor",
        ExpenseCategory::Miscellaneous => "misc",
        ExpenseCategory::Other(_) => "other",
    }
}

pub fn from_radio_value(value: &str) -> Option<ExpenseCategory> {
    ExpenseCategory::ALL
        .into_iter()
        .find(|c| radio_value(c) == value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCopy {
    pub title: &'static str,
    pub name_label: &'static str,
    pub name_placeholder: &'static str,
    pub value_label: &'static str,
    pub submit_label: &'static str,
}

pub fn form_copy(category: &ExpenseCategory) -> FormCopy {
    match category {
        ExpenseCategory::RawMaterial => FormCopy {
            title: "Nova compra de material",
            name_label: "Material",
            name_placeholder: "Ex: Cimento, areia, tijolos",
            value_label: "Valor da compra (R$)",
            submit_label: "Registrar material",
        },
        ExpenseCategory::Labor => FormCopy {
            title: "Novo pagamento de mão de obra",
            name_label: "Serviço / profissional",
            name_placeholder: "Ex: Pedreiro, eletricista",
            value_label: "Valor do pagamento (R$)",
            submit_label: "Registrar pagamento",
        },
        ExpenseCategory::Miscellaneous | ExpenseCategory::Other(_) => FormCopy {
            title: "Novo custo variado",
            name_label: "Descrição",
            name_placeholder: "Ex: Frete, aluguel de caçamba",
            value_label: "Valor (R$)",
            submit_label: "Registrar custo",
        },
    }
}

/// The three category forms, of which exactly one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForms {
    active: ExpenseCategory,
}

impl Default for CategoryForms {
    fn default() -> Self {
        Self {
            active: ExpenseCategory::RawMaterial,
        }
    }
}

impl CategoryForms {
    pub fn active(&self) -> &ExpenseCategory {
        &self.active
    }

    pub fn is_visible(&self, category: &ExpenseCategory) -> bool {
        &self.active == category
    }

    /// Show the form for `category`. Unknown categories have no form and
    /// leave the selection unchanged; returns whether it was applied.
    pub fn select(&mut self, category: ExpenseCategory) -> bool {
        if matches!(category, ExpenseCategory::Other(_)) {
            return false;
        }
        self.active = category;
        true
    }

    pub fn select_radio(&mut self, value: &str) -> bool {
        match from_radio_value(value) {
            Some(category) => self.select(category),
            None => false,
        }
    }

    /// Forms currently visible. Always exactly one.
    pub fn visible(&self) -> impl Iterator<Item = ExpenseCategory> + '_ {
        ExpenseCategory::ALL
            .into_iter()
            .filter(|c| self.is_visible(c))
    }
}
