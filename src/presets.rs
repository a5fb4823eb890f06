use crate::schema::{Category, ExpenseDraft, Period};
use crate::utils::normalize_to_days;

/// A ready-made expense the user can add with one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpensePreset {
    pub name: &'static str,
    pub cost: f64,
    pub lifespan: f64,
    pub period: Period,
    pub category: Category,
}

impl ExpensePreset {
    pub fn lifespan_days(&self) -> f64 {
        normalize_to_days(self.lifespan, self.period)
    }

    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft::new(self.name, self.cost, self.lifespan, self.period)
            .with_category(self.category)
    }
}

/// A lifespan shortcut offered next to the lifespan input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifespanPreset {
    pub label: &'static str,
    pub value: f64,
    pub period: Period,
}

pub const EXPENSE_PRESETS: [ExpensePreset; 7] = [
    ExpensePreset {
        name: "Хлеб",
        cost: 60.0,
        lifespan: 3.0,
        period: Period::Days,
        category: Category::Food,
    },
    ExpensePreset {
        name: "Молоко",
        cost: 90.0,
        lifespan: 5.0,
        period: Period::Days,
        category: Category::Food,
    },
    ExpensePreset {
        name: "Зубная щётка",
        cost: 200.0,
        lifespan: 3.0,
        period: Period::Months,
        category: Category::Household,
    },
    ExpensePreset {
        name: "Стрижка",
        cost: 1500.0,
        lifespan: 1.0,
        period: Period::Months,
        category: Category::Other,
    },
    ExpensePreset {
        name: "Кроссовки",
        cost: 8000.0,
        lifespan: 1.0,
        period: Period::Years,
        category: Category::Clothing,
    },
    ExpensePreset {
        name: "Смартфон",
        cost: 50000.0,
        lifespan: 2.0,
        period: Period::Years,
        category: Category::Tech,
    },
    ExpensePreset {
        name: "Ноутбук",
        cost: 80000.0,
        lifespan: 5.0,
        period: Period::Years,
        category: Category::Tech,
    },
];

pub const LIFESPAN_PRESETS: [LifespanPreset; 9] = [
    LifespanPreset {
        label: "3 дня",
        value: 3.0,
        period: Period::Days,
    },
    LifespanPreset {
        label: "неделя",
        value: 7.0,
        period: Period::Days,
    },
    LifespanPreset {
        label: "месяц",
        value: 1.0,
        period: Period::Months,
    },
    LifespanPreset {
        label: "3 месяца",
        value: 3.0,
        period: Period::Months,
    },
    LifespanPreset {
        label: "6 месяцев",
        value: 6.0,
        period: Period::Months,
    },
    LifespanPreset {
        label: "год",
        value: 1.0,
        period: Period::Years,
    },
    LifespanPreset {
        label: "2 года",
        value: 2.0,
        period: Period::Years,
    },
    LifespanPreset {
        label: "5 лет",
        value: 5.0,
        period: Period::Years,
    },
    LifespanPreset {
        label: "10 лет",
        value: 10.0,
        period: Period::Years,
    },
];
