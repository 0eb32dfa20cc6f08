//! Monthly budget aggregation.

use serde::{Deserialize, Serialize};

use crate::{MonthKey, MoneyCents, Transaction};

/// A month shown in the budget view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub month: MonthKey,
    pub label: String,
}

impl MonthWindow {
    /// Window labelled with the month's short name.
    #[must_use]
    pub fn of(month: MonthKey) -> Self {
        Self {
            month,
            label: month.label(),
        }
    }
}

/// Monthly spending limit of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLimit {
    pub category: String,
    pub limit: MoneyCents,
}

/// Months and category limits the budget view is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub months: Vec<MonthWindow>,
    pub category_limits: Vec<CategoryLimit>,
}

impl BudgetConfig {
    /// `count` consecutive months starting at `start`, default category limits.
    #[must_use]
    pub fn starting_at(start: MonthKey, count: u32) -> Self {
        Self {
            months: (0..count)
                .map(|offset| MonthWindow::of(start.add_months(offset as i32)))
                .collect(),
            ..Self::default()
        }
    }
}

impl Default for BudgetConfig {
    /// February to June 2026 with the stock category limits.
    fn default() -> Self {
        let limits = [
            ("Housing", 9_000),
            ("Food", 10_000),
            ("Transport", 2_000),
            ("Utilities", 1_500),
            ("Lifestyle", 2_500),
            ("Debt", 20_000),
            ("Installment", 2_500),
        ];
        let start = MonthKey::new_unchecked(2026, 2);
        Self {
            months: (0..5)
                .map(|offset| MonthWindow::of(start.add_months(offset)))
                .collect(),
            category_limits: limits
                .into_iter()
                .map(|(category, limit)| CategoryLimit {
                    category: category.to_string(),
                    limit: MoneyCents::from_units(limit),
                })
                .collect(),
        }
    }
}

/// Spending state of a category against its limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Normal,
    Warning,
    Danger,
}

impl AlertLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub category: String,
    pub limit: MoneyCents,
    pub spent: MoneyCents,
}

impl BudgetCategory {
    #[must_use]
    pub fn remaining(&self) -> MoneyCents {
        self.limit - self.spent
    }

    /// `Danger` from 100% of the limit, `Warning` from 85%.
    ///
    /// The ratio is rounded half-up to two decimals first; a non-positive
    /// limit is always `Normal`.
    #[must_use]
    pub fn alert_level(&self) -> AlertLevel {
        let limit = i128::from(self.limit.cents());
        if limit <= 0 {
            return AlertLevel::Normal;
        }
        let spent = i128::from(self.spent.cents());
        let doubled = spent * 200;
        let hundredths = if doubled >= 0 {
            (doubled + limit) / (2 * limit)
        } else {
            -((-doubled + limit) / (2 * limit))
        };
        if hundredths >= 100 {
            AlertLevel::Danger
        } else if hundredths >= 85 {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMonth {
    pub month: MonthKey,
    pub label: String,
    pub income: MoneyCents,
    pub expenses: MoneyCents,
    pub net_savings: MoneyCents,
    pub categories: Vec<BudgetCategory>,
}

/// Builds one [`BudgetMonth`] per configured month, in configured order.
///
/// - `income` is `salary_usd × usd_try_rate` for every month; income
///   transactions do not change it.
/// - `expenses` sums the month's expense transactions.
/// - each configured category sums the month's transactions in that category
///   (of any type); categories without transactions report zero.
///
/// Installment transactions are expected to be expanded beforehand.
#[must_use]
pub fn build_budgets(
    salary_usd: MoneyCents,
    usd_try_rate: f64,
    transactions: &[Transaction],
    config: &BudgetConfig,
) -> Vec<BudgetMonth> {
    let income = salary_usd.scale(usd_try_rate);

    config
        .months
        .iter()
        .map(|window| {
            let month_transactions: Vec<&Transaction> = transactions
                .iter()
                .filter(|tx| window.month.contains(tx.date))
                .collect();

            let expenses: MoneyCents = month_transactions
                .iter()
                .filter(|tx| tx.is_expense())
                .map(|tx| tx.amount)
                .sum();

            let categories = config
                .category_limits
                .iter()
                .map(|limit| BudgetCategory {
                    category: limit.category.clone(),
                    limit: limit.limit,
                    spent: month_transactions
                        .iter()
                        .filter(|tx| tx.category == limit.category)
                        .map(|tx| tx.amount)
                        .sum(),
                })
                .collect();

            BudgetMonth {
                month: window.month,
                label: window.label.clone(),
                income,
                expenses,
                net_savings: income - expenses,
                categories,
            }
        })
        .collect()
}
