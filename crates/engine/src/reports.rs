//! Roll-ups shown on the reports page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BudgetMonth, EngineError, MonthKey, MoneyCents, ResultEngine};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub income: MoneyCents,
    pub expense: MoneyCents,
    pub savings: MoneyCents,
    /// `savings / income × 100`, or 0 without income.
    pub savings_rate_pct: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAverages {
    pub monthly_income: MoneyCents,
    pub monthly_expense: MoneyCents,
    pub monthly_savings: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    pub label: String,
    pub income: MoneyCents,
    pub expense: MoneyCents,
    pub net_savings: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub totals: ReportTotals,
    pub averages: ReportAverages,
    pub monthly_series: Vec<MonthlyPoint>,
    /// Spend per category across all months, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
    pub best_savings_month: Option<MonthlyPoint>,
    pub worst_expense_month: Option<MonthlyPoint>,
    pub top_category: Option<CategoryTotal>,
}

/// Summarizes a list of budget months.
///
/// Highlights pick the first month on ties. Categories with equal totals keep
/// the order in which they first appear.
#[must_use]
pub fn summarize(budgets: &[BudgetMonth]) -> ReportSummary {
    let income: MoneyCents = budgets.iter().map(|m| m.income).sum();
    let expense: MoneyCents = budgets.iter().map(|m| m.expenses).sum();
    let savings = income - expense;
    let savings_rate_pct = if income.is_zero() {
        0.0
    } else {
        savings.cents() as f64 / income.cents() as f64 * 100.0
    };

    let count = budgets.len() as u32;
    let averages = ReportAverages {
        monthly_income: income.divide_rounded(count),
        monthly_expense: expense.divide_rounded(count),
        monthly_savings: savings.divide_rounded(count),
    };

    let monthly_series: Vec<MonthlyPoint> = budgets
        .iter()
        .map(|m| MonthlyPoint {
            month: m.month,
            label: m.label.clone(),
            income: m.income,
            expense: m.expenses,
            net_savings: m.net_savings,
        })
        .collect();

    let best_savings_month = first_max_by(&monthly_series, |p| p.net_savings);
    let worst_expense_month = first_max_by(&monthly_series, |p| p.expense);

    let mut category_breakdown: Vec<CategoryTotal> = Vec::new();
    for category in budgets.iter().flat_map(|m| &m.categories) {
        match category_breakdown
            .iter_mut()
            .find(|entry| entry.category == category.category)
        {
            Some(entry) => entry.total += category.spent,
            None => category_breakdown.push(CategoryTotal {
                category: category.category.clone(),
                total: category.spent,
            }),
        }
    }
    category_breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    let top_category = category_breakdown.first().cloned();

    ReportSummary {
        totals: ReportTotals {
            income,
            expense,
            savings,
            savings_rate_pct,
        },
        averages,
        monthly_series,
        category_breakdown,
        best_savings_month,
        worst_expense_month,
        top_category,
    }
}

fn first_max_by<F>(points: &[MonthlyPoint], key: F) -> Option<MonthlyPoint>
where
    F: Fn(&MonthlyPoint) -> MoneyCents,
{
    points
        .iter()
        .reduce(|best, current| if key(current) > key(best) { current } else { best })
        .cloned()
}

/// Checks a report date range before it is requested.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> ResultEngine<()> {
    if start > end {
        return Err(EngineError::validation("Start date must be before end date."));
    }
    Ok(())
}
