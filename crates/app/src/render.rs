//! Plain-text views of command results.

use api_types::report::ReportSummaryView;
use engine::{
    AlertLevel, BudgetMonth, Currency, InvestmentAsset, MoneyCents, PortfolioTotals,
    ReportSummary, Transaction, TransactionType, format_currency, format_number, format_percent,
};
use serde::Serialize;

use crate::error::Result;

/// A command result, printable as text or JSON.
#[derive(Debug)]
pub struct Rendered {
    pub text: String,
    pub json: serde_json::Value,
}

impl Rendered {
    pub fn new<T: Serialize + ?Sized>(value: &T, text: String) -> Result<Self> {
        Ok(Self {
            text,
            json: serde_json::to_value(value)?,
        })
    }

    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            json: serde_json::json!({ "message": text }),
            text,
        }
    }
}

fn lira(amount: MoneyCents) -> String {
    format_currency(amount.to_major(), Currency::Try)
}

fn lira_f64(amount: f64) -> String {
    format_currency(amount, Currency::Try)
}

pub fn budgets(months: &[BudgetMonth]) -> String {
    let mut lines = Vec::new();
    for month in months {
        lines.push(format!(
            "{} {}  income {}  expenses {}  savings {}",
            month.label,
            month.month,
            lira(month.income),
            lira(month.expenses),
            lira(month.net_savings)
        ));
        for category in &month.categories {
            let alert = match category.alert_level() {
                AlertLevel::Normal => String::new(),
                level => format!("  [{}]", level.as_str()),
            };
            lines.push(format!(
                "  {:<12} {} / {}{alert}",
                category.category,
                lira(category.spent),
                lira(category.limit)
            ));
        }
    }
    lines.join("\n")
}

pub fn report(summary: &ReportSummary) -> String {
    let totals = &summary.totals;
    let averages = &summary.averages;
    let mut lines = vec![
        format!(
            "Income {}  Expense {}  Savings {} ({:.1}%)",
            lira(totals.income),
            lira(totals.expense),
            lira(totals.savings),
            totals.savings_rate_pct
        ),
        format!(
            "Monthly average: income {}  expense {}  savings {}",
            lira(averages.monthly_income),
            lira(averages.monthly_expense),
            lira(averages.monthly_savings)
        ),
    ];
    if let Some(best) = &summary.best_savings_month {
        lines.push(format!("Best savings month: {} ({})", best.label, lira(best.net_savings)));
    }
    if let Some(worst) = &summary.worst_expense_month {
        lines.push(format!("Highest expense month: {} ({})", worst.label, lira(worst.expense)));
    }
    lines.push("Spending by category:".to_string());
    for item in &summary.category_breakdown {
        lines.push(format!("  {:<12} {}", item.category, lira(item.total)));
    }
    lines.join("\n")
}

pub fn transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions.".to_string();
    }
    transactions
        .iter()
        .map(|tx| {
            let sign = match tx.kind {
                TransactionType::Expense => "-",
                TransactionType::Income => "+",
            };
            format!(
                "{}  {:<32} {:<12} {sign}{}",
                tx.date,
                tx.title,
                tx.category,
                lira(tx.amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn server_report(view: &ReportSummaryView) -> String {
    let totals = &view.totals;
    let mut lines = vec![
        format!("{} to {} ({})", view.range.start, view.range.end, view.currency),
        format!(
            "Income {}  Expense {}  Savings {} ({:.1}%)",
            lira_f64(totals.income_try),
            lira_f64(totals.expense_try),
            lira_f64(totals.net_savings_try),
            totals.savings_rate_pct
        ),
    ];
    for item in &view.monthly_series {
        lines.push(format!(
            "  {:<8} income {}  expense {}  savings {}",
            item.label,
            lira_f64(item.income_try),
            lira_f64(item.expense_try),
            lira_f64(item.net_savings_try)
        ));
    }
    if let Some(top) = &view.top_category {
        lines.push(format!("Top category: {} ({})", top.category_label, lira_f64(top.total_try)));
    }
    lines.join("\n")
}

/// Purchase currency of a holding bought in something other than lira.
fn original_currency(asset: &InvestmentAsset) -> Option<Currency> {
    let currency = Currency::try_from(asset.original_currency.as_deref()?).ok()?;
    (currency != Currency::Try).then_some(currency)
}

pub fn portfolio(assets: &[InvestmentAsset], totals: &PortfolioTotals) -> String {
    let mut lines: Vec<String> = assets
        .iter()
        .map(|asset| {
            let original = match (original_currency(asset), asset.current_price_original) {
                (Some(currency), Some(price)) => {
                    format!("  ({})", format_currency(price, currency))
                }
                _ => String::new(),
            };
            format!(
                "{:<8} {:>10}  cost {}  now {}{original}  {}",
                asset.symbol,
                format_number(asset.quantity),
                lira_f64(asset.avg_cost),
                lira_f64(asset.current_price),
                format_percent(asset.change_percent)
            )
        })
        .collect();
    lines.push(format!(
        "Invested {}  Value {}  P/L {} ({})",
        lira_f64(totals.invested),
        lira_f64(totals.current_value),
        lira_f64(totals.profit_loss),
        format_percent(totals.profit_loss_pct)
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{BudgetCategory, MonthKey};

    use super::*;

    #[test]
    fn budget_lines_flag_alerts() {
        let month = BudgetMonth {
            month: "2026-03".parse::<MonthKey>().unwrap(),
            label: "Mar".to_string(),
            income: MoneyCents::from_units(32_130),
            expenses: MoneyCents::from_units(36_550),
            net_savings: MoneyCents::from_units(-4_420),
            categories: vec![
                BudgetCategory {
                    category: "Debt".to_string(),
                    limit: MoneyCents::from_units(6_000),
                    spent: MoneyCents::from_units(20_000),
                },
                BudgetCategory {
                    category: "Food".to_string(),
                    limit: MoneyCents::from_units(10_000),
                    spent: MoneyCents::from_units(2_000),
                },
            ],
        };
        let text = budgets(&[month]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Mar 2026-03  income ₺32.130,00  expenses ₺36.550,00  savings -₺4.420,00"
        );
        assert!(lines[1].ends_with("[danger]"));
        assert!(!lines[2].contains('['));
    }

    #[test]
    fn transaction_lines_carry_sign() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let text = transactions(&[
            Transaction::expense("t1", "Groceries", MoneyCents::from_units(850), date, "Food"),
            Transaction::income("t2", "Salary", MoneyCents::from_units(32_130), date, "OTHER"),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("2026-03-05  Groceries"));
        assert!(lines[0].ends_with("-₺850,00"));
        assert!(lines[1].ends_with("+₺32.130,00"));
        assert_eq!(transactions(&[]), "No transactions.");
    }

    #[test]
    fn foreign_holdings_show_original_price() {
        let mut stock = InvestmentAsset::new("AAPL", "Apple", 2.0, 6_000.0);
        stock.set_price(6_600.0);
        stock.original_currency = Some("usd".to_string());
        stock.current_price_original = Some(220.0);
        let gold = InvestmentAsset::new("GAU", "Gram gold", 10.0, 2_500.0);
        let totals = PortfolioTotals::from_assets(&[stock.clone(), gold.clone()]);

        let text = portfolio(&[stock, gold], &totals);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("now ₺6.600,00  ($220,00)"));
        assert!(!lines[1].contains('('));
    }

    #[test]
    fn message_is_json_object() {
        let rendered = Rendered::message("Signed out.");
        assert_eq!(rendered.json["message"], "Signed out.");
    }
}
