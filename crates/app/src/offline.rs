//! Commands computed locally over the bundled sample data.

use std::time::Duration;

use client::PublicRates;
use engine::{
    BudgetConfig, BudgetMonth, EngineError, MoneyCents, MonthKey, Transaction, build_budgets,
    demo, expand_installments, monthly_transactions, summarize,
};

use crate::{
    config::{AppConfig, BudgetArgs},
    error::Result,
    render::{self, Rendered},
};

/// `rate` when given, otherwise the public feed (with its fallback).
async fn usd_try_rate(settings: &AppConfig, rate: Option<f64>) -> Result<f64> {
    match rate {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => Err(EngineError::InvalidAmount(rate.to_string()).into()),
        None => {
            let rates =
                PublicRates::new(&settings.rates_url, Duration::from_secs(settings.timeout_secs))?;
            Ok(rates.usd_try().await)
        }
    }
}

fn salary(salary_usd: f64) -> Result<MoneyCents> {
    if salary_usd.is_finite() && salary_usd >= 0.0 {
        Ok(MoneyCents::from_major(salary_usd))
    } else {
        Err(EngineError::InvalidAmount(salary_usd.to_string()).into())
    }
}

pub fn sample_budgets(
    config: &BudgetConfig,
    salary_usd: MoneyCents,
    usd_try_rate: f64,
) -> Result<Vec<BudgetMonth>> {
    let expanded = expand_installments(&demo::base_transactions())?;
    Ok(build_budgets(salary_usd, usd_try_rate, &expanded, config))
}

pub fn sample_month(month: MonthKey) -> Result<Vec<Transaction>> {
    let expanded = expand_installments(&demo::base_transactions())?;
    Ok(monthly_transactions(month, &expanded))
}

pub async fn budgets(settings: &AppConfig, args: &BudgetArgs) -> Result<Rendered> {
    let rate = usd_try_rate(settings, args.rate).await?;
    let months = sample_budgets(&settings.budget, salary(args.salary_usd)?, rate)?;
    Rendered::new(&months, render::budgets(&months))
}

pub async fn report(settings: &AppConfig, args: &BudgetArgs) -> Result<Rendered> {
    let rate = usd_try_rate(settings, args.rate).await?;
    let months = sample_budgets(&settings.budget, salary(args.salary_usd)?, rate)?;
    let summary = summarize(&months);
    Rendered::new(&summary, render::report(&summary))
}

pub fn installments(month: MonthKey) -> Result<Rendered> {
    let transactions = sample_month(month)?;
    Rendered::new(&transactions, render::transactions(&transactions))
}

#[cfg(test)]
mod tests {
    use engine::{INSTALLMENT_CATEGORY, demo::SALARY_USD};

    use super::*;

    #[test]
    fn sample_budgets_match_stock_window() {
        let months = sample_budgets(&BudgetConfig::default(), SALARY_USD, 27.0).unwrap();
        let expenses: Vec<MoneyCents> = months.iter().map(|m| m.expenses).collect();
        assert_eq!(
            expenses,
            [15_150, 36_550, 17_800, 16_050, 2_000].map(MoneyCents::from_units)
        );
        assert!(months.iter().all(|m| m.income == MoneyCents::from_units(32_130)));
    }

    #[test]
    fn sample_month_is_newest_first_with_installment() {
        let month: MonthKey = "2026-03".parse().unwrap();
        let transactions = sample_month(month).unwrap();
        assert!(transactions.iter().all(|tx| month.contains(tx.date)));
        assert!(transactions.windows(2).all(|pair| pair[0].date >= pair[1].date));
        let phone = transactions
            .iter()
            .find(|tx| tx.category == INSTALLMENT_CATEGORY)
            .unwrap();
        assert_eq!(phone.title, "Phone Installment (1/9)");
        assert_eq!(phone.amount, MoneyCents::from_units(2_000));
    }

    #[tokio::test]
    async fn rejects_non_positive_rate() {
        let args = BudgetArgs {
            salary_usd: 1_190.0,
            rate: Some(0.0),
        };
        assert!(budgets(&AppConfig::default(), &args).await.is_err());
    }

    #[test]
    fn rejects_negative_salary() {
        assert!(salary(-1.0).is_err());
        assert_eq!(salary(1_190.0).unwrap(), SALARY_USD);
    }
}
