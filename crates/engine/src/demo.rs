//! Sample ledger used when no server is around.

use chrono::NaiveDate;

use crate::{
    InstallmentMeta, MonthKey, MoneyCents, PaymentMethod,
    PaymentMethod::{Card, Transfer},
    Transaction,
};

struct Row {
    id: &'static str,
    title: &'static str,
    amount: i64,
    date: (i32, u32, u32),
    category: &'static str,
    method: PaymentMethod,
}

const ROWS: &[Row] = &[
    row("rent-2026-02", "Rent", 8_500, (2026, 2, 1), "Housing", Transfer),
    row("food-2026-02", "Groceries", 3_200, (2026, 2, 6), "Food", Card),
    row("transport-2026-02", "Transport", 950, (2026, 2, 9), "Transport", Card),
    row("utilities-2026-02", "Utilities", 1_200, (2026, 2, 12), "Utilities", Transfer),
    row("lifestyle-2026-02", "Gym + Streaming", 1_300, (2026, 2, 15), "Lifestyle", Card),
    row("rent-2026-03", "Rent", 8_500, (2026, 3, 1), "Housing", Transfer),
    row("food-2026-03", "Groceries", 3_300, (2026, 3, 6), "Food", Card),
    row("valentine-2026-03", "Valentine's Day", 1_500, (2026, 3, 14), "Lifestyle", Card),
    row("father-debt-2026-03", "Father's Debt", 20_000, (2026, 3, 20), "Debt", Transfer),
    row("utilities-2026-03", "Utilities", 1_250, (2026, 3, 21), "Utilities", Transfer),
    row("rent-2026-04", "Rent", 8_500, (2026, 4, 1), "Housing", Transfer),
    row("food-2026-04", "Groceries", 3_100, (2026, 4, 6), "Food", Card),
    row("transport-2026-04", "Transport", 850, (2026, 4, 9), "Transport", Card),
    row("utilities-2026-04", "Utilities", 1_150, (2026, 4, 12), "Utilities", Transfer),
    row("lifestyle-2026-04", "Weekend escape", 2_200, (2026, 4, 17), "Lifestyle", Card),
    row("rent-2026-05", "Rent", 8_500, (2026, 5, 1), "Housing", Transfer),
    row("food-2026-05", "Groceries", 3_050, (2026, 5, 6), "Food", Card),
    row("utilities-2026-05", "Utilities", 1_100, (2026, 5, 12), "Utilities", Transfer),
    row("lifestyle-2026-05", "Tech accessories", 1_400, (2026, 5, 19), "Lifestyle", Card),
];

const fn row(
    id: &'static str,
    title: &'static str,
    amount: i64,
    date: (i32, u32, u32),
    category: &'static str,
    method: PaymentMethod,
) -> Row {
    Row {
        id,
        title,
        amount,
        date,
        category,
        method,
    }
}

/// Monthly salary of the sample user, in USD.
pub const SALARY_USD: MoneyCents = MoneyCents::from_units(1_190);

/// Sample expenses from February to May 2026, plus a 9-month phone
/// installment of 18 000 TRY starting in March.
///
/// The installment comes unexpanded, right after the March rows.
#[must_use]
pub fn base_transactions() -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = ROWS
        .iter()
        .filter_map(|row| {
            let (y, m, d) = row.date;
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            let amount = MoneyCents::from_units(row.amount);
            Some(
                Transaction::expense(row.id, row.title, amount, date, row.category)
                    .with_payment_method(row.method),
            )
        })
        .collect();

    let start = MonthKey::new_unchecked(2026, 3);
    if let (Ok(date), Ok(meta)) = (
        start.day(5),
        InstallmentMeta::new(MoneyCents::from_units(18_000), 9, start),
    ) {
        let phone = Transaction::expense(
            "installment-phone",
            "Phone Installment",
            MoneyCents::ZERO,
            date,
            "Installment",
        )
        .with_payment_method(Card)
        .with_installment(meta);
        let after_march = transactions
            .iter()
            .position(|tx| tx.id == "rent-2026-04")
            .unwrap_or(transactions.len());
        transactions.insert(after_march, phone);
    }

    transactions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ledger_shape() {
        let transactions = base_transactions();
        assert_eq!(transactions.len(), 20);
        assert_eq!(transactions.iter().filter(|tx| tx.is_installment()).count(), 1);
        assert_eq!(transactions[10].id, "installment-phone");
        assert!(transactions.iter().all(|tx| tx.is_expense()));
    }
}
