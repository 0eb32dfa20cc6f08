use crate::{EngineError, ResultEngine, Transaction};

/// Day of the month every expanded installment is dated on.
pub const INSTALLMENT_DAY: u32 = 5;

/// Expands every installment transaction into one transaction per covered month.
///
/// Regular transactions are passed through unchanged and keep their relative
/// order. An installment with `months = m` becomes `m` entries:
///
/// - `id` is `"{id}-{n}"` and `title` is `"{title} ({n}/{m})"`, `n` starting at 1
/// - `date` is day 5 of `start_month + (n - 1)`
/// - `amount` is `total / m` rounded to the cent; the shares are not
///   rebalanced, so their sum may differ from `total` by a few cents
/// - the installment metadata is dropped
///
/// Callers re-sort by date if they need chronological output. An installment
/// covering zero months is a validation error.
pub fn expand_installments(transactions: &[Transaction]) -> ResultEngine<Vec<Transaction>> {
    let mut expanded = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        let Some(meta) = &transaction.installment else {
            expanded.push(transaction.clone());
            continue;
        };
        if meta.months == 0 {
            return Err(EngineError::Validation(format!(
                "installment {} covers no months",
                transaction.id
            )));
        }

        let amount = meta.monthly_amount();
        for i in 0..meta.months {
            let n = i + 1;
            let month = meta.start_month.add_months(i as i32);
            expanded.push(Transaction {
                id: format!("{}-{n}", transaction.id),
                title: format!("{} ({n}/{})", transaction.title, meta.months),
                amount,
                date: month.day(INSTALLMENT_DAY)?,
                installment: None,
                ..transaction.clone()
            });
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{InstallmentMeta, MoneyCents};

    fn phone(total: i64, months: u32, start: &str) -> Transaction {
        Transaction::expense(
            "installment-phone",
            "Phone Installment",
            MoneyCents::ZERO,
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            "Installment",
        )
        .with_installment(
            InstallmentMeta::new(MoneyCents::from_units(total), months, start.parse().unwrap())
                .unwrap(),
        )
    }

    #[test]
    fn expands_one_entry_per_month() {
        let expanded = expand_installments(&[phone(18_000, 9, "2026-03")]).unwrap();
        assert_eq!(expanded.len(), 9);

        let first = &expanded[0];
        assert_eq!(first.id, "installment-phone-1");
        assert_eq!(first.title, "Phone Installment (1/9)");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert!(!first.is_installment());

        let last = &expanded[8];
        assert_eq!(last.id, "installment-phone-9");
        assert_eq!(last.title, "Phone Installment (9/9)");
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2026, 11, 5).unwrap());
    }

    #[test]
    fn exact_split_sums_to_total() {
        let expanded = expand_installments(&[phone(18_000, 9, "2026-03")]).unwrap();
        assert!(expanded.iter().all(|tx| tx.amount == MoneyCents::from_units(2_000)));
        let sum: MoneyCents = expanded.iter().map(|tx| tx.amount).sum();
        assert_eq!(sum, MoneyCents::from_units(18_000));
    }

    #[test]
    fn uneven_split_keeps_rounding_drift() {
        let expanded = expand_installments(&[phone(100, 3, "2026-03")]).unwrap();
        assert!(expanded.iter().all(|tx| tx.amount == MoneyCents::new(3_333)));
        let sum: MoneyCents = expanded.iter().map(|tx| tx.amount).sum();
        assert_eq!(sum, MoneyCents::new(9_999));
        assert_ne!(sum, MoneyCents::from_units(100));
    }

    #[test]
    fn zero_months_is_rejected() {
        let mut tx = phone(18_000, 9, "2026-03");
        if let Some(meta) = tx.installment.as_mut() {
            meta.months = 0;
        }
        let err = expand_installments(&[tx]).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn crosses_year_boundary() {
        let expanded = expand_installments(&[phone(1_200, 3, "2026-11")]).unwrap();
        let dates: Vec<_> = expanded.iter().map(|tx| tx.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-11-05", "2026-12-05", "2027-01-05"]);
    }

    #[test]
    fn regular_transactions_pass_through() {
        let rent = Transaction::expense(
            "rent",
            "Rent",
            MoneyCents::from_units(8_500),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            "Housing",
        );
        let expanded = expand_installments(&[rent.clone(), phone(300, 1, "2026-02")]).unwrap();
        assert_eq!(expanded[0], rent);
        assert_eq!(expanded[1].title, "Phone Installment (1/1)");
        assert_eq!(expanded[1].amount, MoneyCents::from_units(300));
    }
}
