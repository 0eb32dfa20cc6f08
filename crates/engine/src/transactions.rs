use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MonthKey, MoneyCents, ResultEngine};

/// Category name installment expenses are booked under.
pub const INSTALLMENT_CATEGORY: &str = "Installment";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Transfer,
}

/// Deferred payment spread evenly over `months` consecutive months.
///
/// Deserialization goes through [`InstallmentMeta::new`], so a decoded value
/// always covers at least one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstallmentMeta")]
pub struct InstallmentMeta {
    pub total: MoneyCents,
    pub months: u32,
    pub start_month: MonthKey,
}

#[derive(Deserialize)]
struct RawInstallmentMeta {
    total: MoneyCents,
    months: u32,
    start_month: MonthKey,
}

impl TryFrom<RawInstallmentMeta> for InstallmentMeta {
    type Error = EngineError;

    fn try_from(raw: RawInstallmentMeta) -> ResultEngine<Self> {
        Self::new(raw.total, raw.months, raw.start_month)
    }
}

impl InstallmentMeta {
    pub fn new(total: MoneyCents, months: u32, start_month: MonthKey) -> ResultEngine<Self> {
        if months == 0 {
            return Err(EngineError::validation("installment months must be >= 1"));
        }
        Ok(Self {
            total,
            months,
            start_month,
        })
    }

    /// Amount charged each month.
    #[must_use]
    pub fn monthly_amount(&self) -> MoneyCents {
        self.total.divide_rounded(self.months)
    }
}

/// A single income or expense line.
///
/// When `installment` is set, the transaction describes the whole deferred
/// purchase; see [`crate::expand_installments`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub category: String,
    pub kind: TransactionType,
    pub payment_method: Option<PaymentMethod>,
    pub installment: Option<InstallmentMeta>,
}

impl Transaction {
    pub fn expense(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: MoneyCents,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            date,
            category: category.into(),
            kind: TransactionType::Expense,
            payment_method: None,
            installment: None,
        }
    }

    pub fn income(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: MoneyCents,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionType::Income,
            ..Self::expense(id, title, amount, date, category)
        }
    }

    #[must_use]
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    #[must_use]
    pub fn with_installment(mut self, meta: InstallmentMeta) -> Self {
        self.installment = Some(meta);
        self
    }

    #[must_use]
    pub fn is_installment(&self) -> bool {
        self.installment.is_some()
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// Transactions dated inside `month`, newest first.
#[must_use]
pub fn monthly_transactions(month: MonthKey, transactions: &[Transaction]) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| month.contains(tx.date))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

/// Transactions booked under the installment category.
#[must_use]
pub fn installment_summary(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.category == INSTALLMENT_CATEGORY)
        .collect()
}
