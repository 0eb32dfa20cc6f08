//! Budget, report and portfolio calculations behind the FinTrack screens.
//!
//! Everything here is pure: callers hand in transaction lists and get plain
//! values back. Fetching and authentication live in the `client` crate.

pub use budgets::{
    AlertLevel, BudgetCategory, BudgetConfig, BudgetMonth, CategoryLimit, MonthWindow,
    build_budgets,
};
pub use currency::Currency;
pub use error::EngineError;
pub use format::{
    format_currency, format_currency_trim_zeros, format_currency_with_precision, format_number,
    format_percent,
};
pub use installments::{INSTALLMENT_DAY, expand_installments};
pub use investments::{
    Allocation, AssetType, InvestmentAsset, InvestmentDraft, InvestmentRevision, NewInvestment,
    PortfolioTotals,
};
pub use money::{MAX_MAJOR_AMOUNT, MoneyCents};
pub use month::MonthKey;
pub use reports::{
    CategoryTotal, MonthlyPoint, ReportAverages, ReportSummary, ReportTotals, summarize,
    validate_range,
};
pub use transactions::{
    INSTALLMENT_CATEGORY, InstallmentMeta, PaymentMethod, Transaction, TransactionType,
    installment_summary, monthly_transactions,
};
pub use validation::{
    RegisterDraft, Registration, TransactionDraft, TransactionInput, is_valid_email,
    is_valid_password, validate_login,
};

mod budgets;
mod currency;
pub mod demo;
mod error;
mod format;
mod installments;
pub mod investments;
mod money;
mod month;
mod reports;
mod transactions;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
