//! Mapping between wire DTOs and engine values.

use api_types::{
    auth::RegisterRequest,
    investment::{InvestmentNew, InvestmentUpdate, InvestmentView},
    transaction::{self as wire, InstallmentMetaView, NewTransaction, TransactionView},
};
use engine::{
    InstallmentMeta, InvestmentAsset, InvestmentRevision, MoneyCents, MonthKey, NewInvestment,
    PaymentMethod, Registration, Transaction, TransactionInput, TransactionType,
};

use crate::ClientError;

fn kind_from_wire(kind: wire::TransactionType) -> TransactionType {
    match kind {
        wire::TransactionType::Income => TransactionType::Income,
        wire::TransactionType::Expense => TransactionType::Expense,
    }
}

fn kind_to_wire(kind: TransactionType) -> wire::TransactionType {
    match kind {
        TransactionType::Income => wire::TransactionType::Income,
        TransactionType::Expense => wire::TransactionType::Expense,
    }
}

fn method_from_wire(method: wire::PaymentMethod) -> PaymentMethod {
    match method {
        wire::PaymentMethod::Card => PaymentMethod::Card,
        wire::PaymentMethod::Cash => PaymentMethod::Cash,
        wire::PaymentMethod::Transfer => PaymentMethod::Transfer,
    }
}

fn method_to_wire(method: PaymentMethod) -> wire::PaymentMethod {
    match method {
        PaymentMethod::Card => wire::PaymentMethod::Card,
        PaymentMethod::Cash => wire::PaymentMethod::Cash,
        PaymentMethod::Transfer => wire::PaymentMethod::Transfer,
    }
}

/// Server transaction as an engine [`Transaction`].
///
/// Installment metadata is kept only when the row is flagged as an
/// installment; a flagged row without metadata is treated as a regular one.
/// Amounts that are not finite or exceed [`engine::MAX_MAJOR_AMOUNT`] are
/// rejected.
pub fn transaction_from_view(view: &TransactionView) -> Result<Transaction, ClientError> {
    let installment = match (&view.installment_meta, view.is_installment) {
        (Some(meta), true) => Some(InstallmentMeta::new(
            MoneyCents::try_from_major(meta.total_try)?,
            meta.months,
            meta.start_month.parse::<MonthKey>()?,
        )?),
        _ => None,
    };

    Ok(Transaction {
        id: view.id.clone(),
        title: view.title.clone(),
        amount: MoneyCents::try_from_major(view.amount_try)?,
        date: view.date,
        category: view.category.clone(),
        kind: kind_from_wire(view.kind),
        payment_method: view.payment_method.map(method_from_wire),
        installment,
    })
}

pub fn transactions_from_views(views: &[TransactionView]) -> Result<Vec<Transaction>, ClientError> {
    views.iter().map(transaction_from_view).collect()
}

/// Body of a create or update request for a validated form.
pub fn transaction_to_new(input: &TransactionInput) -> NewTransaction {
    NewTransaction {
        title: input.title.clone(),
        amount_try: input.amount.to_major(),
        date: input.date,
        category: input.category.clone(),
        kind: kind_to_wire(input.kind),
        payment_method: method_to_wire(input.payment_method),
        is_installment: input.installment.is_some(),
        installment_meta: input.installment.as_ref().map(|meta| InstallmentMetaView {
            total_try: meta.total.to_major(),
            months: meta.months,
            start_month: meta.start_month.to_string(),
        }),
    }
}

pub fn investment_from_view(view: &InvestmentView) -> InvestmentAsset {
    InvestmentAsset {
        id: view.id.clone(),
        symbol: view.symbol.clone(),
        name: view.name.clone(),
        quantity: view.quantity,
        avg_cost: view.avg_cost_try,
        current_price: view.current_price_try,
        change_percent: view.change_percent,
        profit_loss: view.profit_loss_try,
        asset_type: view.asset_type.as_deref().and_then(|kind| kind.parse().ok()),
        stock_market: view.stock_market.clone(),
        original_currency: view.original_currency.clone(),
        avg_cost_original: view.avg_cost_original,
        current_price_original: view.current_price_original,
    }
}

pub fn investment_new(input: &NewInvestment) -> InvestmentNew {
    InvestmentNew {
        symbol: input.symbol.clone(),
        quantity: input.quantity,
        avg_cost: input.avg_cost,
        asset_type: input.asset_type.as_str().to_string(),
        stock_market: input.stock_market.clone(),
    }
}

pub fn investment_update(revision: &InvestmentRevision) -> InvestmentUpdate {
    InvestmentUpdate {
        quantity: revision.quantity,
        total_cost_try: revision.total_cost,
        avg_cost_original: revision.avg_cost_original,
        purchase_currency: revision.purchase_currency.clone(),
    }
}

pub fn register_request(registration: &Registration) -> RegisterRequest {
    RegisterRequest {
        username: registration.username.clone(),
        email: registration.email.clone(),
        password: registration.password.clone(),
        net_salary_usd: registration.net_salary_usd,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{AssetType, expand_installments};

    use super::*;

    fn phone_view() -> TransactionView {
        TransactionView {
            id: "installment-phone".to_string(),
            title: "Phone Installment".to_string(),
            amount_try: 0.0,
            date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            category: "Installment".to_string(),
            kind: wire::TransactionType::Expense,
            payment_method: Some(wire::PaymentMethod::Card),
            is_installment: true,
            installment_meta: Some(InstallmentMetaView {
                total_try: 18_000.0,
                months: 9,
                start_month: "2026-03".to_string(),
            }),
        }
    }

    #[test]
    fn installment_view_expands() {
        let tx = transaction_from_view(&phone_view()).unwrap();
        assert!(tx.is_installment());
        let expanded = expand_installments(&[tx]).unwrap();
        assert_eq!(expanded.len(), 9);
        assert_eq!(expanded[0].amount, MoneyCents::from_units(2_000));
    }

    #[test]
    fn flag_without_meta_is_regular() {
        let view = TransactionView {
            installment_meta: None,
            amount_try: 8_500.456,
            ..phone_view()
        };
        let tx = transaction_from_view(&view).unwrap();
        assert!(!tx.is_installment());
        assert_eq!(tx.amount, MoneyCents::new(850_046));
    }

    #[test]
    fn bad_start_month_is_rejected() {
        let mut view = phone_view();
        if let Some(meta) = view.installment_meta.as_mut() {
            meta.start_month = "March".to_string();
        }
        assert!(matches!(transaction_from_view(&view), Err(ClientError::Validation(_))));
    }

    #[test]
    fn out_of_range_amounts_are_rejected() {
        let huge = TransactionView {
            installment_meta: None,
            is_installment: false,
            amount_try: 1e300,
            ..phone_view()
        };
        assert!(matches!(transaction_from_view(&huge), Err(ClientError::Validation(_))));

        let mut view = phone_view();
        if let Some(meta) = view.installment_meta.as_mut() {
            meta.total_try = -1e15;
        }
        assert!(matches!(transaction_from_view(&view), Err(ClientError::Validation(_))));
    }

    #[test]
    fn input_becomes_wire_payload() {
        let start: MonthKey = "2026-03".parse().unwrap();
        let input = TransactionInput {
            title: "Laptop".to_string(),
            amount: MoneyCents::from_units(24_000),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            category: "Installment".to_string(),
            kind: TransactionType::Expense,
            payment_method: PaymentMethod::Card,
            installment: Some(
                InstallmentMeta::new(MoneyCents::from_units(24_000), 12, start).unwrap(),
            ),
        };
        let payload = serde_json::to_value(transaction_to_new(&input)).unwrap();
        assert_eq!(payload["type"], "expense");
        assert_eq!(payload["paymentMethod"], "card");
        assert_eq!(payload["isInstallment"], true);
        assert_eq!(payload["installmentMeta"]["startMonth"], "2026-03");
        assert_eq!(payload["installmentMeta"]["totalTry"], 24_000.0);
    }

    #[test]
    fn investment_view_maps_asset_type() {
        let view = InvestmentView {
            id: Some("inv-1".to_string()),
            symbol: "AAPL".to_string(),
            name: "Apple".to_string(),
            quantity: 2.0,
            avg_cost_try: 6_000.0,
            current_price_try: 6_600.0,
            change_percent: 1.2,
            profit_loss_try: 1_200.0,
            asset_type: Some("STOCK".to_string()),
            stock_market: Some("NASDAQ".to_string()),
            stock_market_display_name: None,
            original_currency: Some("USD".to_string()),
            avg_cost_original: Some(200.0),
            current_price_original: Some(220.0),
        };
        let asset = investment_from_view(&view);
        assert_eq!(asset.asset_type, Some(AssetType::Stock));
        assert_eq!(asset.purchase_fx_rate(), 30.0);
    }
}
