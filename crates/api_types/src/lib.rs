use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response envelope used by every REST endpoint.
///
/// The server omits `null` members, so every field is optional; a missing
/// `success` reads as a failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Returns `true` when `value` looks like an [`ApiResponse`] (an object with a
/// boolean `success` member).
pub fn is_api_response(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.get("success"))
        .is_some_and(serde_json::Value::is_boolean)
}

/// Paginated list as returned by list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

pub mod auth {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub username: String,
        pub password: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegisterRequest {
        pub username: String,
        pub email: String,
        pub password: String,
        pub net_salary_usd: f64,
    }

    /// Profile of the signed-in user.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuthUser {
        pub id: String,
        pub username: String,
        pub email: String,
        pub net_salary_usd: f64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionType {
        #[serde(alias = "INCOME")]
        Income,
        #[serde(alias = "EXPENSE")]
        Expense,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum PaymentMethod {
        #[serde(alias = "CARD")]
        Card,
        #[serde(alias = "CASH")]
        Cash,
        #[serde(alias = "TRANSFER")]
        Transfer,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InstallmentMetaView {
        pub total_try: f64,
        pub months: u32,
        /// Calendar month, `yyyy-mm`.
        pub start_month: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: String,
        pub title: String,
        pub amount_try: f64,
        pub date: NaiveDate,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub payment_method: Option<PaymentMethod>,
        #[serde(default)]
        pub is_installment: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub installment_meta: Option<InstallmentMetaView>,
    }

    /// Body of `POST /transactions` and `PATCH /transactions/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NewTransaction {
        pub title: String,
        pub amount_try: f64,
        pub date: NaiveDate,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub payment_method: PaymentMethod,
        pub is_installment: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub installment_meta: Option<InstallmentMetaView>,
    }

    /// Query of `GET /transactions`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TransactionQuery {
        pub month: u32,
        pub year: i32,
        pub page: u32,
        pub size: u32,
        /// Ask the server to return installment transactions already expanded.
        pub expanded: bool,
    }

    impl TransactionQuery {
        /// Query pairs in the order the server documents them.
        pub fn to_pairs(&self) -> Vec<(String, String)> {
            vec![
                ("month".to_string(), self.month.to_string()),
                ("year".to_string(), self.year.to_string()),
                ("page".to_string(), self.page.to_string()),
                ("size".to_string(), self.size.to_string()),
                ("expanded".to_string(), self.expanded.to_string()),
            ]
        }
    }
}

pub mod metadata {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryMeta {
        pub id: String,
        pub label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub icon: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StockMarketMeta {
        pub id: String,
        pub label: String,
        pub suffix: String,
        pub currency: String,
        #[serde(default)]
        pub supported_asset_types: Vec<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SupportedAssetOption {
        pub slug: String,
        pub label: String,
    }

    /// Supported assets keyed by asset type (`CURRENCY`, `GOLD_SILVER`, ...).
    pub type SupportedAssets =
        std::collections::BTreeMap<String, Vec<SupportedAssetOption>>;
}

pub mod investment {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvestmentView {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<String>,
        pub symbol: String,
        pub name: String,
        pub quantity: f64,
        pub avg_cost_try: f64,
        pub current_price_try: f64,
        pub change_percent: f64,
        pub profit_loss_try: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub asset_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stock_market: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stock_market_display_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub original_currency: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub avg_cost_original: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub current_price_original: Option<f64>,
    }

    /// Body of `POST /investments`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvestmentNew {
        pub symbol: String,
        pub quantity: f64,
        pub avg_cost: f64,
        pub asset_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub stock_market: Option<String>,
    }

    /// Body of `PATCH /investments/{id}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvestmentUpdate {
        pub quantity: f64,
        pub total_cost_try: f64,
        pub avg_cost_original: f64,
        pub purchase_currency: String,
    }
}

pub mod market {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct UsdTryRate {
        #[serde(alias = "price", alias = "usdTryRate")]
        pub rate: f64,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct BudgetSummary {
        pub income: f64,
        pub expense: f64,
        pub savings: f64,
        pub credit_card_limit: Option<f64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ForecastPoint {
        pub month: String,
        pub label: String,
        pub savings: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryWatchItem {
        pub category: String,
        pub limit_try: f64,
        pub spent_try: f64,
        /// `normal`, `warning` or `danger`.
        pub alert_level: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DashboardOverview {
        pub summary: BudgetSummary,
        #[serde(default)]
        pub forecast: Vec<ForecastPoint>,
        #[serde(default)]
        pub category_watchlist: Vec<CategoryWatchItem>,
        #[serde(default)]
        pub investments: Vec<super::investment::InvestmentView>,
        pub current_usd_try_rate: f64,
        pub recent_transactions: Page<super::transaction::TransactionView>,
    }
}

pub mod report {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct DateRange {
        pub start: NaiveDate,
        pub end: NaiveDate,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportTotals {
        pub income_try: f64,
        pub expense_try: f64,
        pub net_savings_try: f64,
        pub savings_rate_pct: f64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportAverages {
        pub monthly_income_try: f64,
        pub monthly_expense_try: f64,
        pub monthly_savings_try: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlySeriesItem {
        pub month: String,
        pub label: String,
        pub income_try: f64,
        pub expense_try: f64,
        pub net_savings_try: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryBreakdownItem {
        pub category_id: String,
        pub category_label: String,
        pub total_try: f64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct DataPoints {
        pub categories: u64,
        pub months: u64,
        pub transactions: u64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportMetadata {
        #[serde(default)]
        pub generated_at: Option<String>,
        #[serde(default)]
        pub data_points: Option<DataPoints>,
    }

    /// Server-computed aggregate over a date range.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportSummaryView {
        pub currency: String,
        pub range: DateRange,
        pub totals: ReportTotals,
        pub averages: ReportAverages,
        #[serde(default)]
        pub monthly_series: Vec<MonthlySeriesItem>,
        #[serde(default)]
        pub category_breakdown: Vec<CategoryBreakdownItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub top_category: Option<CategoryBreakdownItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub metadata: Option<ReportMetadata>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_omits_absent_members() {
        let envelope: ApiResponse<u32> = serde_json::from_value(json!({"data": 5})).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data, Some(5));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": false, "data": 5}));
    }

    #[test]
    fn page_of_transactions_defaults_content() {
        let empty: Page<transaction::TransactionView> =
            serde_json::from_value(json!({"pageNumber": 0, "hasNext": false})).unwrap();
        assert!(empty.content.is_empty());

        let page: Page<transaction::TransactionView> = serde_json::from_value(json!({
            "content": [{
                "id": "t1",
                "title": "Rent",
                "amountTry": 8500,
                "date": "2026-02-01",
                "category": "Housing",
                "type": "EXPENSE",
                "isInstallment": false
            }],
            "totalElements": 1
        }))
        .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 1);
    }

    #[test]
    fn detects_envelope_shape() {
        assert!(is_api_response(&json!({"success": false})));
        assert!(!is_api_response(&json!({"success": "yes"})));
        assert!(!is_api_response(&json!([1, 2])));
        assert!(!is_api_response(&json!({"id": "u1"})));
    }

    #[test]
    fn transaction_accepts_server_casing() {
        let view: transaction::TransactionView = serde_json::from_value(json!({
            "id": "t1",
            "title": "Rent",
            "amountTry": 8500,
            "date": "2026-02-01",
            "category": "Housing",
            "type": "EXPENSE",
            "paymentMethod": "TRANSFER",
            "isInstallment": false
        }))
        .unwrap();
        assert_eq!(view.kind, transaction::TransactionType::Expense);
        assert_eq!(view.payment_method, Some(transaction::PaymentMethod::Transfer));
        assert!(view.installment_meta.is_none());
    }
}
