//! Typed access to the FinTrack REST endpoints.

use api_types::{
    Page,
    dashboard::DashboardOverview,
    investment::InvestmentView,
    market::UsdTryRate,
    metadata::{CategoryMeta, StockMarketMeta, SupportedAssets},
    report::ReportSummaryView,
    transaction::{TransactionQuery, TransactionView},
};
use chrono::NaiveDate;
use engine::{InvestmentRevision, NewInvestment, TransactionInput, validate_range};
use serde::de::DeserializeOwned;

use crate::{
    AuthClient, ClientError, HttpRequest, Transport, investment_new, investment_update,
    parse_response, parse_unit, transaction_to_new,
};

/// Every call goes through [`AuthClient::auth_fetch`], so an expired access
/// token is refreshed transparently.
#[derive(Debug)]
pub struct FinTrackApi<T> {
    auth: AuthClient<T>,
}

impl<T: Transport> FinTrackApi<T> {
    pub fn new(auth: AuthClient<T>) -> Self {
        Self { auth }
    }

    pub fn auth(&self) -> &AuthClient<T> {
        &self.auth
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.auth.api_prefix(), suffix)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ClientError> {
        let response = self.auth.auth_fetch(&request).await?;
        parse_response(&response)
    }

    async fn fetch_unit(&self, request: HttpRequest) -> Result<(), ClientError> {
        let response = self.auth.auth_fetch(&request).await?;
        parse_unit(&response)
    }

    pub async fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Page<TransactionView>, ClientError> {
        self.fetch(HttpRequest::get(self.path("/transactions")).with_query(query.to_pairs())).await
    }

    pub async fn create_transaction(
        &self,
        input: &TransactionInput,
    ) -> Result<TransactionView, ClientError> {
        let request =
            HttpRequest::post(self.path("/transactions")).json(&transaction_to_new(input))?;
        self.fetch(request).await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        input: &TransactionInput,
    ) -> Result<TransactionView, ClientError> {
        let request = HttpRequest::patch(self.path(&format!("/transactions/{id}")))
            .json(&transaction_to_new(input))?;
        self.fetch(request).await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        self.fetch_unit(HttpRequest::delete(self.path(&format!("/transactions/{id}")))).await
    }

    pub async fn categories(&self) -> Result<Vec<CategoryMeta>, ClientError> {
        self.fetch(HttpRequest::get(self.path("/metadata/categories"))).await
    }

    pub async fn stock_markets(&self) -> Result<Vec<StockMarketMeta>, ClientError> {
        self.fetch(HttpRequest::get(self.path("/metadata/stock-markets"))).await
    }

    pub async fn dashboard_overview(
        &self,
        month: u32,
        year: i32,
        page: u32,
        size: u32,
    ) -> Result<DashboardOverview, ClientError> {
        let query = vec![
            ("month".to_string(), month.to_string()),
            ("year".to_string(), year.to_string()),
            ("page".to_string(), page.to_string()),
            ("size".to_string(), size.to_string()),
        ];
        self.fetch(HttpRequest::get(self.path("/dashboard/overview")).with_query(query)).await
    }

    pub async fn investments(&self) -> Result<Vec<InvestmentView>, ClientError> {
        self.fetch(HttpRequest::get(self.path("/investments"))).await
    }

    pub async fn create_investment(
        &self,
        input: &NewInvestment,
    ) -> Result<InvestmentView, ClientError> {
        let request = HttpRequest::post(self.path("/investments")).json(&investment_new(input))?;
        self.fetch(request).await
    }

    pub async fn update_investment(
        &self,
        revision: &InvestmentRevision,
    ) -> Result<InvestmentView, ClientError> {
        let request = HttpRequest::patch(self.path(&format!("/investments/{}", revision.id)))
            .json(&investment_update(revision))?;
        self.fetch(request).await
    }

    pub async fn delete_investment(&self, id: &str) -> Result<(), ClientError> {
        self.fetch_unit(HttpRequest::delete(self.path(&format!("/investments/{id}")))).await
    }

    pub async fn usd_try_rate(&self) -> Result<f64, ClientError> {
        let rate: UsdTryRate = self
            .fetch(HttpRequest::get(self.path("/market-data/usd-try")))
            .await?;
        Ok(rate.rate)
    }

    pub async fn supported_assets(&self) -> Result<SupportedAssets, ClientError> {
        self.fetch(HttpRequest::get(self.path("/market-data/supported-assets"))).await
    }

    /// Server-side report over `start..=end`; the range is checked before any
    /// request is made.
    pub async fn report_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReportSummaryView, ClientError> {
        validate_range(start, end)?;
        let query = vec![
            ("startDate".to_string(), start.to_string()),
            ("endDate".to_string(), end.to_string()),
        ];
        self.fetch(HttpRequest::get(self.path("/reports/summary")).with_query(query)).await
    }
}
