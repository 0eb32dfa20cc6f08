use std::time::Duration;

use serde_json::Value;

use crate::ClientError;

/// Public exchange-rate feed with USD as the base currency.
pub const DEFAULT_RATES_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/usd.json";

/// Rate used when the public feed cannot be reached.
pub const FALLBACK_USD_TRY_RATE: f64 = 27.0;

/// Reads the USD/TRY rate from the public feed, without authentication.
#[derive(Clone, Debug)]
pub struct PublicRates {
    http: reqwest::Client,
    url: String,
}

impl PublicRates {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Current USD/TRY rate, or [`FALLBACK_USD_TRY_RATE`] on any failure.
    pub async fn usd_try(&self) -> f64 {
        match self.fetch().await {
            Ok(rate) => rate,
            Err(err) => {
                tracing::warn!("public rate unavailable, using {FALLBACK_USD_TRY_RATE}: {err}");
                FALLBACK_USD_TRY_RATE
            }
        }
    }

    async fn fetch(&self) -> Result<f64, ClientError> {
        let body: Value = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        usd_try_from_feed(&body)
            .ok_or_else(|| ClientError::InvalidResponse("missing usd.try in rate feed".to_string()))
    }
}

/// `usd.try` of a feed document, when it is a positive number.
pub fn usd_try_from_feed(body: &Value) -> Option<f64> {
    body.get("usd")
        .and_then(|usd| usd.get("try"))
        .and_then(Value::as_f64)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}
