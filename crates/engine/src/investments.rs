//! Portfolio holdings and the add/edit asset form.
//!
//! Prices and quantities carry up to six decimals (fund units, gold grams),
//! so they stay `f64` here instead of [`crate::MoneyCents`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

const FILL_ALL_FIELDS: &str = "Please fill all fields with valid values.";
const SELECT_MARKET: &str = "Please select a market.";
const MISSING_ID: &str = "Unable to update asset without an id.";

/// Currency code purchases default to.
pub const BASE_CURRENCY: &str = "TRY";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Currency,
    GoldSilver,
    #[default]
    Fund,
    Stock,
}

impl AssetType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Currency => "CURRENCY",
            Self::GoldSilver => "GOLD_SILVER",
            Self::Fund => "FUND",
            Self::Stock => "STOCK",
        }
    }

    /// Funds and stocks are listed on a market that has to be picked on create.
    #[must_use]
    pub fn requires_market(self) -> bool {
        matches!(self, Self::Fund | Self::Stock)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CURRENCY" => Ok(Self::Currency),
            "GOLD_SILVER" => Ok(Self::GoldSilver),
            "FUND" => Ok(Self::Fund),
            "STOCK" => Ok(Self::Stock),
            other => Err(EngineError::Validation(format!("unknown asset type: {other}"))),
        }
    }
}

/// A holding with its TRY valuation and optional purchase-currency figures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAsset {
    pub id: Option<String>,
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub avg_cost: f64,
    pub current_price: f64,
    pub change_percent: f64,
    pub profit_loss: f64,
    pub asset_type: Option<AssetType>,
    pub stock_market: Option<String>,
    pub original_currency: Option<String>,
    pub avg_cost_original: Option<f64>,
    pub current_price_original: Option<f64>,
}

impl InvestmentAsset {
    /// New holding priced at its average cost.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        avg_cost: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            quantity,
            avg_cost,
            current_price: avg_cost,
            ..Self::default()
        }
    }

    /// Updates the market price and the derived profit/loss.
    pub fn set_price(&mut self, price: f64) {
        self.current_price = price;
        self.profit_loss = (self.current_price - self.avg_cost) * self.quantity;
    }

    #[must_use]
    pub fn invested(&self) -> f64 {
        self.avg_cost * self.quantity
    }

    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.current_price * self.quantity
    }

    /// TRY per unit of the purchase currency at the time of purchase.
    ///
    /// `1` for TRY purchases and when the original average cost is unknown.
    #[must_use]
    pub fn purchase_fx_rate(&self) -> f64 {
        let currency = self.original_currency.as_deref().unwrap_or(BASE_CURRENCY);
        match self.avg_cost_original {
            Some(original) if currency != BASE_CURRENCY && original != 0.0 => {
                self.avg_cost / original
            }
            _ => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub symbol: String,
    pub value: f64,
    /// Share of the portfolio's current value, 0 to 100.
    pub share_pct: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub invested: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,
    pub allocations: Vec<Allocation>,
}

impl PortfolioTotals {
    #[must_use]
    pub fn from_assets(assets: &[InvestmentAsset]) -> Self {
        let invested: f64 = assets.iter().map(InvestmentAsset::invested).sum();
        let current_value: f64 = assets.iter().map(InvestmentAsset::current_value).sum();
        let profit_loss = current_value - invested;
        let profit_loss_pct = if invested == 0.0 {
            0.0
        } else {
            profit_loss / invested * 100.0
        };
        let allocations = assets
            .iter()
            .map(|asset| {
                let value = asset.current_value();
                Allocation {
                    symbol: asset.symbol.clone(),
                    value,
                    share_pct: if current_value == 0.0 {
                        0.0
                    } else {
                        value / current_value * 100.0
                    },
                }
            })
            .collect();

        Self {
            invested,
            current_value,
            profit_loss,
            profit_loss_pct,
            allocations,
        }
    }
}

/// Raw values of the asset form, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvestmentDraft {
    pub asset_type: AssetType,
    pub stock_market: Option<String>,
    pub symbol: String,
    pub quantity: String,
    pub avg_cost: String,
}

/// A checked create request.
#[derive(Clone, Debug, PartialEq)]
pub struct NewInvestment {
    pub symbol: String,
    pub quantity: f64,
    pub avg_cost: f64,
    pub asset_type: AssetType,
    pub stock_market: Option<String>,
}

/// A checked edit of an existing holding.
#[derive(Clone, Debug, PartialEq)]
pub struct InvestmentRevision {
    pub id: String,
    pub quantity: f64,
    pub total_cost: f64,
    pub avg_cost_original: f64,
    pub purchase_currency: String,
}

impl InvestmentDraft {
    /// Prefills the form for editing `asset`.
    #[must_use]
    pub fn from_asset(asset: &InvestmentAsset) -> Self {
        Self {
            asset_type: asset.asset_type.unwrap_or_default(),
            stock_market: asset.stock_market.clone(),
            symbol: asset.symbol.clone(),
            quantity: asset.quantity.to_string(),
            avg_cost: asset.avg_cost_original.unwrap_or(asset.avg_cost).to_string(),
        }
    }

    pub fn validate_new(&self) -> ResultEngine<NewInvestment> {
        let (quantity, avg_cost) = self.amounts()?;
        let stock_market = if self.asset_type.requires_market() {
            match self.stock_market.as_deref().map(str::trim) {
                Some(market) if !market.is_empty() => Some(market.to_string()),
                _ => return Err(EngineError::validation(SELECT_MARKET)),
            }
        } else {
            None
        };

        Ok(NewInvestment {
            symbol: self.symbol.trim().to_string(),
            quantity,
            avg_cost,
            asset_type: self.asset_type,
            stock_market,
        })
    }

    /// Checks an edit of `asset`.
    ///
    /// The typed average cost is in the purchase currency; the total cost is
    /// converted to TRY with the holding's purchase FX rate.
    pub fn validate_update(&self, asset: &InvestmentAsset) -> ResultEngine<InvestmentRevision> {
        let (quantity, avg_cost) = self.amounts()?;
        let id = asset
            .id
            .clone()
            .ok_or_else(|| EngineError::validation(MISSING_ID))?;
        let purchase_currency = asset
            .original_currency
            .clone()
            .unwrap_or_else(|| BASE_CURRENCY.to_string());

        Ok(InvestmentRevision {
            id,
            quantity,
            total_cost: round6(avg_cost * quantity * asset.purchase_fx_rate()),
            avg_cost_original: avg_cost,
            purchase_currency,
        })
    }

    fn amounts(&self) -> ResultEngine<(f64, f64)> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
        };
        match (self.symbol.trim().is_empty(), parse(&self.quantity), parse(&self.avg_cost)) {
            (false, Some(quantity), Some(avg_cost)) => Ok((round6(quantity), round6(avg_cost))),
            _ => Err(EngineError::validation(FILL_ALL_FIELDS)),
        }
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
