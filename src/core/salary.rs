//! Salary periods, supported currencies and the validated user input.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Time period a salary figure is expressed in. Ordering is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Period {
    Hour,
    Day,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Hour, Period::Day, Period::Month, Period::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Hour => "Hour",
            Period::Day => "Day",
            Period::Month => "Month",
            Period::Year => "Year",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidPeriod(s.to_string()))
    }
}

/// Currencies the calculator reports in. Ordering is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "PLN")]
    Pln,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Pln, Currency::Eur, Currency::Usd, Currency::Gbp];

    /// ISO 4217 code, as used by the rate providers and in cache file names.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pln => "PLN",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidCurrency(s.to_string()))
    }
}

/// Largest accepted amount. Keeps every converted cell finite.
pub const MAX_AMOUNT: f64 = 1e12;

/// A salary figure to convert. Only constructible with an amount in
/// `(0, MAX_AMOUNT]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input {
    amount: f64,
    period: Period,
    currency: Currency,
}

impl Input {
    pub fn new(amount: f64, period: Period, currency: Currency) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
            return Err(Error::InvalidAmount(amount));
        }
        Ok(Self {
            amount,
            period,
            currency,
        })
    }

    /// Validates free-form period and currency text (case-insensitive).
    pub fn parse(amount: f64, period: &str, currency: &str) -> Result<Self> {
        let period = period.parse()?;
        let currency = currency.parse()?;
        Self::new(amount, period, currency)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}
