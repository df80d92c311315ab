//! Command-line surface: flag resolution, interactive prompts and rendering.

pub mod interactive;
pub mod ui;

use crate::core::{Currency, Input, Period, Result};

pub const DEFAULT_CURRENCY: &str = "EUR";

/// Salary amounts as given through the per-period flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct PeriodAmounts {
    pub hour: Option<f64>,
    pub day: Option<f64>,
    pub month: Option<f64>,
    pub year: Option<f64>,
}

impl PeriodAmounts {
    /// The first amount given, checked from the shortest period up.
    pub fn first(&self) -> Option<(f64, Period)> {
        [
            (self.hour, Period::Hour),
            (self.day, Period::Day),
            (self.month, Period::Month),
            (self.year, Period::Year),
        ]
        .into_iter()
        .find_map(|(amount, period)| amount.map(|a| (a, period)))
    }
}

/// `--currency` wins over the positional currency; EUR when neither is given.
pub fn resolve_currency(flag: Option<&str>, positional: Option<&str>) -> Result<Currency> {
    flag.or(positional).unwrap_or(DEFAULT_CURRENCY).parse()
}

/// Builds the input from flags, or `None` when no amount flag was passed.
pub fn input_from_flags(
    amounts: &PeriodAmounts,
    currency_flag: Option<&str>,
    positional_currency: Option<&str>,
) -> Result<Option<Input>> {
    let Some((amount, period)) = amounts.first() else {
        return Ok(None);
    };
    let currency = resolve_currency(currency_flag, positional_currency)?;
    Input::new(amount, period, currency).map(Some)
}
