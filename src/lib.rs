pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::{ConversionResult, Converter, Input, RateInfo, RateTable};
use crate::providers::RateProvider;
use tracing::debug;

/// Everything the presentation layer needs for one run.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub input: Input,
    pub rates: RateTable,
    pub info: RateInfo,
    pub result: ConversionResult,
}

/// Acquires rates based on the input's currency and fills the conversion grid.
pub async fn calculate(
    input: Input,
    provider: &RateProvider,
    converter: &Converter,
) -> crate::core::Result<Calculation> {
    let base = input.currency();
    let (rates, info) = provider.get_rates(base).await?;
    debug!(source = %info.source, stale = info.stale, "Rates acquired");

    let result = converter.convert(&input, &rates, base);
    Ok(Calculation {
        input,
        rates,
        info,
        result,
    })
}
