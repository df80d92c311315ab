//! Conversion domain and rate abstractions

pub mod config;
pub mod converter;
pub mod error;
pub mod log;
pub mod rates;
pub mod salary;

// Re-export main types for cleaner imports
pub use converter::{ConversionResult, Converter, WorkSchedule};
pub use error::{Error, Result};
pub use rates::{FetchedRates, RateInfo, RateSource, RateTable};
pub use salary::{Currency, Input, MAX_AMOUNT, Period};
