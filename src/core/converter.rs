//! Converts one salary figure into every supported period and currency.
//!
//! Periods are related through hours: a day is `hours_per_day` hours, a month
//! is `days_per_month` days and a year is twelve months.
use crate::core::rates::{RateTable, cross_rate};
use crate::core::salary::{Currency, Input, Period};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MONTHS_PER_YEAR: f64 = 12.0;

fn default_hours_per_day() -> u32 {
    8
}

fn default_days_per_month() -> u32 {
    21
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,
}

impl Default for WorkSchedule {
    fn default() -> Self {
        WorkSchedule {
            hours_per_day: default_hours_per_day(),
            days_per_month: default_days_per_month(),
        }
    }
}

impl WorkSchedule {
    /// Number of working hours in one `period`.
    pub fn hours_in(&self, period: Period) -> f64 {
        let day = f64::from(self.hours_per_day);
        let month = day * f64::from(self.days_per_month);
        match period {
            Period::Hour => 1.0,
            Period::Day => day,
            Period::Month => month,
            Period::Year => month * MONTHS_PER_YEAR,
        }
    }
}

/// Dense period x currency grid; every cell is always populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    cells: [[f64; Currency::ALL.len()]; Period::ALL.len()],
}

impl ConversionResult {
    pub fn get(&self, period: Period, currency: Currency) -> f64 {
        self.cells[period.index()][currency.index()]
    }

    /// Cells in display order: periods outer, currencies inner.
    pub fn iter(&self) -> impl Iterator<Item = (Period, Currency, f64)> + '_ {
        Period::ALL.into_iter().flat_map(move |period| {
            Currency::ALL
                .into_iter()
                .map(move |currency| (period, currency, self.get(period, currency)))
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    schedule: WorkSchedule,
}

impl Converter {
    pub fn new(schedule: WorkSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    pub fn to_hourly(&self, amount: f64, period: Period) -> f64 {
        amount / self.schedule.hours_in(period)
    }

    pub fn from_hourly(&self, amount: f64, period: Period) -> f64 {
        amount * self.schedule.hours_in(period)
    }

    /// Fills the whole grid for `input` using `rates`, which are relative to `base`.
    pub fn convert(&self, input: &Input, rates: &RateTable, base: Currency) -> ConversionResult {
        let hourly = self.to_hourly(input.amount(), input.period());
        debug!(
            "Normalized {} {}/{} to {hourly} per hour",
            input.amount(),
            input.currency(),
            input.period()
        );

        let mut result = ConversionResult {
            cells: [[0.0; Currency::ALL.len()]; Period::ALL.len()],
        };
        for currency in Currency::ALL {
            let hourly_in_currency = hourly * cross_rate(rates, base, input.currency(), currency);
            for period in Period::ALL {
                result.cells[period.index()][currency.index()] =
                    self.from_hourly(hourly_in_currency, period);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::core::salary::MAX_AMOUNT;

    fn eur_table() -> RateTable {
        RateTable::from([
            ("EUR".to_string(), 1.0),
            ("USD".to_string(), 1.1),
            ("PLN".to_string(), 4.25),
            ("GBP".to_string(), 0.85),
        ])
    }

    #[test]
    fn test_hours_in_period() {
        let schedule = WorkSchedule::default();
        assert_eq!(schedule.hours_in(Period::Hour), 1.0);
        assert_eq!(schedule.hours_in(Period::Day), 8.0);
        assert_eq!(schedule.hours_in(Period::Month), 168.0);
        assert_eq!(schedule.hours_in(Period::Year), 2016.0);
    }

    #[test]
    fn test_monthly_eur_scenario() {
        let converter = Converter::default();
        let input = Input::new(5000.0, Period::Month, Currency::Eur).unwrap();
        let result = converter.convert(&input, &eur_table(), Currency::Eur);

        assert_relative_eq!(
            result.get(Period::Hour, Currency::Eur),
            29.76,
            epsilon = 0.005
        );
        assert_relative_eq!(
            result.get(Period::Year, Currency::Usd),
            66000.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            result.get(Period::Month, Currency::Pln),
            5000.0 * 4.25,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            result.get(Period::Day, Currency::Gbp),
            5000.0 / 21.0 * 0.85,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_grid_is_complete_and_non_negative() {
        let converter = Converter::default();
        let rates = eur_table();
        for period in Period::ALL {
            for currency in Currency::ALL {
                let input = Input::new(123.45, period, currency).unwrap();
                let result = converter.convert(&input, &rates, Currency::Eur);
                let cells: Vec<_> = result.iter().collect();
                assert_eq!(cells.len(), 16);
                assert!(cells.iter().all(|(_, _, v)| v.is_finite() && *v >= 0.0));
            }
        }
    }

    #[test]
    fn test_largest_amount_stays_finite() {
        let converter = Converter::default();
        let input = Input::new(MAX_AMOUNT, Period::Hour, Currency::Gbp).unwrap();
        let result = converter.convert(&input, &eur_table(), Currency::Eur);
        assert!(result.iter().all(|(_, _, v)| v.is_finite()));
    }

    #[test]
    fn test_input_cell_round_trips() {
        let converter = Converter::new(WorkSchedule {
            hours_per_day: 7,
            days_per_month: 22,
        });
        let rates = eur_table();
        for period in Period::ALL {
            for currency in Currency::ALL {
                let input = Input::new(4321.0, period, currency).unwrap();
                let result = converter.convert(&input, &rates, Currency::Eur);
                assert_relative_eq!(result.get(period, currency), 4321.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_hour_day_round_trip() {
        let converter = Converter::default();
        let daily = converter.from_hourly(17.5, Period::Day);
        assert_eq!(daily, 140.0);
        assert_eq!(converter.to_hourly(daily, Period::Day), 17.5);
    }

    #[test]
    fn test_non_base_input_currency() {
        let converter = Converter::default();
        let input = Input::new(100.0, Period::Hour, Currency::Pln).unwrap();
        let result = converter.convert(&input, &eur_table(), Currency::Eur);
        assert_relative_eq!(
            result.get(Period::Hour, Currency::Eur),
            100.0 / 4.25,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.get(Period::Hour, Currency::Usd),
            100.0 * 1.1 / 4.25,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_missing_rates_leave_amounts_unconverted() {
        let converter = Converter::default();
        let input = Input::new(20.0, Period::Hour, Currency::Eur).unwrap();
        let result = converter.convert(&input, &RateTable::new(), Currency::Eur);
        for currency in Currency::ALL {
            assert_eq!(result.get(Period::Hour, currency), 20.0);
            assert_eq!(result.get(Period::Day, currency), 160.0);
        }
    }
}
