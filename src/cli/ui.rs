use crate::core::{ConversionResult, Currency, Input, Period, RateInfo, RateTable};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const INPUT_MARKER: &str = "⭐";

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Highlight,
    Stale,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Highlight => style(text).green().bold(),
        StyleType::Stale => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Two decimals with comma thousands separators, e.g. `66,000.00`.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac_part}")
}

fn amount_cell(value: f64, is_input: bool) -> Cell {
    if is_input {
        Cell::new(format!("{} {INPUT_MARKER}", format_amount(value)))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right)
    } else {
        Cell::new(format_amount(value)).set_alignment(CellAlignment::Right)
    }
}

fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Renders the period x currency grid followed by the input and rate provenance.
pub fn render_table(input: &Input, result: &ConversionResult, info: &RateInfo) -> String {
    let mut table = new_styled_table();

    let mut header = vec![header_cell("Period")];
    header.extend(Currency::ALL.iter().map(|c| header_cell(c.code())));
    table.set_header(header);

    for period in Period::ALL {
        let mut row = vec![Cell::new(period.as_str()).add_attribute(Attribute::Bold)];
        row.extend(Currency::ALL.into_iter().map(|currency| {
            let is_input = period == input.period() && currency == input.currency();
            amount_cell(result.get(period, currency), is_input)
        }));
        table.add_row(row);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{INPUT_MARKER} Original input: {} {}/{}\n",
        format_amount(input.amount()),
        input.currency(),
        input.period().as_str().to_lowercase()
    ));

    let source_style = if info.stale {
        StyleType::Stale
    } else {
        StyleType::Highlight
    };
    output.push_str(&format!(
        "\nRate source: {}\n{}\n{}\n",
        style_text(&info.source, source_style),
        style_text(
            &format!("Last updated: {}", format_timestamp(&info.fetched_at)),
            StyleType::Subtle
        ),
        style_text(
            &format!("Cache expires: {}", format_timestamp(&info.expires_at)),
            StyleType::Subtle
        ),
    ));
    output
}

/// Detailed provenance and every rate, sorted by currency code.
pub fn render_rate_details(info: &RateInfo, rates: &RateTable) -> String {
    let mut output = format!(
        "\n{}\n",
        style_text("Exchange Rate Details", StyleType::Title)
    );
    output.push_str(&format!("Source: {}\n", info.source));
    output.push_str(&format!("Fetched at: {}\n", info.fetched_at.to_rfc3339()));
    output.push_str(&format!("Expires at: {}\n", info.expires_at.to_rfc3339()));
    output.push_str("\nCurrent rates:\n");
    for (code, rate) in rates {
        output.push_str(&format!("  {code}: {rate:.4}\n"));
    }
    output
}

/// Creates a spinner shown while rates are being acquired.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Converter;
    use chrono::{TimeZone, Utc};

    fn sample() -> (Input, ConversionResult, RateInfo, RateTable) {
        let rates = RateTable::from([
            ("EUR".to_string(), 1.0),
            ("USD".to_string(), 1.1),
            ("PLN".to_string(), 4.25),
            ("GBP".to_string(), 0.85),
        ]);
        let input = Input::new(5000.0, Period::Month, Currency::Eur).unwrap();
        let result = Converter::default().convert(&input, &rates, Currency::Eur);
        let fetched_at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        let info = RateInfo {
            source: "exchangerate-api.com".to_string(),
            fetched_at,
            expires_at: fetched_at + chrono::Duration::hours(24),
            stale: false,
        };
        (input, result, info, rates)
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(29.7619), "29.76");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(5000.0), "5,000.00");
        assert_eq!(format_amount(66000.0), "66,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-1234.5), "-1,234.50");
    }

    #[test]
    fn test_render_table() {
        let (input, result, info, _) = sample();
        let output = render_table(&input, &result, &info);

        for label in ["Period", "PLN", "EUR", "USD", "GBP", "Hour", "Day", "Month", "Year"] {
            assert!(output.contains(label), "missing {label}");
        }
        assert!(output.contains("29.76"));
        assert!(output.contains("66,000.00"));
        assert!(output.contains(&format!("5,000.00 {INPUT_MARKER}")));
        assert!(output.contains("Original input: 5,000.00 EUR/month"));
        assert!(output.contains("exchangerate-api.com"));
        assert!(output.contains("Last updated: 2025-01-15 10:30:00 UTC"));
        assert!(output.contains("Cache expires: 2025-01-16 10:30:00 UTC"));
    }

    #[test]
    fn test_render_rate_details() {
        let (_, _, info, rates) = sample();
        let output = render_rate_details(&info, &rates);

        assert!(output.contains("Source: exchangerate-api.com"));
        assert!(output.contains("Fetched at: 2025-01-15T10:30:00+00:00"));
        assert!(output.contains("  PLN: 4.2500"));
        let eur = output.find("EUR:").unwrap();
        let usd = output.find("USD:").unwrap();
        assert!(eur < usd);
    }
}
