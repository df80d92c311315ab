//! Prompts for period, amount and currency when no amount was passed on the
//! command line. Invalid answers are reported and asked again.

use crate::core::{Currency, Input, Period};
use anyhow::{Result, bail};
use std::io::{BufRead, Write};

pub fn prompt_input<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<Input> {
    let period = prompt_until(reader, writer, "Select period [Hour/Day/Month/Year]: ", |s| {
        s.parse::<Period>().map_err(|e| e.to_string())
    })?;
    let amount = prompt_until(reader, writer, "Enter amount: ", parse_amount)?;
    let currency = prompt_until(reader, writer, "Select currency [PLN/EUR/USD/GBP]: ", |s| {
        s.parse::<Currency>().map_err(|e| e.to_string())
    })?;

    Ok(Input::new(amount, period, currency)?)
}

fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let amount: f64 = s.parse().map_err(|e| format!("invalid number: {e}"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be positive".to_string());
    }
    Ok(amount)
}

fn prompt_until<R, W, T, F>(reader: &mut R, writer: &mut W, prompt: &str, parse: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> std::result::Result<T, String>,
{
    let mut line = String::new();
    loop {
        write!(writer, "{prompt}")?;
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            bail!("input closed before a value was entered");
        }
        let answer = line.trim();
        if answer.is_empty() {
            continue;
        }

        match parse(answer) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(writer, "Error: {message}")?,
        }
    }
}
