use alloy_primitives::utils::{self, ParseUnits, Unit};
use alloy_primitives::U256;

use crate::error::EthError;

/// The alloy unit for a currency with `decimals` fractional digits.
pub fn unit(decimals: u8) -> Result<Unit, EthError> {
    Unit::new(decimals).ok_or_else(|| {
        EthError::InvalidAmount(format!("{decimals} decimals is not a valid unit"))
    })
}

/// Parses a plain decimal string (`"0.5"`, `"12"`, `".25"`) into the smallest
/// unit of a currency with `decimals` fractional digits.
///
/// Signs, exponents, whitespace and more fractional digits than the currency
/// supports are rejected. Zero parses successfully; callers decide whether a
/// zero value is acceptable.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, EthError> {
    ensure_plain_decimal(amount, unit(decimals)?)?;

    utils::parse_units(amount, decimals)
        .map(<U256 as From<ParseUnits>>::from)
        .map_err(|e| EthError::InvalidAmount(format!("'{amount}': {e}")))
}

/// Formats a smallest-unit value as a decimal string with trailing zeros
/// removed, keeping at least one fractional digit (`"1.0"`, `"0.5"`).
pub fn format_units(value: U256, unit: Unit) -> String {
    let full = ParseUnits::from(value).format_units(unit);
    let (whole, fraction) = full.split_once('.').unwrap_or((full.as_str(), ""));
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Formats a smallest-unit value with exactly `places` fractional digits,
/// truncating (never rounding up) the remainder.
pub fn format_units_fixed(value: U256, unit: Unit, places: usize) -> String {
    let full = ParseUnits::from(value).format_units(unit);
    let (whole, fraction) = full.split_once('.').unwrap_or((full.as_str(), ""));
    if places == 0 {
        return whole.to_string();
    }
    let shown: String = fraction.chars().chain(std::iter::repeat('0')).take(places).collect();
    format!("{whole}.{shown}")
}

// alloy accepts a leading '-' and silently truncates excess precision.
fn ensure_plain_decimal(amount: &str, unit: Unit) -> Result<(), EthError> {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(EthError::InvalidAmount(format!("'{amount}' is not a number")));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(EthError::InvalidAmount(format!("'{amount}' is not a number")));
    }
    if fraction.len() > unit.get() as usize {
        return Err(EthError::InvalidAmount(format!(
            "at most {} fractional digits are supported",
            unit.get()
        )));
    }
    Ok(())
}
