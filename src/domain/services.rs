//! Input parsing and money formatting for the shopping list.
//!
//! Prices are typed the Brazilian way (`3,50`, `R$ 12,00`) and shown back as
//! pt-BR currency. Everything here is pure and works on [`Decimal`] so sums stay exact.

use super::errors::{ValidationError, ValidationResult};
use super::models::ItemDraft;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const CURRENCY_SYMBOL: &str = "R$";

/// Keeps only the characters a price may contain: digits, `.` and `,`.
///
/// Used both when parsing and while the user types into the price field.
pub fn strip_price_input(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Parses a locale-formatted price into a non-negative decimal.
///
/// Everything except digits, `.` and `,` is dropped, then the first `,` becomes
/// the decimal point.
///
/// # Examples
///
/// ```
/// use lista_compras::domain::parse_price;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_price("R$ 3,50").unwrap(), Decimal::from_str("3.50").unwrap());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Decimal> {
    let normalized = strip_price_input(text).replacen(',', ".", 1);
    match Decimal::from_str(&normalized) {
        Ok(value) if !value.is_sign_negative() => Ok(value),
        _ => Err(ValidationError::InvalidPrice(text.to_string())),
    }
}

/// Parses a quantity into a strictly positive decimal. Accepts `,` as the decimal point.
pub fn parse_quantity(text: &str) -> ValidationResult<Decimal> {
    let normalized = text.trim().replacen(',', ".", 1);
    match Decimal::from_str(&normalized) {
        Ok(value) if value > Decimal::ZERO => Ok(value),
        _ => Err(ValidationError::InvalidQuantity(text.to_string())),
    }
}

/// Validates the three form fields and builds an [`ItemDraft`] from them.
pub fn validate_item(name: &str, quantity: &str, price: &str) -> ValidationResult<ItemDraft> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let draft = ItemDraft {
        name: name.to_string(),
        quantity: parse_quantity(quantity)?,
        unit_price: parse_price(price)?,
    };
    if draft.checked_subtotal().is_none() {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(draft)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a value as Brazilian real, e.g. `R$ 1.234,56`.
///
/// # Examples
///
/// ```
/// use lista_compras::domain::format_brl;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_brl(Decimal::from(7)), "R$ 7,00");
/// ```
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_cents(value);
    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL} {grouped},{fraction}")
}

/// Price text placed back into the form when editing: two decimals, comma separator.
pub fn format_price_input(value: Decimal) -> String {
    format!("{:.2}", round_cents(value)).replacen('.', ",", 1)
}

/// Quantity text placed back into the form when editing (`2`, `1.5`).
pub fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}
