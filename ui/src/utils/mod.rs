pub mod time;

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Read a numeric input. Thousands separators are not accepted; a comma is
/// read as the decimal point.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim().replace(',', ".");
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(&value).ok()
}

pub fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// Value for an `<input>` bound to an optional field.
pub fn input_text(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Absolute url of stored media. The backend sends paths such as
/// `/uploads/a.jpg`, served from its own address.
pub fn media_url(url: &str) -> String {
    resolve_url(&crate::backend_address(), url)
}

fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{url}", base.trim_end_matches('/'))
    } else {
        url.to_string()
    }
}

/// Price in the local style: "$ 1.250.000" or "$ 14.500,50".
pub fn format_price(value: Decimal) -> String {
    let value =
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let value = value.abs();

    let digits = value.trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let cents = (value.fract() * Decimal::ONE_HUNDRED).trunc().to_string();
    if cents == "0" {
        format!("$ {sign}{grouped}")
    } else {
        format!("$ {sign}{grouped},{cents:0>2}")
    }
}
